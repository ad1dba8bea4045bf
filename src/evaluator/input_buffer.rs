use crate::stream::CHUNK_SIZE;

/// Append-only copy of everything read from the source
///
/// Every generation is replayed the full buffer, so bytes are never dropped or
/// reordered between generations.
#[derive(Debug, Default)]
pub struct InputBuffer {
    bytes: Vec<u8>,
    closed: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &[u8]) {
        debug_assert!(!self.closed, "append after end-of-stream");
        self.bytes.extend_from_slice(chunk);
    }

    /// Mark end-of-stream on the source
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Replay chunks, in order, each at most `CHUNK_SIZE` bytes
    pub fn replay_chunks(&self) -> std::slice::Chunks<'_, u8> {
        self.bytes.chunks(CHUNK_SIZE)
    }
}

#[cfg(test)]
#[path = "input_buffer_tests.rs"]
mod input_buffer_tests;
