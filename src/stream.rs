//! Non-blocking stream reading
//!
//! Every readable handle (source, evaluator stdout, evaluator stderr) is serviced by a
//! dedicated reader thread doing bounded blocking reads. Chunks travel over a
//! per-handle FIFO channel, so the consumer side can drain whatever is available
//! without ever blocking, and per-handle ordering is preserved.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{Receiver, Sender, SyncSender, TryRecvError, channel, sync_channel};

use crate::event_loop::{Handle, Notifier};

/// Upper bound for a single read, write or replay step
pub const CHUNK_SIZE: usize = 1024;

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    Data(Vec<u8>),
    Eof,
}

enum ChunkSender {
    Bounded(SyncSender<Chunk>),
    Unbounded(Sender<Chunk>),
}

impl ChunkSender {
    fn send(&self, chunk: Chunk) -> bool {
        match self {
            ChunkSender::Bounded(tx) => tx.send(chunk).is_ok(),
            ChunkSender::Unbounded(tx) => tx.send(chunk).is_ok(),
        }
    }
}

/// Result of draining a handle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Drained {
    /// Every byte that was available, in arrival order
    pub bytes: Vec<u8>,
    /// The handle reached end-of-stream
    pub eof: bool,
}

impl Drained {
    /// Nothing was pending and the stream is still open
    pub fn is_spurious(&self) -> bool {
        self.bytes.is_empty() && !self.eof
    }
}

/// Consumer side of a handle serviced by a reader thread
pub struct StreamReader {
    rx: Receiver<Chunk>,
    finished: bool,
}

impl StreamReader {
    /// Spawn a reader thread with an unbounded queue
    ///
    /// The thread never blocks on the consumer, so the producer on the other side of
    /// `reader` is never stalled by a slow UI.
    pub fn spawn<R>(reader: R, handle: Handle, notifier: Notifier) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = channel();
        spawn_reader_thread(reader, handle, notifier, ChunkSender::Unbounded(tx));
        Self {
            rx,
            finished: false,
        }
    }

    /// Spawn a reader thread that holds at most `capacity` unconsumed chunks
    ///
    /// Once the queue is full the thread stops reading, which pushes backpressure to
    /// whoever writes into `reader`.
    pub fn spawn_bounded<R>(reader: R, handle: Handle, notifier: Notifier, capacity: usize) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = sync_channel(capacity);
        spawn_reader_thread(reader, handle, notifier, ChunkSender::Bounded(tx));
        Self {
            rx,
            finished: false,
        }
    }

    /// Collect every chunk currently queued without blocking
    ///
    /// A call with nothing queued returns an empty, non-eof result.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        if self.finished {
            drained.eof = true;
            return drained;
        }

        loop {
            match self.rx.try_recv() {
                Ok(Chunk::Data(bytes)) => drained.bytes.extend_from_slice(&bytes),
                Ok(Chunk::Eof) | Err(TryRecvError::Disconnected) => {
                    self.finished = true;
                    drained.eof = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        drained
    }
}

fn spawn_reader_thread<R>(mut reader: R, handle: Handle, notifier: Notifier, tx: ChunkSender)
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if !tx.send(Chunk::Data(buf[..n].to_vec())) {
                        return;
                    }
                    notifier.notify(handle);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("read error on {:?}, treating as end-of-stream: {}", handle, e);
                    break;
                }
            }
        }

        if tx.send(Chunk::Eof) {
            notifier.notify(handle);
        }
    });
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod stream_tests;
