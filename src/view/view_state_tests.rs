//! Tests for view_state

use super::*;
use proptest::prelude::*;

fn numbered_lines(count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| format!("line{}", i))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

fn view_with_height(height: u16) -> ViewState {
    let mut view = ViewState::default();
    view.resize(height, b"");
    view
}

#[test]
fn test_line_count_follows_split_semantics() {
    assert_eq!(line_count(b""), 1);
    assert_eq!(line_count(b"1"), 1);
    assert_eq!(line_count(b"1\n"), 2);
    assert_eq!(line_count(b"{\n  \"a\": 1\n}\n"), 4);
}

#[test]
fn test_window_skips_and_truncates() {
    let text = numbered_lines(10);
    assert_eq!(window(&text, 0, 2), "line0\nline1");
    assert_eq!(window(&text, 8, 5), "line8\nline9");
    assert_eq!(window(&text, 20, 5), "");
}

#[test]
fn test_window_tolerates_invalid_utf8() {
    let text = b"ok\n\xff\xfe\nend";
    assert_eq!(window(text, 2, 1), "end");
}

#[test]
fn test_clean_error_text_strips_hint() {
    let raw = b"jq: error: syntax error, unexpected INVALID_CHARACTER (Unix shell quoting issues?) at <top-level>, line 1:\n.[\njq: 1 compile error\n";
    assert_eq!(
        clean_error_text(raw),
        "jq: error: syntax error, unexpected INVALID_CHARACTER at <top-level>, line 1:\n.[\njq: 1 compile error"
    );
}

#[test]
fn test_initial_state() {
    let view = ViewState::default();
    assert_eq!(view.body(), "");
    assert_eq!(view.error_bar, ErrorBar::Help);
    assert_eq!(view.error_bar.text(), HELP_TEXT);
    assert_eq!(view.prompt(), PromptState::default());
    assert_eq!(view.height(), None);
    assert_eq!(view.visible_height(), DEFAULT_FALLBACK_HEIGHT as usize);
}

#[test]
fn test_refresh_prefers_live_output() {
    let mut view = view_with_height(10);
    view.commit(b"old");

    view.refresh(b"new");
    assert_eq!(view.body(), "new");

    view.refresh(b"");
    assert_eq!(view.body(), "old");
}

#[test]
fn test_refresh_shows_committed_when_paused() {
    let mut view = view_with_height(10);
    view.commit(b"old");
    view.paused = true;

    view.refresh(b"new");
    assert_eq!(view.body(), "old");
}

#[test]
fn test_body_is_truncated_to_height() {
    let mut view = view_with_height(3);
    view.refresh(&numbered_lines(10));
    assert_eq!(view.body(), "line0\nline1\nline2");
}

#[test]
fn test_scroll_moves_window() {
    let live = numbered_lines(20);
    let mut view = view_with_height(4);
    view.refresh(&live);

    view.scroll(ScrollCommand::Down, &live);
    assert_eq!(view.scroll.offset, 1);
    assert_eq!(view.body(), "line1\nline2\nline3\nline4");

    view.scroll(ScrollCommand::PageDown, &live);
    assert_eq!(view.scroll.offset, 3);

    view.scroll(ScrollCommand::PageUp, &live);
    view.scroll(ScrollCommand::Up, &live);
    assert_eq!(view.scroll.offset, 0);
}

#[test]
fn test_repeated_page_down_stops_at_bound() {
    let live = numbered_lines(20);
    let mut view = view_with_height(10);

    for _ in 0..50 {
        view.scroll(ScrollCommand::PageDown, &live);
    }
    assert_eq!(view.scroll.offset, 15);
    assert_eq!(view.body(), "line15\nline16\nline17\nline18\nline19");
}

#[test]
fn test_scrolling_does_not_change_pause() {
    let live = numbered_lines(20);
    let mut view = view_with_height(4);
    view.toggle_pause(&live);

    view.scroll(ScrollCommand::Down, &live);
    assert!(view.paused);
}

#[test]
fn test_shorter_content_reclamps_offset() {
    let mut view = view_with_height(10);
    let long = numbered_lines(100);
    for _ in 0..20 {
        view.scroll(ScrollCommand::PageDown, &long);
    }
    assert_eq!(view.scroll.offset, 95);

    view.refresh(&numbered_lines(8));
    assert_eq!(view.scroll.offset, 3);
}

#[test]
fn test_repaint_keeps_offset_while_output_grows() {
    let mut view = view_with_height(10);
    let long = numbered_lines(100);
    for _ in 0..20 {
        view.scroll(ScrollCommand::PageDown, &long);
    }
    assert_eq!(view.scroll.offset, 95);

    // Partial output: nothing to show at this offset yet
    view.repaint(&numbered_lines(8));
    assert_eq!(view.scroll.offset, 95);
    assert_eq!(view.body(), "");

    view.repaint(&long);
    assert_eq!(view.scroll.offset, 95);
    assert!(view.body().starts_with("line95\n"));
}

#[test]
fn test_resize_reclamps_offset() {
    let live = numbered_lines(30);
    let mut view = view_with_height(10);
    for _ in 0..10 {
        view.scroll(ScrollCommand::PageDown, &live);
    }
    assert_eq!(view.scroll.offset, 25);

    view.resize(40, &live);
    assert_eq!(view.scroll.offset, 10);
    assert_eq!(view.height(), Some(40));
}

#[test]
fn test_toggle_pause_commits_live_output() {
    let mut view = view_with_height(10);
    view.commit(b"old");

    assert!(view.toggle_pause(b"live"));
    assert_eq!(view.committed, b"live");
    assert_eq!(view.body(), "live");
    assert!(view.prompt().paused);
}

#[test]
fn test_toggle_pause_keeps_committed_when_live_is_empty() {
    let mut view = view_with_height(10);
    view.commit(b"old");

    view.toggle_pause(b"");
    assert_eq!(view.committed, b"old");
    assert_eq!(view.body(), "old");
}

#[test]
fn test_double_toggle_shows_latest_live_output() {
    let mut view = view_with_height(10);

    view.toggle_pause(b"first");
    // Live output keeps growing in the background while paused
    view.refresh(b"first second");
    assert_eq!(view.body(), "first");

    assert!(!view.toggle_pause(b"first second"));
    assert_eq!(view.body(), "first second");
}

#[test]
fn test_error_bar_transitions() {
    let mut view = ViewState::default();

    view.show_error(b"jq: error: boom (Unix shell quoting issues?)\n");
    assert_eq!(view.error_bar, ErrorBar::Error("jq: error: boom".into()));

    view.clear_error_bar();
    assert_eq!(view.error_bar.text(), "");

    view.show_warning("Invalid config: oops");
    assert_eq!(view.error_bar, ErrorBar::Warning("Invalid config: oops".into()));
}

#[test]
fn test_prompt_combines_paused_and_erroring() {
    let mut view = ViewState::default();
    view.erroring = true;
    view.toggle_pause(b"");

    assert_eq!(
        view.prompt(),
        PromptState {
            paused: true,
            erroring: true
        }
    );
}

// The body never shows more lines than the visible height and always starts at
// the scroll offset of the displayed text.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_body_window_matches_offset(
        lines in 1usize..200,
        height in 1u16..60,
        downs in 0usize..100,
    ) {
        let live = numbered_lines(lines);
        let mut view = view_with_height(height);
        for _ in 0..downs {
            view.scroll(ScrollCommand::Down, &live);
        }

        let max = lines.saturating_sub(height as usize / 2);
        prop_assert!(view.scroll.offset <= max);

        let shown = view.body().split('\n').count();
        prop_assert!(shown <= height as usize);
        let first = format!("line{}", view.scroll.offset);
        if view.scroll.offset < lines {
            prop_assert!(view.body().starts_with(&first));
        }
    }
}
