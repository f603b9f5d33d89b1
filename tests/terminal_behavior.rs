//! End-to-end behavior tests
//!
//! Each test drives the public `Terminal` API with raw escape-sequence
//! input and checks the resulting screen state, the way a display layer
//! would consume it.

use vtgrid::core::{Attributes, Color, Snapshot};
use vtgrid::render::line_runs;
use vtgrid::Terminal;

fn snapshot(term: &Terminal) -> Snapshot {
    Snapshot::from_screen(term.screen())
}

#[test]
fn red_text_produces_one_styled_run_and_reset_leaves_no_residue() {
    let mut term = Terminal::with_dimensions(4, 10);
    term.feed_str("\x1b[31mRed\x1b[0m");

    let line = term.screen().line(1).unwrap();
    let runs = line_runs(line, None);

    // One red run, then the untouched blank remainder of the row
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Red");
    assert_eq!(runs[0].attrs.fg, Color::Rgb(0xcc, 0x00, 0x00));
    assert!(!runs[0].attrs.bold);
    assert_eq!(runs[1].attrs, Attributes::default());

    // No bold/underline/color leaks past the reset
    assert_eq!(term.screen().attrs(), Attributes::default());
}

#[test]
fn csi_split_across_feeds_decodes_like_whole() {
    let mut whole = Terminal::with_dimensions(4, 20);
    whole.feed_str("\x1b[31mx");

    let mut split = Terminal::with_dimensions(4, 20);
    split.feed_str("\x1b[3");
    split.feed_str("1mx");

    assert!(snapshot(&whole).content_equals(&snapshot(&split)));
    let cell = split.screen().line(1).unwrap().cell(0).unwrap();
    assert_eq!(cell.attrs.fg, Color::Rgb(0xcc, 0x00, 0x00));
}

#[test]
fn partial_sequence_produces_no_tokens_until_completed() {
    let mut term = Terminal::with_dimensions(4, 20);
    term.update_str(""); // flush construction dirt

    let changes = term.update_str("\x1b[2");
    assert!(changes.is_empty());

    term.feed_str("J");
    // Now the erase applied; every row was cleared and is dirty
    let changed: Vec<usize> = term.update(&[]).iter().map(|c| c.row).collect();
    assert_eq!(changed, vec![1, 2, 3, 4]);
}

#[test]
fn erase_line_then_append_leaves_only_appended_text() {
    let mut term = Terminal::with_dimensions(4, 10);
    term.feed_str("XXXXXXXXXX");
    term.feed_str("\x1b[2K");
    term.feed_str("\rab");

    let line = term.screen().line(1).unwrap();
    assert_eq!(line.len(), 10);
    assert_eq!(line.text(), "ab");
    assert!(line.cells()[2..].iter().all(|c| c.is_blank()));
}

#[test]
fn cursor_moves_never_leave_bounds() {
    let mut term = Terminal::with_dimensions(5, 10);

    term.feed_str("\x1b[5A");
    assert_eq!(term.screen().cursor().row, 1);

    term.feed_str("\x1b[99D");
    assert_eq!(term.screen().cursor().col, 1);

    term.feed_str("\x1b[99B\x1b[99C");
    assert_eq!(term.screen().cursor().row, 5);
    assert_eq!(term.screen().cursor().col, 10);

    term.feed_str("\x1b[99;99H");
    assert_eq!(term.screen().cursor().row, 5);
    assert_eq!(term.screen().cursor().col, 10);

    term.feed_str("\x1b[0;0H");
    assert_eq!(term.screen().cursor().row, 1);
    assert_eq!(term.screen().cursor().col, 1);
}

#[test]
fn reset_and_refeed_is_idempotent() {
    let stream = "first\r\n\x1b[1;34msecond\x1b[0m\r\n\x1b[3;2Hthird\x1b[2K\x1b7late\x1b8";

    let mut term = Terminal::with_dimensions(6, 20);
    term.feed_str(stream);
    let first = snapshot(&term);

    term.reset();
    term.feed_str(stream);
    let second = snapshot(&term);

    assert!(first.content_equals(&second));
}

#[test]
fn insert_then_delete_at_top_is_net_zero_except_boundary() {
    let mut term = Terminal::with_dimensions(4, 10);
    term.feed_str("r1\r\nr2\r\nr3\r\nr4");

    term.feed_str("\x1b[1;1H\x1b[L\x1b[M");

    // r4 was discarded when the insert pushed it past the bottom; the
    // delete pulled a blank row in at the boundary
    let text: Vec<String> = (1..=4)
        .map(|r| term.screen().line(r).unwrap().text())
        .collect();
    assert_eq!(text, vec!["r1", "r2", "r3", ""]);
}

#[test]
fn indexed_256_color_resolves_from_the_palette() {
    let mut term = Terminal::with_dimensions(2, 10);
    term.feed_str("\x1b[38;5;196mX");

    let cell = term.screen().line(1).unwrap().cell(0).unwrap();
    // Palette entry 196, not a 16-color approximation
    assert_eq!(cell.attrs.fg, Color::Rgb(0xff, 0x00, 0x00));

    // And an entry outside the cube, from the grayscale ramp
    term.feed_str("\x1b[48;5;232mY");
    let cell = term.screen().line(1).unwrap().cell(1).unwrap();
    assert_eq!(cell.attrs.bg, Color::Rgb(8, 8, 8));
}

#[test]
fn truecolor_is_recognized_but_not_applied() {
    let mut term = Terminal::with_dimensions(2, 10);
    term.feed_str("\x1b[38;2;9;9;9mX");
    let cell = term.screen().line(1).unwrap().cell(0).unwrap();
    assert_eq!(cell.attrs.fg, Color::Default);
}

#[test]
fn save_restore_private_form_carries_attributes() {
    let mut term = Terminal::with_dimensions(4, 20);
    term.feed_str("\x1b[1;31m\x1b[2;5H\x1b7");
    term.feed_str("\x1b[0m\x1b[1;1H");
    term.feed_str("\x1b8x");

    // Position and the red bold attributes came back
    let cell = term.screen().line(2).unwrap().cell(4).unwrap();
    assert_eq!(cell.ch, 'x');
    assert!(cell.attrs.bold);
    assert_eq!(cell.attrs.fg, Color::Rgb(0xef, 0x29, 0x29));
}

#[test]
fn save_restore_csi_form_is_position_only() {
    let mut term = Terminal::with_dimensions(4, 20);
    term.feed_str("\x1b[1;31m\x1b[2;5H\x1b[s");
    term.feed_str("\x1b[0m\x1b[1;1H");
    term.feed_str("\x1b[ux");

    let cell = term.screen().line(2).unwrap().cell(4).unwrap();
    assert_eq!(cell.ch, 'x');
    // Attributes were not restored by the CSI form
    assert!(!cell.attrs.bold);
    assert_eq!(cell.attrs.fg, Color::Default);
}

#[test]
fn scrolling_keeps_the_last_rows_visible() {
    let mut term = Terminal::with_dimensions(3, 10);
    for i in 1..=5 {
        term.feed_str(&format!("line{i}"));
        if i < 5 {
            term.feed_str("\n");
        }
    }
    let text: Vec<String> = (1..=3)
        .map(|r| term.screen().line(r).unwrap().text())
        .collect();
    assert_eq!(text, vec!["line3", "line4", "line5"]);
}

#[test]
fn bytes_and_str_feeds_are_equivalent() {
    let stream = "a\x1b[32mb\x1b[0mc";

    let mut by_str = Terminal::with_dimensions(2, 10);
    by_str.feed_str(stream);

    let mut by_bytes = Terminal::with_dimensions(2, 10);
    by_bytes.feed(stream.as_bytes());

    assert!(snapshot(&by_str).content_equals(&snapshot(&by_bytes)));
}

#[test]
fn snapshot_round_trips_through_a_file() {
    let mut term = Terminal::with_dimensions(3, 12);
    term.feed_str("\x1b[7mREV\x1b[0m plain");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    let saved = snapshot(&term);
    saved.save_to(&path).expect("save");
    let loaded = Snapshot::load_from(&path).expect("load");

    assert_eq!(saved, loaded);
    assert!(loaded.grid[0][0].attrs.reverse);
}
