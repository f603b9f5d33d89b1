//! Render projection
//!
//! Collapses a line's cells into runs of identically-styled text for a
//! display layer. The cursor overlay is applied first: the cell at the
//! cursor column has its reverse-video flag toggled for exactly this
//! projection, without touching the persisted cell state.

use crate::core::attrs::Attributes;
use crate::core::line::Line;

/// A maximal span of identically-styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub attrs: Attributes,
}

/// Project a line into styled runs, left to right. `cursor_col` is the
/// 1-based column to overlay the cursor on, if the cursor sits on this
/// line.
pub fn line_runs(line: &Line, cursor_col: Option<usize>) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    let mut text = String::new();
    let mut current: Option<Attributes> = None;

    for (idx, cell) in line.cells().iter().enumerate() {
        let mut attrs = cell.attrs;
        if cursor_col == Some(idx + 1) {
            attrs.reverse = !attrs.reverse;
        }

        match current {
            Some(prev) if prev == attrs => text.push(cell.ch),
            Some(prev) => {
                runs.push(StyledRun {
                    text: std::mem::take(&mut text),
                    attrs: prev,
                });
                text.push(cell.ch);
                current = Some(attrs);
            }
            None => {
                text.push(cell.ch);
                current = Some(attrs);
            }
        }
    }

    if let Some(attrs) = current {
        if !text.is_empty() {
            runs.push(StyledRun { text, attrs });
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attrs::SgrOp;
    use crate::core::palette::AnsiColor;

    fn plain() -> Attributes {
        Attributes::default()
    }

    fn red() -> Attributes {
        plain().apply(SgrOp::Foreground(AnsiColor::Red))
    }

    #[test]
    fn test_uniform_line_is_one_run() {
        let mut line = Line::new(5, plain(), 0);
        line.write_run("abcde", 1, plain(), 5);

        let runs = line_runs(&line, None);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "abcde");
        assert_eq!(runs[0].attrs, plain());
    }

    #[test]
    fn test_style_change_splits_runs() {
        let mut line = Line::new(6, plain(), 0);
        line.write_run("ab", 1, plain(), 6);
        line.write_run("cd", 3, red(), 6);
        line.write_run("ef", 5, plain(), 6);

        let runs = line_runs(&line, None);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "ab");
        assert_eq!(runs[1].text, "cd");
        assert_eq!(runs[1].attrs, red());
        assert_eq!(runs[2].text, "ef");
    }

    #[test]
    fn test_adjacent_equal_styles_merge() {
        let mut line = Line::new(4, plain(), 0);
        line.write_run("ab", 1, red(), 4);
        line.write_run("cd", 3, red(), 4);

        let runs = line_runs(&line, None);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "abcd");
    }

    #[test]
    fn test_cursor_overlay_toggles_reverse_for_one_cell() {
        let mut line = Line::new(3, plain(), 0);
        line.write_run("abc", 1, plain(), 3);

        let runs = line_runs(&line, Some(2));
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].attrs.reverse);
        assert!(runs[1].attrs.reverse);
        assert_eq!(runs[1].text, "b");
        assert!(!runs[2].attrs.reverse);

        // The persisted cell state is untouched
        assert!(!line.cell(1).unwrap().attrs.reverse);
    }

    #[test]
    fn test_cursor_overlay_on_reversed_cell_un_reverses() {
        let reversed = plain().apply(SgrOp::Reverse);
        let mut line = Line::new(2, reversed, 0);
        line.write_run("xy", 1, reversed, 2);

        let runs = line_runs(&line, Some(1));
        assert!(!runs[0].attrs.reverse);
        assert_eq!(runs[0].text, "x");
        assert!(runs[1].attrs.reverse);
    }

    #[test]
    fn test_empty_line_is_single_blank_run() {
        let line = Line::new(4, plain(), 0);
        let runs = line_runs(&line, None);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "    ");
    }
}
