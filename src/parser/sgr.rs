//! SGR parameter-list decoding
//!
//! Turns the numeric parameters of a "select graphic rendition" sequence
//! into discrete [`SgrOp`]s. Empty fields count as 0 (reset). Extended
//! color selection (38/48) consumes its following arguments: `5;n` picks
//! a 256-palette index, `2;r;g;b` a truecolor value (decoded but not
//! applied downstream). Scanning stops after an extended-color
//! introducer, a plain underline, or an underline-color parameter, so
//! underline-style subparameters are never misread as free-standing
//! codes. Malformed or out-of-range arguments drop the op rather than
//! erroring.

use tracing::debug;

use crate::core::attrs::SgrOp;
use crate::core::palette::AnsiColor;

/// Parse one raw parameter field: empty means 0, garbage means skip
fn parse_field(field: &str) -> Option<u16> {
    if field.is_empty() {
        return Some(0);
    }
    field.parse().ok()
}

/// Decode a split SGR parameter list into operations
pub fn decode_params(fields: &[&str]) -> Vec<SgrOp> {
    let mut ops = Vec::new();
    // A bare `ESC [ m` has a single empty field and resets
    let fields: &[&str] = if fields.is_empty() { &[""] } else { fields };

    let mut i = 0;
    while i < fields.len() {
        let Some(code) = parse_field(fields[i]) else {
            debug!(field = fields[i], "non-numeric SGR parameter skipped");
            i += 1;
            continue;
        };

        match code {
            38 | 48 => {
                decode_extended_color(code, &fields[i + 1..], &mut ops);
                break;
            }
            // Underline may carry style subparameters; do not scan past it
            4 => {
                ops.push(SgrOp::Underline);
                break;
            }
            // Underline color takes arguments this terminal does not model
            58 => break,
            _ => ops.push(map_code(code)),
        }
        i += 1;
    }

    ops
}

/// Decode the arguments after a 38/48 introducer
fn decode_extended_color(code: u16, args: &[&str], ops: &mut Vec<SgrOp>) {
    let foreground = code == 38;
    let mode = args.first().and_then(|f| parse_field(f));
    match mode {
        Some(5) => {
            // 256-color palette index
            let index = args.get(1).and_then(|f| parse_field(f));
            match index {
                Some(i) if i <= 255 => ops.push(if foreground {
                    SgrOp::ForegroundIndexed(i as u8)
                } else {
                    SgrOp::BackgroundIndexed(i as u8)
                }),
                _ => debug!(?index, "palette index missing or out of range"),
            }
        }
        Some(2) => {
            // Truecolor; the resolver leaves these unapplied
            let component =
                |n: usize| args.get(n).and_then(|f| parse_field(f)).filter(|&v| v <= 255);
            match (component(1), component(2), component(3)) {
                (Some(r), Some(g), Some(b)) => ops.push(if foreground {
                    SgrOp::ForegroundRgb(r as u8, g as u8, b as u8)
                } else {
                    SgrOp::BackgroundRgb(r as u8, g as u8, b as u8)
                }),
                _ => debug!("truecolor components missing or out of range"),
            }
        }
        other => debug!(?other, "unknown extended color mode"),
    }
}

/// Map a single free-standing SGR code to an operation
fn map_code(code: u16) -> SgrOp {
    match code {
        0 => SgrOp::Reset,
        1 => SgrOp::Bold,
        2 => SgrOp::Dim,
        3 => SgrOp::Italic,
        5 => SgrOp::SlowBlink,
        6 => SgrOp::RapidBlink,
        7 => SgrOp::Reverse,
        9 => SgrOp::Crossed,
        22 => SgrOp::NormalIntensity,
        23 => SgrOp::NotItalic,
        24 => SgrOp::NotUnderlined,
        25 => SgrOp::NotBlinking,
        27 => SgrOp::NotReversed,
        29 => SgrOp::NotCrossed,
        30..=37 => match AnsiColor::from_code_digit(code - 30) {
            Some(c) => SgrOp::Foreground(c),
            None => SgrOp::Unsupported(code),
        },
        39 => SgrOp::DefaultForeground,
        40..=47 => match AnsiColor::from_code_digit(code - 40) {
            Some(c) => SgrOp::Background(c),
            None => SgrOp::Unsupported(code),
        },
        49 => SgrOp::DefaultBackground,
        53 => SgrOp::Overline,
        55 => SgrOp::NotOverline,
        73 => SgrOp::Superscript,
        74 => SgrOp::Subscript,
        other => SgrOp::Unsupported(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(fields: &[&str]) -> Vec<SgrOp> {
        decode_params(fields)
    }

    #[test]
    fn test_empty_list_resets() {
        assert_eq!(decode(&[]), vec![SgrOp::Reset]);
        assert_eq!(decode(&[""]), vec![SgrOp::Reset]);
    }

    #[test]
    fn test_simple_codes() {
        assert_eq!(decode(&["0"]), vec![SgrOp::Reset]);
        assert_eq!(
            decode(&["1", "3", "7"]),
            vec![SgrOp::Bold, SgrOp::Italic, SgrOp::Reverse]
        );
        assert_eq!(
            decode(&["31", "42"]),
            vec![
                SgrOp::Foreground(AnsiColor::Red),
                SgrOp::Background(AnsiColor::Green)
            ]
        );
        assert_eq!(
            decode(&["39", "49"]),
            vec![SgrOp::DefaultForeground, SgrOp::DefaultBackground]
        );
    }

    #[test]
    fn test_empty_field_in_list_is_reset() {
        assert_eq!(decode(&["1", ""]), vec![SgrOp::Bold, SgrOp::Reset]);
    }

    #[test]
    fn test_indexed_color() {
        assert_eq!(decode(&["38", "5", "196"]), vec![SgrOp::ForegroundIndexed(196)]);
        assert_eq!(decode(&["48", "5", "33"]), vec![SgrOp::BackgroundIndexed(33)]);
    }

    #[test]
    fn test_indexed_color_out_of_range_dropped() {
        assert_eq!(decode(&["38", "5", "300"]), vec![]);
        assert_eq!(decode(&["38", "5"]), vec![]);
    }

    #[test]
    fn test_extended_color_stops_scanning() {
        // Codes after the extended-color args are not interpreted
        assert_eq!(
            decode(&["38", "5", "196", "1"]),
            vec![SgrOp::ForegroundIndexed(196)]
        );
    }

    #[test]
    fn test_codes_before_extended_color_still_apply() {
        assert_eq!(
            decode(&["1", "38", "5", "10"]),
            vec![SgrOp::Bold, SgrOp::ForegroundIndexed(10)]
        );
    }

    #[test]
    fn test_truecolor_decoded() {
        assert_eq!(
            decode(&["38", "2", "255", "128", "0"]),
            vec![SgrOp::ForegroundRgb(255, 128, 0)]
        );
        assert_eq!(
            decode(&["48", "2", "1", "2", "3"]),
            vec![SgrOp::BackgroundRgb(1, 2, 3)]
        );
    }

    #[test]
    fn test_truecolor_incomplete_dropped() {
        assert_eq!(decode(&["38", "2", "255"]), vec![]);
    }

    #[test]
    fn test_underline_stops_scanning() {
        assert_eq!(decode(&["4", "31"]), vec![SgrOp::Underline]);
        assert_eq!(decode(&["1", "4"]), vec![SgrOp::Bold, SgrOp::Underline]);
    }

    #[test]
    fn test_underline_color_stops_scanning() {
        assert_eq!(decode(&["58", "5", "3"]), vec![]);
        assert_eq!(decode(&["1", "58", "5", "3"]), vec![SgrOp::Bold]);
    }

    #[test]
    fn test_unknown_code_maps_to_unsupported() {
        assert_eq!(decode(&["99"]), vec![SgrOp::Unsupported(99)]);
    }

    #[test]
    fn test_non_numeric_field_skipped() {
        assert_eq!(decode(&["x", "1"]), vec![SgrOp::Bold]);
    }
}
