//! Control-character constants and diagnostics helpers
//!
//! The name table is static data used only for log output; it never
//! influences parsing decisions.

/// ESC, the escape-sequence introducer
pub const ESC: char = '\x1b';
/// BEL
pub const BEL: char = '\x07';
/// Backspace
pub const BS: char = '\x08';
/// Line feed
pub const NL: char = '\n';
/// Carriage return
pub const CR: char = '\r';

/// Names for the C0 control range plus space
static CONTROL_NAMES: [&str; 33] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "TAB", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US", "SPC",
];

/// Look up the name of a control character (0x00-0x20)
pub fn control_name(ch: char) -> Option<&'static str> {
    CONTROL_NAMES.get(ch as usize).copied()
}

/// Render a raw sequence printably for log output: `\x1b[31m` becomes
/// `\e[31m`, newlines and friends become their escaped forms.
pub fn readable(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            ESC => out.push_str("\\e"),
            NL => out.push_str("\\n"),
            CR => out.push_str("\\r"),
            BS => out.push_str("\\b"),
            BEL => out.push_str("\\a"),
            _ => out.push(ch),
        }
    }
    out
}
