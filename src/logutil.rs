//! Helpers for putting source cell values into single-line log output.
//!
//! Quoted CSV cells (item and survivor descriptions especially) may carry embedded
//! newlines and tabs; these are escaped so each importer notice stays on one line.

use std::fmt::Write;

/// Longest preview written for one value before it is cut with an ellipsis.
pub const DEFAULT_PREVIEW: usize = 120;

/// Escape `s` for single-line logging, truncated at [`DEFAULT_PREVIEW`] characters.
pub fn escape_log(s: &str) -> String {
    escape_log_with_limit(s, DEFAULT_PREVIEW)
}

/// Escape `s` for single-line logging, keeping at most `limit` source characters.
///
/// Newline, carriage return and tab become `\n`, `\r`, `\t`; a backslash is doubled;
/// any other control character is written as `\xNN`.
pub fn escape_log_with_limit(s: &str, limit: usize) -> String {
    let mut out = String::with_capacity(s.len().min(limit) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count == limit {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
