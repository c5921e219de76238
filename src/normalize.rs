//! Whitespace normalization of flattened page text
//!
//! Applied once to the whole flattened string, after CRLF and lone CR line
//! endings have been turned into LF:
//!
//! 1. a line break, any whitespace, then another line break becomes exactly
//!    one blank line (`\n\n`)
//! 2. runs of two or more spaces or tabs become one space
//! 3. character references are decoded
//! 4. the result is trimmed
//!
//! ```rust
//! use page_text_converter::normalize::normalize_text;
//!
//! assert_eq!(normalize_text("  a\n\n\n\nb     c  "), "a\n\nb c");
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::entities::decode_entities;

fn blank_lines() -> Option<&'static Regex> {
    static BLANK_LINES: OnceLock<Option<Regex>> = OnceLock::new();
    BLANK_LINES
        .get_or_init(|| Regex::new(r"\n\s*\n").ok())
        .as_ref()
}

fn horizontal_runs() -> Option<&'static Regex> {
    static HORIZONTAL_RUNS: OnceLock<Option<Regex>> = OnceLock::new();
    HORIZONTAL_RUNS
        .get_or_init(|| Regex::new(r"[ \t]{2,}").ok())
        .as_ref()
}

/// Normalize flattened text for display
///
/// Repeated application is stable for text without `&`. References are
/// decoded one level per call and after whitespace has been collapsed, so
/// double-escaped input keeps changing: `&amp;lt;` gives `&lt;` and a second
/// pass gives `<`. A reference that decodes to whitespace, such as `&#10;`,
/// is likewise not collapsed until the next pass.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = match blank_lines() {
        Some(regex) => regex.replace_all(&text, "\n\n"),
        None => text.as_str().into(),
    };
    let text = match horizontal_runs() {
        Some(regex) => regex.replace_all(&text, " ").into_owned(),
        None => text.into_owned(),
    };

    decode_entities(&text).trim().to_string()
}
