//! Character encoding detection and decoding of HTML bytes
//!
//! Pages arrive as bytes from whatever fetched them. Before parsing they are
//! decoded to UTF-8 using the first charset found in this order:
//!
//! 1. the `charset` parameter of the Content-Type header
//! 2. a `<meta>` tag in the first 1024 bytes, either `<meta charset="...">`
//!    or `<meta http-equiv="Content-Type" content="text/html; charset=...">`
//! 3. UTF-8
//!
//! ```rust
//! use page_text_converter::charset::{decode_html, detect_charset};
//!
//! assert_eq!(detect_charset(Some("text/html; charset=iso-8859-1"), b""), "ISO-8859-1");
//!
//! let text = decode_html(b"<p>Caf\xE9</p>", Some("text/html; charset=ISO-8859-1")).unwrap();
//! assert_eq!(text, "<p>Café</p>");
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::ConversionError;

/// Charset used when neither the header nor the markup declares one
const DEFAULT_CHARSET: &str = "UTF-8";

/// Only the start of the document is scanned for `<meta>` declarations
const META_SCAN_LIMIT: usize = 1024;

/// Detect the charset of an HTML payload
///
/// Always returns a name, upper-cased, falling back to `UTF-8`.
pub fn detect_charset(content_type: Option<&str>, html: &[u8]) -> String {
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(html))
        .map(|label| label.to_uppercase())
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Pull the `charset` parameter out of a Content-Type header value
///
/// ```rust
/// use page_text_converter::charset::charset_from_content_type;
///
/// assert_eq!(charset_from_content_type("text/html;charset=\"utf-8\""), Some("utf-8".to_string()));
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    static PARAM: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = PARAM
        .get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"';,\s]+)"#).ok())
        .as_ref()?;

    regex
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Find a charset declared by a `<meta>` tag near the top of the document
///
/// Both the HTML5 `charset` attribute and the older `http-equiv` form carry
/// a `charset=` token inside the tag, so one pattern covers them.
pub fn charset_from_meta(html: &[u8]) -> Option<String> {
    static META: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = META
        .get_or_init(|| Regex::new(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?([^"'\s;/>]+)"#).ok())
        .as_ref()?;

    let prefix = &html[..html.len().min(META_SCAN_LIMIT)];
    // Lossy is fine here, declarations are ASCII
    let prefix = String::from_utf8_lossy(prefix);

    regex
        .captures(&prefix)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode HTML bytes to a UTF-8 string
///
/// UTF-8 input is borrowed without copying. Anything else goes through
/// `encoding_rs` without replacement characters, so a byte sequence that is
/// invalid for the detected charset is reported instead of silently mangled.
///
/// # Errors
///
/// `ConversionError::DecodeError` when the charset is unknown to
/// `encoding_rs` or the bytes are invalid for it.
pub fn decode_html<'a>(
    html: &'a [u8],
    content_type: Option<&str>,
) -> Result<Cow<'a, str>, ConversionError> {
    if html.is_empty() {
        return Ok(Cow::Borrowed(""));
    }

    let charset = detect_charset(content_type, html);

    // UTF-16 labels on ASCII-compatible markup are treated as UTF-8, as browsers do
    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| ConversionError::DecodeError(format!("Unsupported charset '{}'", charset)))?
        .output_encoding();

    if encoding == encoding_rs::UTF_8 {
        return std::str::from_utf8(html).map(Cow::Borrowed).map_err(|e| {
            ConversionError::DecodeError(format!(
                "Invalid UTF-8 at byte position {}: {}",
                e.valid_up_to(),
                e
            ))
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(html)
        .ok_or_else(|| {
            ConversionError::DecodeError(format!(
                "Invalid byte sequence for charset '{}'",
                charset
            ))
        })
}
