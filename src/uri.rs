//! URI validation for the page fetch boundary
//!
//! Fetching is left to the caller. Before handing a URI to its HTTP client the
//! caller is expected to reject anything that lacks a scheme or a host;
//! [`validate_uri`] implements that check so every caller applies the same rule.

use url::Url;

use crate::error::ConversionError;

/// Parse `uri` and require both a scheme and a non-empty host
///
/// ```rust
/// use page_text_converter::uri::validate_uri;
///
/// assert!(validate_uri("https://example.com/page").is_ok());
/// assert!(validate_uri("example.com/page").is_err());
/// ```
///
/// # Errors
///
/// `ConversionError::InvalidUri` carrying the rejected input.
pub fn validate_uri(uri: &str) -> Result<Url, ConversionError> {
    let invalid = || ConversionError::InvalidUri(uri.to_string());

    let parsed = Url::parse(uri.trim()).map_err(|_| invalid())?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(invalid()),
    }
}
