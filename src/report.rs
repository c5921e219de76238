//! Plain-text report of a converted page
//!
//! This is the reply shape handed back to a chat model after a page has been
//! fetched and converted:
//!
//! ```text
//! Contents of URI https://example.com is:
//! Title: Example Domain
//!
//! # Example Domain
//! ...
//! ```
//!
//! The converter never shortens its output. Reports can be capped with
//! [`PageReport::max_chars`], which cuts the body on a character boundary and
//! marks the cut.

use std::fmt;

use crate::converter::PageText;

/// Appended to a body that was cut short
pub const TRUNCATION_MARKER: &str = "\n[...]";

/// A converted page ready for display
#[derive(Debug, Clone)]
pub struct PageReport<'a> {
    uri: &'a str,
    page: &'a PageText,
    max_chars: Option<usize>,
}

impl<'a> PageReport<'a> {
    pub fn new(uri: &'a str, page: &'a PageText) -> Self {
        Self {
            uri,
            page,
            max_chars: None,
        }
    }

    /// Limit the body to `limit` characters
    pub fn max_chars(mut self, limit: usize) -> Self {
        self.max_chars = Some(limit);
        self
    }

    /// Body text after applying the character limit
    pub fn body(&self) -> &'a str {
        let page: &'a PageText = self.page;
        match self.cut() {
            Some(cut) => page.body[..cut].trim_end(),
            None => page.body.as_str(),
        }
    }

    /// Whether the character limit cut the body short
    pub fn truncated(&self) -> bool {
        self.cut().is_some()
    }

    /// Byte offset of the first character past the limit
    fn cut(&self) -> Option<usize> {
        let limit = self.max_chars?;
        self.page.body.char_indices().nth(limit).map(|(cut, _)| cut)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contents of URI {} is:", self.uri)?;
        if !self.page.title.is_empty() {
            writeln!(f, "Title: {}", self.page.title)?;
            writeln!(f)?;
        }

        f.write_str(self.body())?;
        if self.truncated() {
            f.write_str(TRUNCATION_MARKER)?;
        }
        writeln!(f)
    }
}
