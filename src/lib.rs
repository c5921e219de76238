//! Page Text Converter
//!
//! Turns an HTML page into normalized, readable text: headings become
//! Markdown `#` lines, paragraphs and line breaks are kept, scripts, styles
//! and the document head are dropped, and whitespace is canonicalized.
//!
//! # Architecture
//!
//! - `charset`: charset detection and decoding of byte input
//! - `parser`: lenient HTML5 parsing using html5ever
//! - `document`: owned, immutable document tree
//! - `converter`: pruning, block rewriting and flattening to text
//! - `normalize`: whitespace normalization of the flattened text
//! - `entities`: character reference decoding
//! - `uri`: URI validation for callers that fetch pages
//! - `report`: display formatting of a converted page
//!
//! Conversion is pure and synchronous. It fails only when byte input cannot
//! be decoded; malformed markup is always recovered from.
//!
//! ```rust
//! use page_text_converter::TextConverter;
//!
//! let page = TextConverter::new()
//!     .convert("<script>evil()</script><p>Hello</p>")
//!     .unwrap();
//! assert_eq!(page.body, "Hello");
//! assert_eq!(page.title, "");
//! ```

pub mod charset;
pub mod converter;
pub mod document;
pub mod entities;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod uri;

pub use converter::{ConversionOptions, PageText, TextConverter};
pub use error::ConversionError;
pub use parser::parse_html;
pub use report::PageReport;
pub use uri::validate_uri;
