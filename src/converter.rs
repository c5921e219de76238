//! Page text converter - turns an HTML document into readable text
//!
//! The output is plain text with just enough Markdown to keep the shape of
//! the page: ATX headings, blank lines around paragraphs and explicit line
//! breaks. Lists, tables, links and emphasis are flattened to their text.
//!
//! # Pipeline
//!
//! 1. **Parse** with html5ever into an owned [`Document`]. Never fails.
//! 2. **Title**: text of the first `<title>` element, or empty.
//! 3. **Prune** `script`, `style` and `head` subtrees (configurable).
//! 4. **Render** depth-first in document order:
//!    - `h1`..`h6` become `## Text` followed by a blank line
//!    - `p` becomes its text on its own line
//!    - `br` becomes a line break
//!    - every other element contributes its children's text
//! 5. **Normalize** whitespace and decode leftover character references,
//!    see [`crate::normalize`].
//!
//! A block element's text is its rendered children, trimmed. Block elements
//! nested inside each other therefore fold into the outer one instead of
//! stacking line breaks.
//!
//! # Example
//!
//! Input HTML:
//! ```html
//! <h2>Title</h2>
//! <p>Line1<br>Line2</p>
//! ```
//!
//! Output:
//! ```text
//! ## Title
//!
//! Line1
//! Line2
//! ```

use crate::charset::decode_html;
use crate::document::{Document, Node};
use crate::error::ConversionError;
use crate::normalize::normalize_text;
use crate::parser::parse_html_with_options;

/// Elements removed before any text is collected
const DEFAULT_PRUNED_ELEMENTS: &[&str] = &["script", "style", "head"];

/// Maximum element depth copied structurally from the parsed DOM
const MAX_NESTING_DEPTH: usize = 512;

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Elements whose whole subtree is dropped
    pub pruned_elements: Vec<String>,
    /// Depth past which subtrees are collapsed to their text
    pub max_nesting_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            pruned_elements: DEFAULT_PRUNED_ELEMENTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// Result of a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct PageText {
    /// Text of the first `<title>` element, empty if there is none
    pub title: String,
    /// Normalized page text
    pub body: String,
}

/// HTML to text converter
///
/// Holds only its options, so one instance can be shared freely between
/// threads; every call owns its own tree and output buffer.
///
/// ```rust
/// use page_text_converter::TextConverter;
///
/// let page = TextConverter::new()
///     .convert("<title>Demo</title><h2>Title</h2><p>Hello <b>world</b></p>")
///     .expect("conversion only fails on undecodable bytes");
///
/// assert_eq!(page.title, "Demo");
/// assert_eq!(page.body, "## Title\n\nHello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    options: ConversionOptions,
}

impl TextConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    ///
    /// Pruned element names are matched case-insensitively.
    pub fn with_options(mut options: ConversionOptions) -> Self {
        for name in &mut options.pruned_elements {
            name.make_ascii_lowercase();
        }
        Self { options }
    }

    /// Options this converter was built with
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an HTML string
    ///
    /// Markup problems are absorbed by the parser, so text input always
    /// converts. The `Result` keeps the signature uniform with
    /// [`convert_bytes`](Self::convert_bytes).
    pub fn convert(&self, html: &str) -> Result<PageText, ConversionError> {
        let document = parse_html_with_options(html, &self.options);
        Ok(self.convert_document(&document))
    }

    /// Convert raw HTML bytes, decoding them first
    ///
    /// The charset comes from `content_type`, then from a `<meta>` tag,
    /// then defaults to UTF-8. See [`crate::charset`].
    ///
    /// # Errors
    ///
    /// `ConversionError::DecodeError` if the bytes are not valid in the
    /// detected charset or the charset is not supported.
    pub fn convert_bytes(
        &self,
        html: &[u8],
        content_type: Option<&str>,
    ) -> Result<PageText, ConversionError> {
        let html = decode_html(html, content_type)?;
        self.convert(&html)
    }

    /// Convert an already parsed document
    pub fn convert_document(&self, document: &Document) -> PageText {
        let title = document.title();
        let pruned = document.pruned(&self.options.pruned_elements);

        let mut output = String::with_capacity(1024);
        for node in pruned.nodes() {
            self.render_node(node, &mut output);
        }

        PageText {
            title,
            body: normalize_text(&output),
        }
    }

    fn render_node(&self, node: &Node, output: &mut String) {
        match node {
            Node::Text(content) => output.push_str(content),
            Node::Element { name, children } => match name.as_str() {
                "h1" => self.handle_heading(children, 1, output),
                "h2" => self.handle_heading(children, 2, output),
                "h3" => self.handle_heading(children, 3, output),
                "h4" => self.handle_heading(children, 4, output),
                "h5" => self.handle_heading(children, 5, output),
                "h6" => self.handle_heading(children, 6, output),
                "p" => self.handle_paragraph(children, output),
                "br" => output.push('\n'),
                _ => self.render_children(children, output),
            },
        }
    }

    fn render_children(&self, children: &[Node], output: &mut String) {
        for child in children {
            self.render_node(child, output);
        }
    }

    /// Rendered text of `children`, trimmed
    fn block_text(&self, children: &[Node]) -> String {
        let mut inner = String::new();
        self.render_children(children, &mut inner);
        inner.trim().to_string()
    }

    /// `<hN>` becomes N `#`, a space, the heading text and a blank line
    fn handle_heading(&self, children: &[Node], level: usize, output: &mut String) {
        let text = self.block_text(children);
        for _ in 0..level {
            output.push('#');
        }
        output.push(' ');
        output.push_str(&text);
        output.push_str("\n\n");
    }

    fn handle_paragraph(&self, children: &[Node], output: &mut String) {
        let text = self.block_text(children);
        output.push('\n');
        output.push_str(&text);
        output.push('\n');
    }
}
