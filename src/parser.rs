//! Lenient HTML parsing into an owned [`Document`]
//!
//! Parsing is delegated to html5ever, which implements the WHATWG parsing
//! algorithm and therefore never rejects input: unclosed tags are closed,
//! misnested tags are repaired and stray end tags are dropped, exactly as a
//! browser would. The resulting `RcDom` is then copied into the owned
//! [`Document`] tree the converter works on.
//!
//! Comments, doctypes and processing instructions carry no text and are
//! dropped during the copy.
//!
//! # Nesting limit
//!
//! The copy is recursive. Elements nested deeper than the configured limit
//! are not copied structurally; their descendants' text is gathered with an
//! explicit stack and stored as a single text child. Text under elements in
//! the pruned set is skipped while gathering so it cannot leak through the
//! collapsed node.
//!
//! ```rust
//! use page_text_converter::parser::parse_html;
//!
//! let doc = parse_html("<h1>Hello");
//! assert_eq!(doc.nodes()[0].text_content(), "Hello");
//! ```

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::converter::ConversionOptions;
use crate::document::{Document, Node};

/// Parse an HTML string with the default options
pub fn parse_html(html: &str) -> Document {
    parse_html_with_options(html, &ConversionOptions::default())
}

/// Parse an HTML string, honoring the nesting limit of `options`
pub fn parse_html_with_options(html: &str, options: &ConversionOptions) -> Document {
    if html.is_empty() {
        return Document::default();
    }

    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    TreeCopier {
        max_depth: options.max_nesting_depth,
        pruned: &options.pruned_elements,
    }
    .copy(&dom)
}

struct TreeCopier<'a> {
    max_depth: usize,
    pruned: &'a [String],
}

impl TreeCopier<'_> {
    fn copy(&self, dom: &RcDom) -> Document {
        let nodes = dom
            .document
            .children
            .borrow()
            .iter()
            .filter_map(|child| self.copy_node(child, 1))
            .collect();
        Document::new(nodes)
    }

    fn copy_node(&self, handle: &Handle, depth: usize) -> Option<Node> {
        match handle.data {
            NodeData::Element { ref name, .. } => {
                let name = name.local.as_ref().to_ascii_lowercase();

                let children = if depth >= self.max_depth {
                    let text = self.gather_text(handle);
                    if text.is_empty() {
                        Vec::new()
                    } else {
                        vec![Node::Text(text)]
                    }
                } else {
                    handle
                        .children
                        .borrow()
                        .iter()
                        .filter_map(|child| self.copy_node(child, depth + 1))
                        .collect()
                };

                Some(Node::Element { name, children })
            }
            NodeData::Text { ref contents } => Some(Node::Text(contents.borrow().to_string())),
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => None,
        }
    }

    /// Text of all descendants of `handle` in document order, without recursion
    fn gather_text(&self, handle: &Handle) -> String {
        let mut out = String::new();
        let mut stack: Vec<Handle> = handle.children.borrow().iter().rev().cloned().collect();

        while let Some(node) = stack.pop() {
            match node.data {
                NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
                NodeData::Element { ref name, .. } => {
                    let name = name.local.as_ref();
                    if self.pruned.iter().any(|p| p.eq_ignore_ascii_case(name)) {
                        continue;
                    }
                    stack.extend(node.children.borrow().iter().rev().cloned());
                }
                _ => {}
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(doc: &Document) -> &Node {
        doc.nodes()
            .iter()
            .find_map(|n| n.find_element("body"))
            .expect("html5ever always creates a body")
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_html("").is_empty());
    }

    #[test]
    fn test_parse_builds_html_skeleton() {
        let doc = parse_html("<p>Hi</p>");
        let root = &doc.nodes()[0];
        assert_eq!(root.name(), Some("html"));
        assert!(root.find_element("head").is_some());
        assert_eq!(body(&doc).children()[0], Node::element("p", vec![Node::text("Hi")]));
    }

    #[test]
    fn test_parse_drops_comments_and_doctype() {
        let doc = parse_html("<!DOCTYPE html><!-- note --><p>Text<!-- inner --></p>");
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(body(&doc).text_content(), "Text");
    }

    #[test]
    fn test_parse_decodes_character_references() {
        let doc = parse_html("<p>&lt;tag&gt; &amp; &quot;q&quot;</p>");
        assert_eq!(body(&doc).text_content(), "<tag> & \"q\"");
    }

    #[test]
    fn test_parse_unclosed_tags_keep_siblings() {
        let doc = parse_html("<div><p>one<p>two<br>three</div>four");
        assert_eq!(body(&doc).text_content(), "onetwothreefour");
    }

    #[test]
    fn test_parse_misnested_tags() {
        let doc = parse_html("<b><i>text</b></i> after");
        assert_eq!(body(&doc).text_content(), "text after");
    }

    #[test]
    fn test_parse_lowercases_names() {
        let doc = parse_html("<H1>Up</H1><DIV>x</DIV>");
        assert!(body(&doc).find_element("h1").is_some());
        assert!(body(&doc).find_element("div").is_some());
    }

    #[test]
    fn test_parse_title_lands_in_head() {
        let doc = parse_html("<title>Page</title><p>Body</p>");
        assert_eq!(doc.title(), "Page");
    }

    #[test]
    fn test_deep_nesting_is_collapsed_to_text() {
        let options = ConversionOptions {
            max_nesting_depth: 4,
            ..Default::default()
        };
        let html = "<div><div><div><div><div><span>deep</span><script>x()</script> text</div></div></div></div></div>";
        let doc = parse_html_with_options(html, &options);

        let text = doc.nodes()[0].text_content();
        assert!(text.contains("deep text"), "got {text:?}");
        assert!(!text.contains("x()"));
    }

    proptest! {
        #[test]
        fn prop_unclosed_tags_keep_content(
            tag in prop::sample::select(vec!["div", "p", "span", "h1", "h2", "ul", "li", "table", "td"]),
            content in "[a-zA-Z0-9]{1,50}",
        ) {
            let doc = parse_html(&format!("<html><body><{tag}>{content}"));
            prop_assert!(doc.nodes()[0].text_content().contains(&content));
        }

        #[test]
        fn prop_misnested_tags_keep_content(
            outer in prop::sample::select(vec!["b", "i", "strong", "em"]),
            inner in prop::sample::select(vec!["b", "i", "strong", "em"]),
            content in "[a-zA-Z0-9 ]{1,30}",
        ) {
            let html = format!("<{outer}><{inner}>{content}</{outer}></{inner}>");
            let doc = parse_html(&html);
            prop_assert!(doc.nodes()[0].text_content().contains(&content));
        }

        #[test]
        fn prop_deep_nesting_keeps_text(depth in 1usize..40, content in "[a-zA-Z]{1,10}") {
            let options = ConversionOptions { max_nesting_depth: 8, ..Default::default() };
            let html = format!("{}{}{}", "<div>".repeat(depth), content, "</div>".repeat(depth));
            let doc = parse_html_with_options(&html, &options);
            prop_assert_eq!(doc.nodes()[0].text_content(), content);
        }
    }
}
