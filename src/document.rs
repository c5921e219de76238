//! Owned document tree
//!
//! The html5ever `RcDom` is built around shared, interior-mutable handles.
//! Conversion only needs to read the tree, so it is copied once into a plain
//! owned tree of [`Node`]s. Pruning produces a new tree instead of mutating
//! the existing one.

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A tag with its children, name lowercased
    Element { name: String, children: Vec<Node> },
    /// Character data
    Text(String),
}

impl Node {
    /// Create an element node
    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.into(),
            children,
        }
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Tag name for elements, `None` for text
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            Node::Text(_) => None,
        }
    }

    /// Children of an element, empty for text
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated character data of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(content),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element with the given name
    pub fn find_element(&self, element_name: &str) -> Option<&Node> {
        match self {
            Node::Element { name, children } => {
                if name == element_name {
                    return Some(self);
                }
                children
                    .iter()
                    .find_map(|child| child.find_element(element_name))
            }
            Node::Text(_) => None,
        }
    }

    /// Copy of this node without any subtree rooted at a pruned element
    ///
    /// Returns `None` when the node itself is pruned.
    fn pruned(&self, pruned: &[String]) -> Option<Node> {
        match self {
            Node::Element { name, children } => {
                if pruned.iter().any(|p| p.eq_ignore_ascii_case(name)) {
                    return None;
                }
                Some(Node::Element {
                    name: name.clone(),
                    children: children.iter().filter_map(|c| c.pruned(pruned)).collect(),
                })
            }
            Node::Text(content) => Some(Node::Text(content.clone())),
        }
    }
}

/// A parsed document: the top-level nodes in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text of the first `title` element, trimmed, or empty
    pub fn title(&self) -> String {
        self.nodes
            .iter()
            .find_map(|node| node.find_element("title"))
            .map(|title| title.text_content().trim().to_string())
            .unwrap_or_default()
    }

    /// New document with every subtree rooted at one of `element_names` removed
    ///
    /// Names are compared ignoring ASCII case.
    pub fn pruned(&self, element_names: &[String]) -> Document {
        Document {
            nodes: self
                .nodes
                .iter()
                .filter_map(|node| node.pruned(element_names))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(vec![Node::element(
            "html",
            vec![
                Node::element(
                    "head",
                    vec![
                        Node::element("title", vec![Node::text("  First ")]),
                        Node::element("style", vec![Node::text("p { color: red }")]),
                    ],
                ),
                Node::element(
                    "body",
                    vec![
                        Node::element("script", vec![Node::text("evil()")]),
                        Node::element("p", vec![Node::text("Hello")]),
                        Node::element("title", vec![Node::text("Second")]),
                    ],
                ),
            ],
        )])
    }

    fn names() -> Vec<String> {
        ["script", "style", "head"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_is_first_in_document_order() {
        assert_eq!(sample().title(), "First");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let doc = Document::new(vec![Node::element("p", vec![Node::text("x")])]);
        assert_eq!(doc.title(), "");
        assert_eq!(Document::default().title(), "");
    }

    #[test]
    fn test_prune_removes_whole_subtrees() {
        let pruned = sample().pruned(&names());
        let text = pruned.nodes()[0].text_content();

        assert_eq!(text, "HelloSecond");
        assert!(pruned.nodes()[0].find_element("head").is_none());
        assert!(pruned.nodes()[0].find_element("script").is_none());
    }

    #[test]
    fn test_prune_leaves_original_untouched() {
        let doc = sample();
        let _ = doc.pruned(&names());
        assert!(doc.nodes()[0].find_element("script").is_some());
    }

    #[test]
    fn test_prune_top_level_node() {
        let doc = Document::new(vec![
            Node::element("style", vec![Node::text("x")]),
            Node::text("kept"),
        ]);
        assert_eq!(doc.pruned(&names()).nodes(), &[Node::text("kept")]);
    }

    #[test]
    fn test_prune_names_ignore_case() {
        let upper = vec!["SCRIPT".to_string(), "Head".to_string()];
        let pruned = sample().pruned(&upper);
        assert!(pruned.nodes()[0].find_element("script").is_none());
        assert!(pruned.nodes()[0].find_element("head").is_none());
        assert_eq!(pruned.nodes()[0].text_content(), "HelloSecond");
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::element("p", vec![Node::text("a")]);
        assert_eq!(node.name(), Some("p"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(Node::text("a").name(), None);
        assert!(Node::text("a").children().is_empty());
    }
}
