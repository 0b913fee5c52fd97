//! Markup tree types.
//!
//! A [`Node`] is one element of a parsed USSD menu template. The engine
//! never parses markup itself: the enclosing transport layer hands over a
//! ready-made tree, either built with the [`Node`] builder or deserialized
//! from JSON. Trees are immutable once built; handlers only read them.

mod path;

pub use path::NodePath;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::UssdError;
use crate::Result;

/// One element of a menu template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name (e.g. "response", "menu").
    tag: String,
    /// Attribute mapping.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    /// Ordered child elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Create a new node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute (builder style).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child node (builder style).
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append multiple child nodes (builder style).
    pub fn children_from<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(children);
        self
    }

    /// Get the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get a required attribute value.
    ///
    /// Fails with [`UssdError::MissingAttribute`] if the attribute is
    /// absent.
    pub fn require_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| UssdError::MissingAttribute {
                tag: self.tag.clone(),
                attribute: name.to_string(),
            })
    }

    /// Get the attribute mapping.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Get the child elements.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Check whether the node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Resolve a path against this node as the tree root.
    ///
    /// The empty path resolves to the root itself. Returns `None` if any
    /// path segment points past a child list.
    pub fn resolve(&self, path: &NodePath) -> Option<&Node> {
        let mut node = self;
        for &index in path.segments() {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Find the node carrying `id="<id>"`, depth first.
    ///
    /// Returns the path of the first match in document order.
    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        fn walk(node: &Node, id: &str, path: &NodePath) -> Option<NodePath> {
            if node.attribute("id") == Some(id) {
                return Some(path.clone());
            }
            for (index, child) in node.children.iter().enumerate() {
                if let Some(found) = walk(child, id, &path.child(index)) {
                    return Some(found);
                }
            }
            None
        }
        walk(self, id, &NodePath::root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        Node::new("menu")
            .attr("text", "Main menu")
            .child(
                Node::new("option")
                    .attr("text", "Balance")
                    .child(Node::new("response").attr("text", "KES 120").attr("id", "bal")),
            )
            .child(Node::new("option").attr("text", "Exit").attr("goto", "bye"))
    }

    #[test]
    fn test_builder() {
        let node = Node::new("response").attr("text", "Thank you.");
        assert_eq!(node.tag(), "response");
        assert_eq!(node.attribute("text"), Some("Thank you."));
        assert!(!node.has_children());
    }

    #[test]
    fn test_attribute_missing() {
        let node = Node::new("response");
        assert_eq!(node.attribute("text"), None);
    }

    #[test]
    fn test_require_attribute_present() {
        let node = Node::new("response").attr("text", "Thank you.");
        assert_eq!(node.require_attribute("text").unwrap(), "Thank you.");
    }

    #[test]
    fn test_require_attribute_absent() {
        let node = Node::new("response");
        let err = node.require_attribute("text").unwrap_err();
        match err {
            UssdError::MissingAttribute { tag, attribute } => {
                assert_eq!(tag, "response");
                assert_eq!(attribute, "text");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_root() {
        let tree = sample_tree();
        let node = tree.resolve(&NodePath::root()).unwrap();
        assert_eq!(node.tag(), "menu");
    }

    #[test]
    fn test_resolve_nested() {
        let tree = sample_tree();
        let path = NodePath::root().child(0).child(0);
        let node = tree.resolve(&path).unwrap();
        assert_eq!(node.tag(), "response");
        assert_eq!(node.attribute("text"), Some("KES 120"));
    }

    #[test]
    fn test_resolve_out_of_bounds() {
        let tree = sample_tree();
        assert!(tree.resolve(&NodePath::root().child(7)).is_none());
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample_tree();
        let path = tree.find_by_id("bal").unwrap();
        assert_eq!(path, NodePath::root().child(0).child(0));
    }

    #[test]
    fn test_find_by_id_missing() {
        let tree = sample_tree();
        assert!(tree.find_by_id("nope").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_json_defaults() {
        // Attributes and children may be omitted entirely
        let node: Node = serde_json::from_str(r#"{"tag": "response"}"#).unwrap();
        assert_eq!(node.tag(), "response");
        assert!(node.attributes().is_empty());
        assert!(!node.has_children());
    }
}
