//! In-memory tree of a structured project-description file.
//!
//! A [Document] owns every node of one tree in a flat arena; nodes are
//! referred to by [NodeId]. Children can only be created already attached
//! to their parent, so every node except the root has exactly one parent.

use crate::error::Result;
use crate::util::filesystem;
use std::fmt::{Display, Write};
use std::path::Path;

/// The declaration written ahead of the root element.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const INDENT: &str = "  ";

/// Refers to one node of the [Document] that issued it.
///
/// Ids are positions in that document's arena. They are only handed out by
/// [Document::root] and [Document::create_child], and passing one to a
/// different document addresses an unrelated node or panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// children that back a child-element schema field, keyed by field name
    bound: Vec<(&'static str, NodeId)>,
}

impl NodeData {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: parent,
            bound: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Creates a document holding a single root element named `root_tag`.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    /// Appends a new element named `tag` as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(tag, Some(parent)));
        self.node_mut(parent).children.push(id);
        id
    }

    /// Returns the number of nodes in the arena, to pass to [Document::truncate].
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Discards every node created after the arena held `len` nodes and
    /// detaches them from the nodes that remain.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len.max(1));
        for node in &mut self.nodes {
            node.children.retain(|c| c.0 < len);
            node.bound.retain(|(_, c)| c.0 < len);
        }
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns the first child of `id` named `tag`.
    pub fn find_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .find(|c| self.tag(**c) == tag)
            .copied()
    }

    /// Stores `value` under the attribute `name`, or removes the attribute
    /// when `value` is `None`.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: Option<&str>) {
        let attributes = &mut self.node_mut(id).attributes;
        let existing = attributes.iter().position(|(k, _)| k == name);
        match (value, existing) {
            (Some(v), Some(i)) => attributes[i].1 = v.to_string(),
            (Some(v), None) => attributes.push((name.to_string(), v.to_string())),
            (None, Some(i)) => {
                attributes.remove(i);
            }
            (None, None) => (),
        }
    }

    /// Returns the attribute `name`, or an empty string if it is unset.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> &str {
        self.node(id)
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attributes.iter().any(|(k, _)| k == name)
    }

    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.node(id)
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.node_mut(id).text = Some(text.to_string());
    }

    pub(crate) fn bound_child(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.node(id)
            .bound
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, c)| *c)
    }

    pub(crate) fn bind_child(&mut self, id: NodeId, field: &'static str, child: NodeId) {
        self.node_mut(id).bound.push((field, child));
    }

    /// Renders the tree as indented text, one level of indentation per depth.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Writes the serialized tree to `path`, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        filesystem::write_file(path, &self.serialize())
    }

    fn render(&self, id: NodeId, depth: usize, out: &mut String) -> std::fmt::Result {
        let node = self.node(id);
        let pad = INDENT.repeat(depth);
        write!(out, "{}<{}", pad, node.tag)?;
        for (k, v) in &node.attributes {
            write!(out, " {}=\"{}\"", k, escape(v, true))?;
        }
        match (&node.text, node.children.is_empty()) {
            (None, true) => writeln!(out, " />"),
            (Some(text), true) => writeln!(out, ">{}</{}>", escape(text, false), node.tag),
            (text, false) => {
                writeln!(out, ">")?;
                if let Some(text) = text {
                    writeln!(out, "{}{}{}", pad, INDENT, escape(text, false))?;
                }
                for child in &node.children {
                    self.render(*child, depth + 1, out)?;
                }
                writeln!(out, "{}</{}>", pad, node.tag)
            }
        }
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        writeln!(out, "{}", XML_DECLARATION)?;
        self.render(self.root(), 0, &mut out)?;
        write!(f, "{}", out)
    }
}

/// Replaces the characters that cannot appear literally in element text, or
/// in a double-quoted attribute when `attribute` is set.
fn escape(s: &str, attribute: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if attribute == true => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
