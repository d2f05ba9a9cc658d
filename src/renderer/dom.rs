//! DOM (Document Object Model) implementation
//!
//! An owned tree addressed by index paths. Paths are only valid until the
//! next structural mutation of an ancestor's child list, so callers collect
//! paths first and mutate afterwards.

use markup5ever::{Namespace, ns};

/// Index path from the document root to a node
pub type NodePath = Vec<usize>;

/// Node types in the DOM
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// Document root
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// Element node (e.g., <div>)
    Element(ElementData),
    /// Text node
    Text(String),
    /// Comment node
    Comment(String),
}

/// Data for element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g., "div", "span")
    pub tag_name: String,
    /// Element namespace; HTML unless parsed inside `<svg>` or `<math>`
    pub namespace: Namespace,
    /// Element attributes in source order, keyed by their qualified name
    /// (`xlink:href` for prefixed foreign attributes)
    pub attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create a new element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            namespace: ns!(html),
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether an attribute is present, whatever its value
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute value, keeping its position if already present
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(pos).1)
    }

    /// Get class names
    pub fn classes(&self) -> Vec<&str> {
        self.get_attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check for a single class name
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add a class name if missing
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute("class", value);
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }
}

/// A node in the DOM tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node type and data
    pub node_type: NodeType,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new node
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
        }
    }

    /// Create an element node
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::new(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeType::Text(content.into()))
    }

    /// Builder-style attribute setter for element nodes
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Some(elem) = self.as_element_mut() {
            elem.set_attribute(name, value);
        }
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self.node_type, NodeType::Element(_))
    }

    /// Get element data if this is an element
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable element data if this is an element
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// True for an element with the given tag name
    pub fn is_tag(&self, tag_name: &str) -> bool {
        self.as_element().is_some_and(|e| e.is(tag_name))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.node_type {
            NodeType::Text(text) => out.push_str(text),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Approximation of rendered text: descendant text with whitespace
    /// runs collapsed and the ends trimmed
    pub fn visible_text(&self) -> String {
        self.text_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Index of the first direct child matching a predicate
    pub fn position_child(&self, pred: impl Fn(&Node) -> bool) -> Option<usize> {
        self.children.iter().position(pred)
    }

    /// Whether any descendant (not self) matches a predicate
    pub fn contains_descendant(&self, pred: &impl Fn(&Node) -> bool) -> bool {
        self.find_descendant(pred).is_some()
    }

    /// First descendant (not self) matching a predicate, depth-first
    pub fn find_descendant(&self, pred: &impl Fn(&Node) -> bool) -> Option<&Node> {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Node::find_descendant`]
    pub fn find_descendant_mut(&mut self, pred: &impl Fn(&Node) -> bool) -> Option<&mut Node> {
        for child in self.children.iter_mut() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Remove every descendant matching a predicate; returns how many
    /// subtrees were dropped
    pub fn remove_descendants(&mut self, pred: &impl Fn(&Node) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !pred(child));
        let mut removed = before - self.children.len();
        for child in self.children.iter_mut() {
            removed += child.remove_descendants(pred);
        }
        removed
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.children = vec![Node::text(text)];
    }
}

/// The DOM document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root node
    pub root: Node,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeType::Document),
        }
    }

    /// Resolve a path to a node
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let mut current = &self.root;
        for &idx in path {
            current = current.children.get(idx)?;
        }
        Some(current)
    }

    /// Resolve a path to a mutable node
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for &idx in path {
            current = current.children.get_mut(idx)?;
        }
        Some(current)
    }

    /// Paths of every element matching a predicate, in document order
    pub fn find_all(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodePath> {
        let mut results = Vec::new();
        Self::walk(&self.root, &mut Vec::new(), &pred, &mut results);
        results
    }

    /// Path of the first element matching a predicate
    pub fn find_first(&self, pred: impl Fn(&Node) -> bool) -> Option<NodePath> {
        self.find_all(pred).into_iter().next()
    }

    /// Elements carrying any of the given classes, each listed once, in
    /// document order
    pub fn elements_with_any_class(&self, classes: &[&str]) -> Vec<NodePath> {
        self.find_all(|node| {
            node.as_element()
                .is_some_and(|e| classes.iter().any(|c| e.has_class(c)))
        })
    }

    /// Descendant elements (excluding the node itself) with a tag name,
    /// in document order
    pub fn descendants_by_tag(&self, path: &[usize], tag_name: &str) -> Vec<NodePath> {
        let Some(start) = self.node(path) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        let mut current = path.to_vec();
        for (i, child) in start.children.iter().enumerate() {
            current.push(i);
            Self::walk(child, &mut current, &|n: &Node| n.is_tag(tag_name), &mut results);
            current.pop();
        }
        results
    }

    /// Nearest inclusive ancestor with a tag name, like `Element.closest`
    pub fn closest(&self, path: &[usize], tag_name: &str) -> Option<NodePath> {
        (0..=path.len())
            .rev()
            .map(|len| &path[..len])
            .find(|p| self.node(p).is_some_and(|n| n.is_tag(tag_name)))
            .map(|p| p.to_vec())
    }

    /// Insert a node as the immediately following sibling of `path`.
    /// Returns the path of the inserted node.
    pub fn insert_after(&mut self, path: &[usize], node: Node) -> Option<NodePath> {
        let (&idx, parent_path) = path.split_last()?;
        let parent = self.node_mut(parent_path)?;
        if idx >= parent.children.len() {
            return None;
        }
        parent.children.insert(idx + 1, node);
        let mut inserted = parent_path.to_vec();
        inserted.push(idx + 1);
        Some(inserted)
    }

    /// Append a child to the node at `path`
    pub fn append_child(&mut self, path: &[usize], node: Node) -> Option<NodePath> {
        let parent = self.node_mut(path)?;
        parent.children.push(node);
        let mut inserted = path.to_vec();
        inserted.push(parent.children.len() - 1);
        Some(inserted)
    }

    /// The `<head>` element, if the document has one
    pub fn head(&self) -> Option<NodePath> {
        self.find_first(|n| n.is_tag("head"))
    }

    /// The `<body>` element, if the document has one
    pub fn body(&self) -> Option<NodePath> {
        self.find_first(|n| n.is_tag("body"))
    }

    fn walk(
        node: &Node,
        path: &mut NodePath,
        pred: &impl Fn(&Node) -> bool,
        results: &mut Vec<NodePath>,
    ) {
        if node.is_element() && pred(node) {
            results.push(path.clone());
        }
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            Self::walk(child, path, pred, results);
            path.pop();
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
