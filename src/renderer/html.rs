//! HTML5 parsing and serialization using html5ever
//!
//! Parsing goes through `markup5ever_rcdom` and is then copied into the
//! owned [`Document`] tree; serialization drives html5ever's own
//! `HtmlSerializer` so escaping and void elements follow the HTML standard.

use super::dom::{Document, ElementData, Node, NodeType};
use crate::utils::{LiteError, Result};
use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever::{LocalName, Namespace, Prefix, QualName, ns};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io;

/// HTML5 parser using html5ever
pub struct HtmlParser {
    opts: ParseOpts,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self {
            opts: ParseOpts {
                tree_builder: TreeBuilderOpts {
                    drop_doctype: false,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Parse HTML content into a DOM document
    pub fn parse(&self, content: &str) -> Result<Document> {
        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        let dom = parse_document(RcDom::default(), self.opts.clone())
            .from_utf8()
            .read_from(&mut content.as_bytes())
            .map_err(|e| LiteError::HtmlParse(e.to_string()))?;

        let mut document = Document::new();
        for child in dom.document.children.borrow().iter() {
            if let Some(node) = convert_node(child) {
                document.root.add_child(node);
            }
        }
        Ok(document)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_node(handle: &Handle) -> Option<Node> {
    let mut node = match &handle.data {
        NodeData::Document | NodeData::ProcessingInstruction { .. } => return None,
        NodeData::Doctype { name, .. } => Node::new(NodeType::Doctype(name.to_string())),
        NodeData::Text { contents } => Node::text(contents.borrow().to_string()),
        NodeData::Comment { contents } => Node::new(NodeType::Comment(contents.to_string())),
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let mut elem = ElementData::new(name.local.to_string());
            elem.namespace = name.ns.clone();
            for attr in attrs.borrow().iter() {
                let qualified = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                    None => attr.name.local.to_string(),
                };
                elem.set_attribute(qualified, attr.value.to_string());
            }
            let mut node = Node::new(NodeType::Element(elem));
            // <template> keeps its markup in a separate fragment
            if let Some(contents) = template_contents.borrow().as_ref() {
                node.children
                    .extend(contents.children.borrow().iter().filter_map(convert_node));
            }
            node
        }
    };
    node.children
        .extend(handle.children.borrow().iter().filter_map(convert_node));
    Some(node)
}

fn element_name(elem: &ElementData) -> QualName {
    QualName::new(None, elem.namespace.clone(), LocalName::from(elem.tag_name.as_str()))
}

/// Recover the namespace of a prefixed attribute. These are the only
/// prefixes the tree builder assigns to foreign attributes.
fn attribute_name(name: &str) -> QualName {
    let foreign = name.split_once(':').and_then(|(prefix, local)| {
        let namespace: Namespace = match prefix {
            "xlink" => ns!(xlink),
            "xml" => ns!(xml),
            "xmlns" => ns!(xmlns),
            _ => return None,
        };
        Some(QualName::new(
            Some(Prefix::from(prefix)),
            namespace,
            LocalName::from(local),
        ))
    });
    foreign.unwrap_or_else(|| QualName::new(None, ns!(), LocalName::from(name)))
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let include_node = matches!(traversal_scope, TraversalScope::IncludeNode);
        match &self.node_type {
            NodeType::Element(elem) => {
                let name = element_name(elem);
                if include_node {
                    let names: Vec<QualName> =
                        elem.attributes.iter().map(|(k, _)| attribute_name(k)).collect();
                    let attrs = names
                        .iter()
                        .zip(elem.attributes.iter())
                        .map(|(qn, (_, value))| (qn, value.as_str()));
                    serializer.start_elem(name.clone(), attrs)?;
                }
                for child in &self.children {
                    child.serialize(serializer, TraversalScope::IncludeNode)?;
                }
                if include_node {
                    serializer.end_elem(name)?;
                }
                Ok(())
            }
            NodeType::Document => {
                for child in &self.children {
                    child.serialize(serializer, TraversalScope::IncludeNode)?;
                }
                Ok(())
            }
            NodeType::Doctype(name) if include_node => serializer.write_doctype(name),
            NodeType::Text(text) if include_node => serializer.write_text(text),
            NodeType::Comment(text) if include_node => serializer.write_comment(text),
            _ => Ok(()),
        }
    }
}

/// Serialize a whole document back to HTML
pub fn serialize_document(document: &Document) -> Result<String> {
    serialize_with_scope(&document.root, TraversalScope::ChildrenOnly(None))
}

/// Serialize a node including its own tag
pub fn serialize_node(node: &Node) -> Result<String> {
    serialize_with_scope(node, TraversalScope::IncludeNode)
}

/// Serialize only the children of `<body>`; useful when the input was a
/// post-body fragment rather than a full page
pub fn serialize_body(document: &Document) -> Result<String> {
    match document.body().and_then(|path| document.node(&path)) {
        Some(body) => serialize_with_scope(body, TraversalScope::ChildrenOnly(None)),
        None => serialize_document(document),
    }
}

fn serialize_with_scope(node: &Node, traversal_scope: TraversalScope) -> Result<String> {
    let mut bytes = Vec::new();
    html5ever::serialize::serialize(
        &mut bytes,
        node,
        SerializeOpts {
            traversal_scope,
            ..Default::default()
        },
    )?;
    String::from_utf8(bytes).map_err(|e| LiteError::HtmlParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_html() {
        let parser = HtmlParser::new();
        let doc = parser.parse("").unwrap();
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_parse_with_attributes() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(r#"<div id="main" class="container">Content</div>"#)
            .unwrap();
        let path = doc.find_first(|n| n.is_tag("div")).unwrap();
        let div = doc.node(&path).unwrap().as_element().unwrap();
        assert_eq!(div.get_attribute("id"), Some("main"));
        assert!(div.has_class("container"));
    }

    #[test]
    fn test_parse_nested_elements() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(
                r#"
            <html>
                <head><title>Test</title></head>
                <body>
                    <div>
                        <p>Paragraph 1</p>
                        <p>Paragraph 2</p>
                    </div>
                </body>
            </html>
        "#,
            )
            .unwrap();
        assert_eq!(doc.find_all(|n| n.is_tag("p")).len(), 2);
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_parse_malformed_html() {
        // html5ever should handle malformed HTML gracefully
        let parser = HtmlParser::new();
        let doc = parser.parse("<p>Unclosed paragraph<div>Another").unwrap();
        assert!(doc.find_first(|n| n.is_tag("div")).is_some());
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let node = Node::element("p")
            .with_attribute("title", "a \"quoted\" & more")
            .with_child(Node::text("1 < 2"));
        let html = serialize_node(&node).unwrap();
        assert_eq!(html, r#"<p title="a &quot;quoted&quot; &amp; more">1 &lt; 2</p>"#);
    }

    #[test]
    fn test_serialize_body_round_trip() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(r#"<p>Hello <a href="https://example.com/">there</a></p><br>"#)
            .unwrap();
        assert_eq!(
            serialize_body(&doc).unwrap(),
            r#"<p>Hello <a href="https://example.com/">there</a></p><br>"#
        );
    }

    #[test]
    fn test_inline_svg_round_trip() {
        let parser = HtmlParser::new();
        let input = r##"<p><svg viewBox="0 0 10 10"><use xlink:href="#icon"></use></svg></p>"##;
        let doc = parser.parse(input).unwrap();

        let path = doc.find_first(|n| n.is_tag("use")).unwrap();
        let elem = doc.node(&path).unwrap().as_element().unwrap();
        assert_eq!(elem.namespace, ns!(svg));
        assert_eq!(elem.get_attribute("xlink:href"), Some("#icon"));

        assert_eq!(serialize_body(&doc).unwrap(), input);
    }

    #[test]
    fn test_serialize_document_keeps_doctype() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse("<!DOCTYPE html><html><head></head><body></body></html>")
            .unwrap();
        let html = serialize_document(&doc).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
