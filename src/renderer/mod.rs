//! Document layer for lite-youtube
//!
//! Handles HTML parsing into an owned DOM tree and serialization back to
//! markup. Link discovery and embed insertion operate on this tree.

mod dom;
pub mod html;

pub use dom::{Document, ElementData, Node, NodePath, NodeType};
pub use html::{HtmlParser, serialize_body, serialize_document, serialize_node};
