//! Position keys for de-duplicating links
//!
//! Anchors have no stable identity of their own, so a rewrite pass keys
//! them by where they sit in the tree. The key is only meaningful within
//! one document; it is never persisted.

use crate::embed::TAG_NAME;
use crate::renderer::{Document, Node};

/// Produces a deterministic key for a node position
#[cfg_attr(test, mockall::automock)]
pub trait LinkKeyer {
    /// Key for the node at `path`
    fn key(&self, document: &Document, path: &[usize]) -> String;
}

/// `tag[index]` segments from below `<body>` down to the node, joined by
/// `>`. The index counts preceding element siblings, ignoring
/// `<lite-youtube>` elements so keys survive the insertion of embeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralKey;

impl LinkKeyer for StructuralKey {
    fn key(&self, document: &Document, path: &[usize]) -> String {
        let mut segments = Vec::new();
        let mut parent = &document.root;
        for &idx in path {
            let Some(node) = parent.children.get(idx) else {
                break;
            };
            if let Some(elem) = node.as_element() {
                if elem.is("body") {
                    segments.clear();
                } else {
                    let index = parent.children[..idx]
                        .iter()
                        .filter(|sibling| counts_as_sibling(sibling))
                        .count();
                    segments.push(format!("{}[{}]", elem.tag_name.to_ascii_lowercase(), index));
                }
            }
            parent = node;
        }
        segments.join(">")
    }
}

fn counts_as_sibling(node: &Node) -> bool {
    node.is_element() && !node.is_tag(TAG_NAME)
}
