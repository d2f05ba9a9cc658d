//! Page-wide preconnect hints
//!
//! Hovering or focusing any embed warms connections to the origins the
//! player will need. Hints are a page-global resource, so the set of origins
//! already warmed lives in one registry per page session rather than in each
//! element. The registry is passed in explicitly so tests can start from an
//! empty one.

use crate::renderer::{Document, Node};
use std::collections::HashSet;

/// Origins contacted by the player once it loads
pub const WARM_ORIGINS: [(&str, Option<&str>); 5] = [
    ("https://www.youtube.com", None),
    ("https://www.youtube-nocookie.com", None),
    ("https://www.google.com", None),
    ("https://i.ytimg.com", Some("image")),
    ("https://s.ytimg.com", None),
];

/// A `<link rel="preconnect">` hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreconnectHint {
    /// Origin to connect to
    pub href: String,
    /// Optional `as` destination
    pub as_type: Option<String>,
}

impl PreconnectHint {
    /// Render the hint as a `<link>` element
    pub fn to_node(&self) -> Node {
        let node = Node::element("link")
            .with_attribute("rel", "preconnect")
            .with_attribute("href", self.href.clone());
        match &self.as_type {
            Some(as_type) => node.with_attribute("as", as_type.clone()),
            None => node,
        }
    }
}

/// Origins already preconnected during this page session
#[derive(Debug, Default)]
pub struct PreconnectRegistry {
    warmed: HashSet<String>,
    /// Hints emitted but not yet written into a document
    pending: Vec<PreconnectHint>,
}

impl PreconnectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hint for `href` unless one was already issued.
    /// Returns the new hint, if any.
    pub fn add(&mut self, href: &str, as_type: Option<&str>) -> Option<PreconnectHint> {
        if !self.warmed.insert(href.to_string()) {
            return None;
        }
        let hint = PreconnectHint {
            href: href.to_string(),
            as_type: as_type.map(str::to_string),
        };
        self.pending.push(hint.clone());
        Some(hint)
    }

    /// Warm every player origin. Only origins not seen before produce hints.
    pub fn warm(&mut self) -> Vec<PreconnectHint> {
        let hints: Vec<PreconnectHint> = WARM_ORIGINS
            .iter()
            .filter_map(|(href, as_type)| self.add(href, *as_type))
            .collect();
        if !hints.is_empty() {
            log::debug!("Preconnecting to {} origin(s)", hints.len());
        }
        hints
    }

    /// Whether an origin was already warmed
    pub fn contains(&self, href: &str) -> bool {
        self.warmed.contains(href)
    }

    /// Number of warmed origins
    pub fn len(&self) -> usize {
        self.warmed.len()
    }

    /// True when nothing was warmed yet
    pub fn is_empty(&self) -> bool {
        self.warmed.is_empty()
    }

    /// Forget everything; called when the page session ends
    pub fn clear(&mut self) {
        self.warmed.clear();
        self.pending.clear();
    }

    /// Append pending hints to the document `<head>`. Returns how many
    /// `<link>` elements were written; hints stay pending when the document
    /// has no head.
    pub fn apply_to_document(&mut self, document: &mut Document) -> usize {
        let Some(head) = document.head() else {
            return 0;
        };
        let hints = std::mem::take(&mut self.pending);
        for hint in &hints {
            document.append_child(&head, hint.to_node());
        }
        hints.len()
    }
}
