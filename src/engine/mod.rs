//! Page session driving the rewrite
//!
//! A session owns everything that is page-global: the link rewriter with
//! its seen set, the preconnect registry shared by all embeds, and the
//! one-shot flag guarding the rewrite pass.
//!
//! The rewrite waits for the embed element to become available, bounded
//! by [`READY_TIMEOUT`]. Whichever of readiness or the timeout comes first
//! runs the pass exactly once.

use crate::embed::{Activation, EmbedEvent, LiteYouTube, PreconnectRegistry, TAG_NAME, Trigger};
use crate::renderer::{Document, Node, NodeType};
use crate::rewriter::{LinkKeyer, LinkRewriter, RewriteReport, RewriterConfig, StructuralKey};
use crate::utils::Result;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How long to wait for the element before rewriting anyway
pub const READY_TIMEOUT: Duration = Duration::from_secs(3);

/// Rewriting and event dispatch for one page
pub struct PageSession<K: LinkKeyer = StructuralKey> {
    rewriter: LinkRewriter<K>,
    preconnect: PreconnectRegistry,
    processed: bool,
    torn_down: bool,
    ready_timeout: Duration,
}

impl PageSession<StructuralKey> {
    /// Create a session with the default position key
    pub fn new(config: RewriterConfig) -> Result<Self> {
        Ok(Self::with_rewriter(LinkRewriter::new(config)?))
    }
}

impl<K: LinkKeyer> PageSession<K> {
    /// Create a session around an existing rewriter
    pub fn with_rewriter(rewriter: LinkRewriter<K>) -> Self {
        Self {
            rewriter,
            preconnect: PreconnectRegistry::new(),
            processed: false,
            torn_down: false,
            ready_timeout: READY_TIMEOUT,
        }
    }

    /// Override the readiness timeout
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Whether the rewrite pass already ran
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// The page-global preconnect registry
    pub fn preconnect(&self) -> &PreconnectRegistry {
        &self.preconnect
    }

    /// Wait for `ready` or the timeout, then run the rewrite pass.
    ///
    /// A readiness error is logged and the pass runs once the timeout
    /// fires. Returns `None` when the pass already ran.
    pub async fn run_when_ready<F, E>(
        &mut self,
        document: &mut Document,
        ready: F,
    ) -> Option<RewriteReport>
    where
        F: Future<Output = std::result::Result<(), E>>,
        E: Display,
    {
        if self.processed {
            return None;
        }

        let timeout = tokio::time::sleep(self.ready_timeout);
        tokio::pin!(timeout);

        tokio::select! {
            result = ready => {
                if let Err(err) = result {
                    log::error!("lite-youtube element failed to load: {}", err);
                    (&mut timeout).await;
                }
            }
            _ = &mut timeout => {
                log::debug!("lite-youtube element not ready after {:?}, rewriting anyway", self.ready_timeout);
            }
        }

        self.run(document)
    }

    /// Run the rewrite pass if it has not run yet
    pub fn run(&mut self, document: &mut Document) -> Option<RewriteReport> {
        if self.processed {
            return None;
        }
        self.processed = true;

        let report = self.rewriter.rewrite(document);
        if self.rewriter.config().prerender {
            self.upgrade_elements(document);
        }
        Some(report)
    }

    /// Initialize every `<lite-youtube>` node in the document. Returns how
    /// many were upgraded.
    pub fn upgrade_elements(&mut self, document: &mut Document) -> usize {
        let paths = document.find_all(|n| n.is_tag(TAG_NAME));
        let mut upgraded = 0;
        for path in paths {
            let Some(slot) = document.node_mut(&path) else {
                continue;
            };
            let node = std::mem::replace(slot, Node::new(NodeType::Document));
            match LiteYouTube::from_node(node) {
                Some(mut element) => {
                    element.initialize();
                    *slot = element.into_node();
                    upgraded += 1;
                }
                None => log::warn!("Node at {:?} is not a {}", path, TAG_NAME),
            }
        }
        upgraded
    }

    /// Deliver a host event to the embed at `path`.
    ///
    /// Hover and focus warm connections; the resulting hints are written
    /// into the document head. Clicks return the activation outcome.
    ///
    /// Elements are rebuilt from their node for each event and keep no
    /// listener state between calls. Event handling for the whole page
    /// stops at [`PageSession::teardown`].
    pub fn dispatch(
        &mut self,
        document: &mut Document,
        path: &[usize],
        trigger: Trigger,
    ) -> Option<Activation> {
        if self.torn_down {
            return None;
        }
        let slot = document.node_mut(path)?;
        if !slot.is_tag(TAG_NAME) {
            return None;
        }
        let node = std::mem::replace(slot, Node::new(NodeType::Document));
        let mut element = LiteYouTube::from_node(node)?;
        element.initialize();

        let mut event = EmbedEvent::new(trigger);
        let outcome = element.handle_event(&mut event, &mut self.preconnect);
        if let Some(slot) = document.node_mut(path) {
            *slot = element.into_node();
        }

        self.preconnect.apply_to_document(document);
        outcome
    }

    /// Stop handling events and drop page-global state
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.preconnect.clear();
    }
}
