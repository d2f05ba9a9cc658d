//! YouTube link rewriting
//!
//! Scans post containers for anchors pointing at YouTube and inserts a
//! `<lite-youtube>` element after the paragraph holding each one. The
//! original link is left in place.
//!
//! A pass works in two phases: candidates are planned against the
//! unmodified tree in document order, then insertions are applied from the
//! last paragraph backwards so earlier paths stay valid.

mod config;
mod key;

pub use config::{DEFAULT_POST_CLASS, EXCERPT_CLASS, MAX_VIDEOS_PER_PAGE, RewriterConfig};
pub use key::{LinkKeyer, StructuralKey};

#[cfg(test)]
pub use key::MockLinkKeyer;

use crate::embed::{
    DEFAULT_PLAY_LABEL, LiteYouTube, ParsedVideoReference, TAG_NAME, extract_start_time_seconds,
    extract_video_id, is_youtube_host,
};
use crate::renderer::{Document, Node, NodePath, NodeType};
use crate::utils::Result;
use std::collections::HashSet;
use url::Url;

/// Why a candidate anchor was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No `href`, or an empty one
    NoAddress,
    /// Not a YouTube host, or a relative link with no base URL
    ForeignHost,
    /// The address could not be parsed
    MalformedUrl,
    /// YouTube host, but no usable video id
    Unrecognized,
    /// No enclosing `<p>` to anchor the embed to
    NoParagraph,
    /// The same anchor position was already handled
    Duplicate,
    /// The paragraph is already followed by an embed for this video
    AlreadyEmbedded,
    /// The per-pass embed limit was reached
    LimitReached,
}

/// Summary of one rewrite pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteReport {
    /// Videos embedded, in document order
    pub videos: Vec<ParsedVideoReference>,
    /// Skipped anchors with their reason, in document order
    pub skipped: Vec<SkipReason>,
}

impl RewriteReport {
    /// Number of embeds inserted
    pub fn embedded(&self) -> usize {
        self.videos.len()
    }

    /// Number of anchors skipped for a reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|r| **r == reason).count()
    }
}

struct PlannedEmbed {
    paragraph: NodePath,
    node: Node,
}

/// Rewrites YouTube links into lite embeds
pub struct LinkRewriter<K: LinkKeyer = StructuralKey> {
    config: RewriterConfig,
    base_url: Option<Url>,
    keyer: K,
    /// Anchor keys handled by any pass of this rewriter
    seen: HashSet<String>,
}

impl LinkRewriter<StructuralKey> {
    /// Create a rewriter keyed by tree position
    pub fn new(config: RewriterConfig) -> Result<Self> {
        Self::with_keyer(config, StructuralKey)
    }
}

impl<K: LinkKeyer> LinkRewriter<K> {
    /// Create a rewriter with a custom position key
    pub fn with_keyer(config: RewriterConfig, keyer: K) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        Ok(Self {
            config,
            base_url,
            keyer,
            seen: HashSet::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// Forget anchors handled by earlier passes
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    /// Run one rewrite pass over a document
    pub fn rewrite(&mut self, document: &mut Document) -> RewriteReport {
        let classes = [self.config.post_class.as_str(), self.config.excerpt_class()];
        let containers = document.elements_with_any_class(&classes);

        let mut report = RewriteReport::default();
        let mut planned: Vec<PlannedEmbed> = Vec::new();
        let mut limit_warned = false;

        for container in &containers {
            for anchor in document.descendants_by_tag(container, "a") {
                if planned.len() >= self.config.max_videos {
                    if !limit_warned {
                        log::warn!(
                            "Reached maximum video limit ({}), skipping remaining links",
                            self.config.max_videos
                        );
                        limit_warned = true;
                    }
                    report.skipped.push(SkipReason::LimitReached);
                    continue;
                }

                match self.plan(document, &anchor) {
                    Ok((embed, reference)) => {
                        planned.push(embed);
                        report.videos.push(reference);
                    }
                    Err(reason) => report.skipped.push(reason),
                }
            }
        }

        // Reverse order keeps earlier paths valid. Embeds sharing a paragraph
        // end up in link order after it, not newest-first.
        for embed in planned.into_iter().rev() {
            if document.insert_after(&embed.paragraph, embed.node).is_none() {
                log::warn!("Paragraph at {:?} vanished before insertion", embed.paragraph);
            }
        }

        log::info!("Processed {} YouTube video(s)", report.embedded());
        report
    }

    fn plan(
        &mut self,
        document: &Document,
        anchor_path: &[usize],
    ) -> std::result::Result<(PlannedEmbed, ParsedVideoReference), SkipReason> {
        let anchor = document.node(anchor_path).ok_or(SkipReason::NoAddress)?;
        let href = anchor
            .as_element()
            .and_then(|e| e.get_attribute("href"))
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(SkipReason::NoAddress)?;

        let url = self.resolve_href(href)?;

        let video_id = extract_video_id(&url).ok_or(SkipReason::Unrecognized)?;

        let Some(paragraph) = document.closest(anchor_path, "p") else {
            log::warn!("No paragraph found for link {}", href);
            return Err(SkipReason::NoParagraph);
        };

        if !self.seen.insert(self.keyer.key(document, anchor_path)) {
            return Err(SkipReason::Duplicate);
        }

        if already_embedded(document, &paragraph, video_id.as_str()) {
            log::debug!("Paragraph already carries an embed for {}", video_id);
            return Err(SkipReason::AlreadyEmbedded);
        }

        let start_time_seconds = extract_start_time_seconds(&url);

        let mut element = LiteYouTube::new();
        element.set_video_id(video_id.as_str());
        let label = anchor.visible_text();
        element.set_play_label(if label.is_empty() { DEFAULT_PLAY_LABEL } else { label.as_str() });
        if let Some(seconds) = start_time_seconds {
            element.set_param("start", &seconds.to_string());
        }
        if self.config.nocookie {
            element.set_nocookie(true);
        }
        if self.config.prerender {
            element.initialize();
        }

        Ok((
            PlannedEmbed {
                paragraph,
                node: element.into_node(),
            },
            ParsedVideoReference {
                video_id,
                start_time_seconds,
            },
        ))
    }

    fn resolve_href(&self, href: &str) -> std::result::Result<Url, SkipReason> {
        let parsed = match &self.base_url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        let url = match parsed {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => return Err(SkipReason::ForeignHost),
            Err(err) => {
                log::warn!("Skipping invalid URL {}: {}", href, err);
                return Err(SkipReason::MalformedUrl);
            }
        };
        if !url.host_str().is_some_and(is_youtube_host) {
            return Err(SkipReason::ForeignHost);
        }
        Ok(url)
    }
}

/// Whether the run of embeds directly after `paragraph` already holds one
/// for `video_id`
fn already_embedded(document: &Document, paragraph: &[usize], video_id: &str) -> bool {
    let Some((&idx, parent_path)) = paragraph.split_last() else {
        return false;
    };
    let Some(parent) = document.node(parent_path) else {
        return false;
    };
    parent
        .children
        .iter()
        .skip(idx + 1)
        .filter(|n| !matches!(&n.node_type, NodeType::Text(t) if t.trim().is_empty()))
        .take_while(|n| n.is_tag(TAG_NAME))
        .any(|n| {
            n.as_element()
                .and_then(|e| e.get_attribute("videoid"))
                .is_some_and(|id| id == video_id)
        })
}
