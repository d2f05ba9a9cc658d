//! Rewriter configuration

use crate::utils::{LiteError, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Class marking post bodies on detail pages
pub const DEFAULT_POST_CLASS: &str = "post-content";

/// Class marking post excerpts on feed and home pages
pub const EXCERPT_CLASS: &str = "e-content";

/// Safety limit on embeds created by one rewrite pass
pub const MAX_VIDEOS_PER_PAGE: usize = 100;

/// Configuration for [`super::LinkRewriter`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RewriterConfig {
    /// Class name of primary post containers
    pub post_class: String,
    #[serde(skip)]
    excerpt_class: String,
    /// Maximum embeds per rewrite pass
    pub max_videos: usize,
    /// Document URL used to resolve relative links
    pub base_url: Option<String>,
    /// Render poster and play button into the emitted markup
    pub prerender: bool,
    /// Point players at the privacy-enhanced domain
    pub nocookie: bool,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            post_class: DEFAULT_POST_CLASS.to_string(),
            excerpt_class: EXCERPT_CLASS.to_string(),
            max_videos: MAX_VIDEOS_PER_PAGE,
            base_url: None,
            prerender: true,
            nocookie: false,
        }
    }
}

impl RewriterConfig {
    /// Configuration for a given post container class
    pub fn new(post_class: impl Into<String>) -> Self {
        Self {
            post_class: post_class.into(),
            ..Default::default()
        }
    }

    /// Class name of excerpt containers, always [`EXCERPT_CLASS`]
    pub fn excerpt_class(&self) -> &str {
        &self.excerpt_class
    }

    /// Set the per-pass embed limit
    pub fn with_max_videos(mut self, max_videos: usize) -> Self {
        self.max_videos = max_videos;
        self
    }

    /// Set the base URL for relative links
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Toggle prerendering of the poster and play button
    pub fn with_prerender(mut self, prerender: bool) -> Self {
        self.prerender = prerender;
        self
    }

    /// Toggle the privacy-enhanced domain
    pub fn with_nocookie(mut self, nocookie: bool) -> Self {
        self.nocookie = nocookie;
        self
    }

    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check values that would make every rewrite a no-op or fail
    pub fn validate(&self) -> Result<()> {
        let class = self.post_class.trim();
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(LiteError::Config(format!(
                "post_class must be a single class name, got {:?}",
                self.post_class
            )));
        }
        if self.max_videos == 0 {
            return Err(LiteError::Config("max_videos must be at least 1".into()));
        }
        self.parsed_base_url()?;
        Ok(())
    }

    /// The base URL, parsed
    pub fn parsed_base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(LiteError::from)
    }
}
