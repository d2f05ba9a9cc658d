//! # Lite YouTube - click-to-load YouTube embeds
//!
//! Rewrites YouTube links found in blog post HTML into lightweight
//! `<lite-youtube>` elements that show a poster and only load the player
//! iframe when clicked.
//!
//! ## Architecture
//!
//! - **embed**: link resolution, the embed element state machine and
//!   page-wide preconnect hints
//! - **rewriter**: finds candidate links inside post containers and inserts
//!   embeds after their paragraphs
//! - **engine**: page session running the rewrite once the element is ready
//! - **renderer**: HTML parsing, the owned DOM tree and serialization
//! - **utils**: shared error types

pub mod embed;
pub mod engine;
pub mod renderer;
pub mod rewriter;
pub mod utils;

// Re-export main types for convenience
pub use embed::{LiteYouTube, ParsedVideoReference, VideoId, resolve};
pub use engine::PageSession;
pub use rewriter::{LinkRewriter, RewriteReport, RewriterConfig};
pub use utils::error::{LiteError, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "lite-youtube";
