//! YouTube embed support
//!
//! - **resolver**: recognise YouTube links and pull out the video id and
//!   start offset
//! - **element**: the click-to-load `<lite-youtube>` element
//! - **preconnect**: page-wide connection warming shared by all elements

pub mod element;
pub mod preconnect;
pub mod resolver;

pub use element::{
    Activation, DEFAULT_PLAY_LABEL, EmbedEvent, Lifecycle, LiteYouTube, OBSERVED_ATTRIBUTES,
    TAG_NAME, Trigger,
};
pub use preconnect::{PreconnectHint, PreconnectRegistry, WARM_ORIGINS};
pub use resolver::{
    ParsedVideoReference, VideoId, extract_start_time_seconds, extract_video_id, is_youtube_host,
    parse_start_time_value, resolve,
};
