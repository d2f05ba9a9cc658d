//! The `<lite-youtube>` element
//!
//! A poster image with a play button that only turns into a real player
//! iframe when clicked. Hover and focus merely warm the network connections
//! the player will need.
//!
//! The element is an explicit state object driven from outside: the host
//! calls [`LiteYouTube::initialize`] when the node is attached,
//! [`LiteYouTube::on_attribute_change`] when an attribute changes,
//! [`LiteYouTube::handle_event`] for pointer/focus/click, and
//! [`LiteYouTube::teardown`] when the node is detached.
//!
//! ```text
//! Uninitialized --initialize--> Poster --click--> Activated
//! ```

use super::preconnect::{PreconnectHint, PreconnectRegistry};
use crate::renderer::{ElementData, Node};
use url::{Url, form_urlencoded};

/// Custom element tag name
pub const TAG_NAME: &str = "lite-youtube";

/// Label used when none is configured
pub const DEFAULT_PLAY_LABEL: &str = "Play Video";

/// Attributes the element reacts to
pub const OBSERVED_ATTRIBUTES: [&str; 6] = [
    "videoid",
    "playlistid",
    "params",
    "poster",
    "playlabel",
    "nocookie",
];

const YOUTUBE_ORIGIN: &str = "https://www.youtube.com";
const NOCOOKIE_ORIGIN: &str = "https://www.youtube-nocookie.com";
const POSTER_BASE: &str = "https://i.ytimg.com/vi/";
const POSTER_FILE: &str = "hqdefault.jpg";

const PLAY_BUTTON_CLASS: &str = "lty-playbtn";
const HIDDEN_LABEL_CLASS: &str = "lty-visually-hidden";
const ACTIVATED_CLASS: &str = "lty-activated";

const IFRAME_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Lifecycle of one element instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, nothing rendered yet
    Uninitialized,
    /// Poster and play button rendered
    Poster,
    /// Clicked; terminal
    Activated,
}

/// What the host observed on the element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pointer moved over the element
    PointerOver,
    /// The element or a descendant received focus
    Focus,
    /// The element was clicked
    Click,
}

/// An event dispatched to the element
#[derive(Debug, Clone)]
pub struct EmbedEvent {
    trigger: Trigger,
    default_prevented: bool,
}

impl EmbedEvent {
    /// Create an event for a trigger
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            default_prevented: false,
        }
    }

    /// The trigger that produced this event
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Suppress the host's default action (e.g. following a link)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default action
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Outcome of a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A player iframe was inserted
    Inserted {
        /// The iframe source
        src: String,
    },
    /// The element had already been activated; nothing happened
    AlreadyActivated,
    /// Neither a video nor a playlist id was set. The element still counts
    /// as activated so later clicks do nothing.
    Failed,
}

/// A lazily loaded YouTube player element
#[derive(Debug, Clone, PartialEq)]
pub struct LiteYouTube {
    node: Node,
    lifecycle: Lifecycle,
    listening: bool,
}

impl LiteYouTube {
    /// Create a detached, uninitialized element
    pub fn new() -> Self {
        Self {
            node: Node::element(TAG_NAME),
            lifecycle: Lifecycle::Uninitialized,
            listening: false,
        }
    }

    /// Upgrade an existing `<lite-youtube>` node.
    ///
    /// A node that already carries the activated class stays activated.
    pub fn from_node(node: Node) -> Option<Self> {
        if !node.is_tag(TAG_NAME) {
            return None;
        }
        let activated = node.as_element().is_some_and(|e| e.has_class(ACTIVATED_CLASS));
        Some(Self {
            node,
            lifecycle: if activated {
                Lifecycle::Activated
            } else {
                Lifecycle::Uninitialized
            },
            listening: false,
        })
    }

    /// The element's DOM subtree
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Copy of the subtree for writing back into a document
    pub fn to_node(&self) -> Node {
        self.node.clone()
    }

    /// Hand the subtree back to the document
    pub fn into_node(self) -> Node {
        self.node
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True once a click was handled, whether or not a player was inserted
    pub fn is_activated(&self) -> bool {
        self.lifecycle == Lifecycle::Activated
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.node.as_element().and_then(|e| e.get_attribute(name))
    }

    fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Video id, if set
    pub fn video_id(&self) -> Option<&str> {
        self.non_empty_attr("videoid")
    }

    /// Playlist id, if set
    pub fn playlist_id(&self) -> Option<&str> {
        self.non_empty_attr("playlistid")
    }

    /// Accessible label of the play button
    pub fn play_label(&self) -> &str {
        self.non_empty_attr("playlabel").unwrap_or(DEFAULT_PLAY_LABEL)
    }

    /// Whether the privacy-enhanced domain is used
    pub fn uses_nocookie(&self) -> bool {
        self.attr("nocookie").is_some()
    }

    /// Passthrough query parameters, in order
    pub fn params(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.attr("params").unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    /// Poster image: the override if present, else the video thumbnail
    pub fn poster_url(&self) -> Option<String> {
        if let Some(poster) = self.attr("poster") {
            return (!poster.is_empty()).then(|| poster.to_string());
        }
        let id = self.video_id()?;
        let mut url = Url::parse(POSTER_BASE).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().push(id).push(POSTER_FILE);
        Some(url.to_string())
    }

    /// Set an attribute and notify the element, like a DOM attribute write
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let old = self.attr(name).map(str::to_string);
        if let Some(elem) = self.node.as_element_mut() {
            elem.set_attribute(name, value);
        }
        self.on_attribute_change(name, old.as_deref(), Some(value));
    }

    /// Remove an attribute and notify the element
    pub fn remove_attribute(&mut self, name: &str) {
        let old = self.node.as_element_mut().and_then(|e| e.remove_attribute(name));
        self.on_attribute_change(name, old.as_deref(), None);
    }

    /// Set the video id
    pub fn set_video_id(&mut self, id: &str) {
        self.set_attribute("videoid", id);
    }

    /// Set the playlist id
    pub fn set_playlist_id(&mut self, id: &str) {
        self.set_attribute("playlistid", id);
    }

    /// Set the play button label
    pub fn set_play_label(&mut self, label: &str) {
        self.set_attribute("playlabel", label);
    }

    /// Override the poster image
    pub fn set_poster(&mut self, url: &str) {
        self.set_attribute("poster", url);
    }

    /// Toggle the privacy-enhanced domain
    pub fn set_nocookie(&mut self, enabled: bool) {
        if enabled {
            self.set_attribute("nocookie", "");
        } else {
            self.remove_attribute("nocookie");
        }
    }

    /// Set one passthrough parameter, replacing earlier values of that name
    pub fn set_param(&mut self, key: &str, value: &str) {
        let mut params = self.params();
        match params.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                params[pos].1 = value.to_string();
                let mut seen = false;
                params.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => params.push((key.to_string(), value.to_string())),
        }
        let serialized = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&params)
            .finish();
        self.set_attribute("params", &serialized);
    }

    /// Render the poster and play button. Running it again is a no-op.
    pub fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        self.lifecycle = Lifecycle::Poster;
        self.update_poster();

        let has_button = self.node.contains_descendant(&is_play_button);
        if !has_button {
            let hidden = Node::element("span")
                .with_attribute("class", HIDDEN_LABEL_CLASS)
                .with_child(Node::text(self.play_label()));
            let button = Node::element("button")
                .with_attribute("type", "button")
                .with_attribute("class", PLAY_BUTTON_CLASS)
                .with_child(hidden);
            self.node.add_child(button);
        }

        self.update_play_label();
        self.listening = true;
    }

    /// React to an attribute change after initialization
    pub fn on_attribute_change(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if self.lifecycle == Lifecycle::Uninitialized || old == new {
            return;
        }
        match name {
            "videoid" | "playlistid" | "poster" => self.update_poster(),
            "playlabel" => self.update_play_label(),
            _ => {}
        }
    }

    /// Refresh the button's accessible label and hidden text
    pub fn update_play_label(&mut self) {
        let label = self.play_label().to_string();
        let Some(button) = self.node.find_descendant_mut(&is_play_button) else {
            return;
        };
        if let Some(elem) = button.as_element_mut() {
            elem.set_attribute("aria-label", label.clone());
        }
        if let Some(hidden) = button.find_descendant_mut(&|n: &Node| has_class(n, HIDDEN_LABEL_CLASS)) {
            hidden.set_text_content(label);
        }
    }

    /// Recompute the poster background, removing it if none resolves
    pub fn update_poster(&mut self) {
        if self.is_activated() {
            return;
        }
        let poster = self.poster_url();
        if let Some(elem) = self.node.as_element_mut() {
            let mut declarations = declarations_without_poster(elem);
            if let Some(poster) = poster {
                declarations.push(format!("background-image: url('{}')", poster));
            }
            write_style(elem, declarations);
        }
    }

    /// Issue preconnect hints for the player origins
    pub fn warm_connections(&self, registry: &mut PreconnectRegistry) -> Vec<PreconnectHint> {
        registry.warm()
    }

    /// Replace the poster with the player. Only the first call has any
    /// effect; every call suppresses the event's default action.
    pub fn activate(&mut self, event: &mut EmbedEvent) -> Activation {
        event.prevent_default();
        if self.is_activated() {
            return Activation::AlreadyActivated;
        }

        self.lifecycle = Lifecycle::Activated;
        self.listening = false;
        self.node.remove_descendants(&is_play_button);
        if let Some(elem) = self.node.as_element_mut() {
            elem.add_class(ACTIVATED_CLASS);
            let declarations = declarations_without_poster(elem);
            write_style(elem, declarations);
        }

        let Some(src) = self.build_embed_src() else {
            log::warn!(
                "lite-youtube: Unable to build embed URL (videoid={:?}, playlistid={:?})",
                self.video_id(),
                self.playlist_id()
            );
            return Activation::Failed;
        };

        let iframe = Node::element("iframe")
            .with_attribute("frameborder", "0")
            .with_attribute("allow", IFRAME_ALLOW)
            .with_attribute("allowfullscreen", "")
            .with_attribute("title", self.play_label())
            .with_attribute("src", src.clone());
        self.node.add_child(iframe);
        log::debug!("lite-youtube: activated {}", src);
        Activation::Inserted { src }
    }

    /// Dispatch a host event. Returns the activation outcome for clicks.
    /// Events are ignored before initialization and after teardown.
    pub fn handle_event(
        &mut self,
        event: &mut EmbedEvent,
        registry: &mut PreconnectRegistry,
    ) -> Option<Activation> {
        if !self.listening {
            return None;
        }
        match event.trigger() {
            Trigger::PointerOver | Trigger::Focus => {
                self.warm_connections(registry);
                None
            }
            Trigger::Click => Some(self.activate(event)),
        }
    }

    /// Stop reacting to host events; the rendered subtree is left as is
    pub fn teardown(&mut self) {
        self.listening = false;
    }

    /// Player iframe URL, or `None` when neither id is set.
    ///
    /// Passthrough parameters come first; `autoplay=1` and `playsinline=1`
    /// always follow them and override any passthrough value.
    pub fn build_embed_src(&self) -> Option<String> {
        let origin = if self.uses_nocookie() {
            NOCOOKIE_ORIGIN
        } else {
            YOUTUBE_ORIGIN
        };
        let mut url = Url::parse(origin).ok()?;
        let playlist = self.playlist_id();

        let passthrough: Vec<(String, String)> = self
            .params()
            .into_iter()
            .filter(|(k, _)| {
                k != "autoplay" && k != "playsinline" && !(playlist.is_some() && k == "list")
            })
            .collect();
        let forced = [("autoplay", "1"), ("playsinline", "1")];

        match (self.video_id(), playlist) {
            (Some(id), _) => {
                url.path_segments_mut().ok()?.clear().push("embed").push(id);
                let mut query = url.query_pairs_mut();
                query.extend_pairs(&passthrough).extend_pairs(forced);
                if let Some(list) = playlist {
                    query.append_pair("list", list);
                }
            }
            (None, Some(list)) => {
                url.path_segments_mut()
                    .ok()?
                    .clear()
                    .push("embed")
                    .push("videoseries");
                url.query_pairs_mut()
                    .append_pair("list", list)
                    .extend_pairs(&passthrough)
                    .extend_pairs(forced);
            }
            (None, None) => return None,
        }
        Some(url.to_string())
    }
}

impl Default for LiteYouTube {
    fn default() -> Self {
        Self::new()
    }
}

fn has_class(node: &Node, class: &str) -> bool {
    node.as_element().is_some_and(|e| e.has_class(class))
}

fn is_play_button(node: &Node) -> bool {
    has_class(node, PLAY_BUTTON_CLASS)
}

/// Inline style declarations other than `background-image`
fn declarations_without_poster(elem: &ElementData) -> Vec<String> {
    split_declarations(elem.get_attribute("style").unwrap_or_default())
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty() && !is_background_image(d))
        .map(str::to_string)
        .collect()
}

/// Split a style attribute on `;`, ignoring semicolons inside quotes and
/// parentheses such as `url(data:image/png;base64,...)`
fn split_declarations(style: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.push(&style[start..]);
    declarations
}

fn write_style(elem: &mut ElementData, declarations: Vec<String>) {
    if declarations.is_empty() {
        elem.remove_attribute("style");
    } else {
        elem.set_attribute("style", declarations.join("; "));
    }
}

fn is_background_image(declaration: &str) -> bool {
    declaration
        .split(':')
        .next()
        .is_some_and(|prop| prop.trim().eq_ignore_ascii_case("background-image"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ID: &str = "dQw4w9WgXcQ";

    fn element_with_video() -> LiteYouTube {
        let mut el = LiteYouTube::new();
        el.set_video_id(ID);
        el
    }

    fn click(el: &mut LiteYouTube) -> Option<Activation> {
        let mut registry = PreconnectRegistry::new();
        el.handle_event(&mut EmbedEvent::new(Trigger::Click), &mut registry)
    }

    fn iframe_count(el: &LiteYouTube) -> usize {
        el.node()
            .children
            .iter()
            .filter(|n| n.is_tag("iframe"))
            .count()
    }

    #[test]
    fn test_initialize_renders_poster_and_button() {
        let mut el = element_with_video();
        el.initialize();
        assert_eq!(el.lifecycle(), Lifecycle::Poster);
        let elem = el.node().as_element().unwrap();
        assert_eq!(
            elem.get_attribute("style"),
            Some("background-image: url('https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg')")
        );
        let button = el.node().find_descendant(&is_play_button).unwrap();
        let button_elem = button.as_element().unwrap();
        assert_eq!(button_elem.get_attribute("aria-label"), Some(DEFAULT_PLAY_LABEL));
        assert_eq!(button_elem.get_attribute("type"), Some("button"));
        assert_eq!(button.text_content(), DEFAULT_PLAY_LABEL);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut once = element_with_video();
        once.initialize();
        let mut twice = element_with_video();
        twice.initialize();
        twice.initialize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_initialize_reuses_existing_button() {
        let node = Node::element(TAG_NAME)
            .with_attribute("videoid", ID)
            .with_child(
                Node::element("button")
                    .with_attribute("class", PLAY_BUTTON_CLASS)
                    .with_child(
                        Node::element("span")
                            .with_attribute("class", HIDDEN_LABEL_CLASS)
                            .with_child(Node::text("old")),
                    ),
            );
        let mut el = LiteYouTube::from_node(node).unwrap();
        el.set_play_label("Watch the talk");
        el.initialize();
        assert_eq!(el.node().children.len(), 1);
        assert_eq!(el.node().text_content(), "Watch the talk");
    }

    #[test]
    fn test_no_poster_without_video_id() {
        let mut el = LiteYouTube::new();
        el.set_playlist_id("PL123");
        el.initialize();
        assert_eq!(el.poster_url(), None);
        assert!(el.node().as_element().unwrap().get_attribute("style").is_none());
    }

    #[test]
    fn test_poster_override_and_attribute_changes() {
        let mut el = element_with_video();
        el.initialize();
        el.set_poster("https://example.com/p.jpg");
        let style = |el: &LiteYouTube| {
            el.node()
                .as_element()
                .unwrap()
                .get_attribute("style")
                .map(str::to_string)
        };
        assert_eq!(
            style(&el).as_deref(),
            Some("background-image: url('https://example.com/p.jpg')")
        );
        el.remove_attribute("poster");
        el.set_video_id("abcdefghijk");
        assert_eq!(
            style(&el).as_deref(),
            Some("background-image: url('https://i.ytimg.com/vi/abcdefghijk/hqdefault.jpg')")
        );
        el.remove_attribute("videoid");
        assert_eq!(style(&el), None);
    }

    #[test]
    fn test_update_poster_preserves_other_styles() {
        let node = Node::element(TAG_NAME)
            .with_attribute("videoid", ID)
            .with_attribute("style", "width: 100%; background-image: url('x')");
        let mut el = LiteYouTube::from_node(node).unwrap();
        el.initialize();
        assert_eq!(
            el.node().as_element().unwrap().get_attribute("style"),
            Some("width: 100%; background-image: url('https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg')")
        );
    }

    #[test]
    fn test_data_uri_poster_with_semicolons() {
        let poster = "data:image/png;base64,AAAA";
        let style = |el: &LiteYouTube| {
            el.node()
                .as_element()
                .unwrap()
                .get_attribute("style")
                .map(str::to_string)
        };
        let mut el = LiteYouTube::new();
        el.set_poster(poster);
        el.initialize();
        el.set_video_id(ID);
        assert_eq!(
            style(&el).as_deref(),
            Some("background-image: url('data:image/png;base64,AAAA')")
        );

        let mut event = EmbedEvent::new(Trigger::Click);
        el.activate(&mut event);
        assert_eq!(style(&el), None);
    }

    #[test]
    fn test_split_declarations_respects_quotes_and_parens() {
        assert_eq!(
            split_declarations("color: red; background-image: url(\"a;b\"); x: url(c;d)"),
            vec!["color: red", " background-image: url(\"a;b\")", " x: url(c;d)"]
        );
        assert_eq!(split_declarations("content: 'it\\'s;'"), vec!["content: 'it\\'s;'"]);
    }

    #[test]
    fn test_play_label_updates_after_initialize() {
        let mut el = element_with_video();
        el.initialize();
        el.set_play_label("Watch: intro");
        let button = el.node().find_descendant(&is_play_button).unwrap();
        assert_eq!(button.as_element().unwrap().get_attribute("aria-label"), Some("Watch: intro"));
        assert_eq!(button.text_content(), "Watch: intro");
        el.set_play_label("");
        assert_eq!(el.play_label(), DEFAULT_PLAY_LABEL);
    }

    #[test]
    fn test_attribute_changes_ignored_before_initialize() {
        let mut el = LiteYouTube::new();
        el.set_video_id(ID);
        assert!(el.node().as_element().unwrap().get_attribute("style").is_none());
        assert!(el.node().children.is_empty());
    }

    #[test]
    fn test_single_activation() {
        let mut el = element_with_video();
        el.initialize();
        let first = click(&mut el);
        assert!(matches!(first, Some(Activation::Inserted { .. })));
        // listeners are gone once activated
        assert_eq!(click(&mut el), None);
        let mut event = EmbedEvent::new(Trigger::Click);
        assert_eq!(el.activate(&mut event), Activation::AlreadyActivated);
        assert!(event.default_prevented());
        assert_eq!(iframe_count(&el), 1);
        assert!(el.node().find_descendant(&is_play_button).is_none());
        assert!(el.node().as_element().unwrap().has_class(ACTIVATED_CLASS));
        assert!(el.node().as_element().unwrap().get_attribute("style").is_none());
    }

    #[test]
    fn test_iframe_attributes() {
        let mut el = element_with_video();
        el.set_play_label("My video");
        el.initialize();
        click(&mut el);
        let iframe = el.node().children.iter().find(|n| n.is_tag("iframe")).unwrap();
        let attrs = iframe.as_element().unwrap();
        assert_eq!(attrs.get_attribute("title"), Some("My video"));
        assert_eq!(attrs.get_attribute("allow"), Some(IFRAME_ALLOW));
        assert!(attrs.has_attribute("allowfullscreen"));
        assert_eq!(
            attrs.get_attribute("src"),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&playsinline=1")
        );
    }

    #[test]
    fn test_failed_activation_is_terminal() {
        let mut el = LiteYouTube::new();
        el.initialize();
        assert_eq!(click(&mut el), Some(Activation::Failed));
        assert!(el.is_activated());
        assert_eq!(iframe_count(&el), 0);
        let mut event = EmbedEvent::new(Trigger::Click);
        assert_eq!(el.activate(&mut event), Activation::AlreadyActivated);
        assert_eq!(iframe_count(&el), 0);
    }

    #[test]
    fn test_hover_and_focus_never_activate() {
        let mut el = element_with_video();
        el.initialize();
        let mut registry = PreconnectRegistry::new();
        let mut hover = EmbedEvent::new(Trigger::PointerOver);
        assert_eq!(el.handle_event(&mut hover, &mut registry), None);
        let mut focus = EmbedEvent::new(Trigger::Focus);
        assert_eq!(el.handle_event(&mut focus, &mut registry), None);
        assert!(!hover.default_prevented());
        assert_eq!(el.lifecycle(), Lifecycle::Poster);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_preconnect_shared_across_elements() {
        let mut registry = PreconnectRegistry::new();
        let mut a = element_with_video();
        let mut b = element_with_video();
        a.initialize();
        b.initialize();
        assert_eq!(a.warm_connections(&mut registry).len(), 5);
        assert!(b.warm_connections(&mut registry).is_empty());
    }

    #[test]
    fn test_events_ignored_after_teardown() {
        let mut el = element_with_video();
        el.initialize();
        el.teardown();
        assert_eq!(click(&mut el), None);
        assert_eq!(el.lifecycle(), Lifecycle::Poster);
    }

    #[test]
    fn test_from_node_rejects_other_tags() {
        assert!(LiteYouTube::from_node(Node::element("div")).is_none());
        let activated = Node::element(TAG_NAME).with_attribute("class", ACTIVATED_CLASS);
        let mut el = LiteYouTube::from_node(activated).unwrap();
        assert!(el.is_activated());
        el.initialize();
        assert!(el.node().children.is_empty());
    }

    #[test]
    fn test_build_embed_src_nocookie() {
        let mut el = element_with_video();
        el.set_nocookie(true);
        let src = el.build_embed_src().unwrap();
        assert!(src.starts_with("https://www.youtube-nocookie.com/embed/"));
        assert!(src.contains("autoplay=1&playsinline=1"));
    }

    #[test]
    fn test_build_embed_src_forced_params_win() {
        let mut el = element_with_video();
        el.set_attribute("params", "playsinline=0&start=30&autoplay=0");
        assert_eq!(
            el.build_embed_src().as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?start=30&autoplay=1&playsinline=1")
        );
    }

    #[test]
    fn test_build_embed_src_playlists() {
        let mut el = LiteYouTube::new();
        assert_eq!(el.build_embed_src(), None);

        el.set_playlist_id("PL123");
        assert_eq!(
            el.build_embed_src().as_deref(),
            Some("https://www.youtube.com/embed/videoseries?list=PL123&autoplay=1&playsinline=1")
        );

        el.set_video_id(ID);
        assert_eq!(
            el.build_embed_src().as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&playsinline=1&list=PL123")
        );
    }

    #[test]
    fn test_set_param_replaces_value() {
        let mut el = LiteYouTube::new();
        el.set_attribute("params", "start=1&rel=0&start=2");
        el.set_param("start", "30");
        assert_eq!(
            el.params(),
            vec![("start".to_string(), "30".to_string()), ("rel".to_string(), "0".to_string())]
        );
        el.set_param("mute", "1");
        assert_eq!(el.params().len(), 3);
    }
}
