//! Renderer options.

/// Default diagram fence language.
pub const DEFAULT_DIAGRAM_LANGUAGE: &str = "mermaid";

/// Default CSS class of emitted diagram blocks.
pub const DEFAULT_DIAGRAM_CLASS: &str = "diagram";

/// Options for [`ChatRenderer`](crate::ChatRenderer).
///
/// # Example
///
/// ```
/// use chatmd_renderer::RenderOptions;
///
/// let options = RenderOptions::default()
///     .diagram_languages(["mermaid", "graphviz"])
///     .links_in_new_tab(false);
///
/// assert_eq!(options.diagram_languages.len(), 2);
/// assert_eq!(options.diagram_class, "diagram");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Fence language tags treated as diagrams (matched case-insensitively).
    pub diagram_languages: Vec<String>,
    /// CSS class on the `<pre>` element wrapping diagram source.
    pub diagram_class: String,
    /// Open links in a new browsing context.
    pub links_in_new_tab: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            diagram_languages: vec![DEFAULT_DIAGRAM_LANGUAGE.to_owned()],
            diagram_class: DEFAULT_DIAGRAM_CLASS.to_owned(),
            links_in_new_tab: true,
        }
    }
}

impl RenderOptions {
    /// Set the fence languages treated as diagrams.
    #[must_use]
    pub fn diagram_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagram_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the CSS class of diagram blocks.
    #[must_use]
    pub fn diagram_class(mut self, class: impl Into<String>) -> Self {
        self.diagram_class = class.into();
        self
    }

    /// Open links in a new browsing context (default: `true`).
    #[must_use]
    pub fn links_in_new_tab(mut self, enabled: bool) -> Self {
        self.links_in_new_tab = enabled;
        self
    }
}
