//! Configuration management for chatmd.
//!
//! Parses `chatmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [renderer]
//! diagram_languages = ["mermaid"]
//! diagram_class = "diagram"
//! links_in_new_tab = true
//!
//! [messages]
//! error_prefix = "Sorry, there was an error: "
//! connection_error = "Connection error. Please try again."
//! ```

use std::path::{Path, PathBuf};

use chatmd_protocol::ReplyMessages;
use chatmd_renderer::RenderOptions;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override diagram fence languages.
    pub diagram_languages: Option<Vec<String>>,
    /// Override diagram CSS class.
    pub diagram_class: Option<String>,
    /// Override the open-links-in-new-tab flag.
    pub links_in_new_tab: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chatmd.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Renderer options.
    pub renderer: RenderOptions,
    /// Strings shown in place of a bot reply when something goes wrong.
    pub messages: ReplyMessages,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to contain only `allowed` characters.
fn require_chars(
    value: &str,
    field: &str,
    allowed: impl Fn(char) -> bool,
) -> Result<(), ConfigError> {
    if let Some(c) = value.chars().find(|&c| !allowed(c)) {
        return Err(ConfigError::Validation(format!(
            "{field} contains invalid character {c:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `chatmd.toml` in current directory and parents
    /// and falls back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(languages) = &settings.diagram_languages {
            self.renderer.diagram_languages.clone_from(languages);
        }
        if let Some(class) = &settings.diagram_class {
            self.renderer.diagram_class.clone_from(class);
        }
        if let Some(links_in_new_tab) = settings.links_in_new_tab {
            self.renderer.links_in_new_tab = links_in_new_tab;
        }
    }

    /// Renderer options for building a [`ChatRenderer`](chatmd_renderer::ChatRenderer).
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        self.renderer.clone()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        discover_config_from(&cwd)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_renderer()?;
        self.validate_messages()?;
        Ok(())
    }

    /// Validate renderer configuration.
    fn validate_renderer(&self) -> Result<(), ConfigError> {
        for language in &self.renderer.diagram_languages {
            require_non_empty(language, "renderer.diagram_languages")?;
            require_chars(language, "renderer.diagram_languages", |c| {
                c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
            })?;
        }

        let class = &self.renderer.diagram_class;
        require_non_empty(class, "renderer.diagram_class")?;
        require_chars(class, "renderer.diagram_class", |c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
        })?;
        if class.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(
                "renderer.diagram_class cannot start with a digit".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate message strings.
    fn validate_messages(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.messages.connection_error, "messages.connection_error")
    }
}

/// Search `start` and its parents for a config file.
fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
