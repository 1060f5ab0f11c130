//! CLI command implementations.

pub(crate) mod history;
pub(crate) mod render;
pub(crate) mod reply;
pub(crate) mod show;
pub(crate) mod suggestions;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chatmd_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;

pub(crate) use history::HistoryArgs;
pub(crate) use render::RenderArgs;
pub(crate) use reply::ReplyArgs;
pub(crate) use show::ShowArgs;
pub(crate) use suggestions::SuggestionsArgs;

/// Configuration and renderer arguments shared by rendering commands.
#[derive(Args, Debug)]
pub(crate) struct RendererArgs {
    /// Path to configuration file (default: auto-discover chatmd.toml).
    #[arg(short, long, env = "CHATMD_CONFIG")]
    config: Option<PathBuf>,

    /// Fence language rendered as a diagram; repeatable (overrides config).
    #[arg(long = "diagram-language", value_name = "LANG")]
    diagram_languages: Vec<String>,

    /// Render every fence as a code block.
    #[arg(long, conflicts_with = "diagram_languages")]
    no_diagrams: bool,

    /// CSS class of diagram blocks (overrides config).
    #[arg(long)]
    diagram_class: Option<String>,

    /// Open links in the same tab.
    #[arg(long)]
    no_new_tab: bool,
}

impl RendererArgs {
    /// Load configuration with the command-line overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        Ok(Config::load(
            self.config.as_deref(),
            Some(&self.cli_settings()),
        )?)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            diagram_languages: self.resolve_diagram_languages(),
            diagram_class: self.diagram_class.clone(),
            links_in_new_tab: self.no_new_tab.then_some(false),
        }
    }

    /// Resolve diagram languages from --diagram-language/--no-diagrams flags.
    fn resolve_diagram_languages(&self) -> Option<Vec<String>> {
        if self.no_diagrams {
            return Some(Vec::new());
        }
        (!self.diagram_languages.is_empty()).then(|| self.diagram_languages.clone())
    }
}

/// Read the whole input from `file`, or from stdin when absent.
pub(crate) fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Write `text` and a trailing newline to stdout.
pub(crate) fn write_output(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        renderer: RendererArgs,
    }

    fn settings(args: &[&str]) -> CliSettings {
        let cli = TestCli::try_parse_from(std::iter::once("chatmd").chain(args.iter().copied()))
            .unwrap();
        cli.renderer.cli_settings()
    }

    #[test]
    fn test_no_flags_no_overrides() {
        let settings = settings(&[]);
        assert!(settings.diagram_languages.is_none());
        assert!(settings.diagram_class.is_none());
        assert!(settings.links_in_new_tab.is_none());
    }

    #[test]
    fn test_diagram_language_flags() {
        let settings = settings(&[
            "--diagram-language",
            "mermaid",
            "--diagram-language",
            "graphviz",
        ]);
        assert_eq!(
            settings.diagram_languages,
            Some(vec!["mermaid".to_owned(), "graphviz".to_owned()])
        );
    }

    #[test]
    fn test_no_diagrams_flag() {
        assert_eq!(settings(&["--no-diagrams"]).diagram_languages, Some(vec![]));
    }

    #[test]
    fn test_no_diagrams_conflicts_with_language() {
        let result =
            TestCli::try_parse_from(["chatmd", "--no-diagrams", "--diagram-language", "mermaid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_class_and_tab_flags() {
        let settings = settings(&["--diagram-class", "mermaid", "--no-new-tab"]);
        assert_eq!(settings.diagram_class.as_deref(), Some("mermaid"));
        assert_eq!(settings.links_in_new_tab, Some(false));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatmd.toml");
        std::fs::write(&path, "[renderer]\ndiagram_class = \"mermaid\"\n").unwrap();
        let cli = TestCli::try_parse_from([
            "chatmd",
            "--config",
            path.to_str().unwrap(),
            "--no-new-tab",
        ])
        .unwrap();

        let config = cli.renderer.load_config().unwrap();

        assert_eq!(config.renderer.diagram_class, "mermaid");
        assert!(!config.renderer.links_in_new_tab);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.md");
        std::fs::write(&path, "**hi**\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "**hi**\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/message.md"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
