//! Command-line interface
//!
//! Argument parsing, text source selection and config updates for the
//! `senti` binary.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use senti::{clipboard, Config, HighlightMode};

#[derive(Parser)]
#[command(name = "senti")]
#[command(author = "Senti Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sentiment analysis client that scores text and highlights charged words")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze text (from the argument, a file, the clipboard or stdin)
    Analyze {
        /// Text to analyze
        text: Option<String>,

        /// Read the text from a file ("-" for stdin)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Read the text from the clipboard
        #[arg(short, long, conflicts_with_all = ["text", "file"])]
        clipboard: bool,

        /// Model name (defaults to the configured model, then the first one listed)
        #[arg(short, long)]
        model: Option<String>,

        /// How tokens are matched for highlighting
        #[arg(long, value_enum)]
        mode: Option<HighlightMode>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Use this server URL for this run only
        #[arg(long)]
        server: Option<String>,
    },

    /// List the models offered by the server
    Models {
        /// Use this server URL for this run only
        #[arg(long)]
        server: Option<String>,
    },

    /// Show past analyses
    History {
        /// Delete all recorded analyses
        #[arg(long)]
        clear: bool,
    },

    /// Show or change the saved configuration
    Config {
        /// Only print the current configuration
        #[arg(long, conflicts_with_all = ["server", "timeout", "model", "mode"])]
        show: bool,

        #[command(flatten)]
        update: ConfigUpdate,
    },
}

/// Settings changed by `senti config`
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ConfigUpdate {
    /// Base URL of the sentiment API
    #[arg(long)]
    pub server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Default model name
    #[arg(long)]
    pub model: Option<String>,

    /// Default highlight mode
    #[arg(long, value_enum)]
    pub mode: Option<HighlightMode>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.server.is_none() && self.timeout.is_none() && self.model.is_none() && self.mode.is_none()
    }

    /// Apply the update to the config stored at `path`, returning the result
    pub fn apply_to(self, path: &Path) -> Result<Config> {
        let mut config = Config::load_from(path)?;
        if self.is_empty() {
            return Ok(config);
        }

        if let Some(url) = self.server {
            config.server_url = url;
        }
        if let Some(secs) = self.timeout {
            if secs == 0 {
                bail!("Timeout must be at least one second");
            }
            config.timeout_secs = secs;
        }
        if let Some(name) = self.model {
            config.default_model = Some(name);
        }
        if let Some(mode) = self.mode {
            config.highlight_mode = mode;
        }

        config.save_to(path)?;
        debug!("Saved config to {}", path.display());
        Ok(config)
    }
}

/// Where the text to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Clipboard,
    Stdin,
}

impl InputSource {
    /// Pick the source: argument, file (`-` means stdin), clipboard, then stdin
    pub fn select(text: Option<String>, file: Option<PathBuf>, from_clipboard: bool) -> Self {
        if let Some(text) = text {
            return Self::Text(text);
        }
        match file {
            Some(path) if path == Path::new("-") => Self::Stdin,
            Some(path) => Self::File(path),
            None if from_clipboard => Self::Clipboard,
            None => Self::Stdin,
        }
    }

    /// Read the text, taking stdin from `stdin`
    pub fn read(self, mut stdin: impl Read) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::File(path) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display())),
            Self::Clipboard => clipboard::get_text(),
            Self::Stdin => {
                let mut input = String::new();
                stdin
                    .read_to_string(&mut input)
                    .context("Failed to read stdin")?;
                Ok(input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("senti").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_input_precedence() {
        assert_eq!(
            InputSource::select(Some("hi".into()), Some("notes.txt".into()), true),
            InputSource::Text("hi".into())
        );
        assert_eq!(
            InputSource::select(None, Some("notes.txt".into()), true),
            InputSource::File("notes.txt".into())
        );
        assert_eq!(InputSource::select(None, Some("-".into()), true), InputSource::Stdin);
        assert_eq!(InputSource::select(None, None, true), InputSource::Clipboard);
        assert_eq!(InputSource::select(None, None, false), InputSource::Stdin);
    }

    #[test]
    fn test_read_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.txt");
        fs::write(&path, "A lovely film").unwrap();

        let stdin = "from stdin".as_bytes();
        assert_eq!(InputSource::Text("typed".into()).read(stdin).unwrap(), "typed");
        assert_eq!(InputSource::File(path).read(stdin).unwrap(), "A lovely film");
        assert_eq!(InputSource::Stdin.read(stdin).unwrap(), "from stdin");
        assert!(InputSource::File(dir.path().join("missing.txt")).read(stdin).is_err());
    }

    #[test]
    fn test_config_update_persists_each_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let update = ConfigUpdate {
            server: Some("http://localhost:9".into()),
            timeout: Some(7),
            model: Some("bayes".into()),
            mode: Some(HighlightMode::Sequential),
        };
        let config = update.apply_to(&path).unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved, config);
        assert_eq!(saved.server_url, "http://localhost:9");
        assert_eq!(saved.timeout_secs, 7);
        assert_eq!(saved.default_model.as_deref(), Some("bayes"));
        assert_eq!(saved.highlight_mode, HighlightMode::Sequential);
    }

    #[test]
    fn test_config_update_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        ConfigUpdate { timeout: Some(30), ..Default::default() }.apply_to(&path).unwrap();
        ConfigUpdate { server: Some("http://example.test".into()), ..Default::default() }
            .apply_to(&path)
            .unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.timeout_secs, 30);
        assert_eq!(saved.server_url, "http://example.test");
    }

    #[test]
    fn test_config_update_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let update = ConfigUpdate { timeout: Some(0), ..Default::default() };
        assert!(update.apply_to(&path).is_err());
        assert_eq!(Config::load_from(&path).unwrap().timeout_secs, Config::default().timeout_secs);
    }

    #[test]
    fn test_config_server_flag_goes_to_update() {
        let cli = parse(&["config", "--server", "http://localhost:9"]);
        match cli.command {
            Some(Commands::Config { show, update }) => {
                assert!(!show);
                assert_eq!(update.server.as_deref(), Some("http://localhost:9"));
            }
            _ => panic!("expected config command"),
        }
    }

    #[test]
    fn test_config_show_flag() {
        let cli = parse(&["config", "--show"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { show: true, ref update }) if update.is_empty()
        ));
        assert!(Cli::try_parse_from(["senti", "config", "--show", "--timeout", "5"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected_by_parser() {
        assert!(Cli::try_parse_from(["senti", "config", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["senti", "config", "--timeout", "1"]).is_ok());
    }

    #[test]
    fn test_server_override_on_analyze() {
        let cli = parse(&["analyze", "hello", "--server", "http://localhost:8080"]);
        match cli.command {
            Some(Commands::Analyze { text, server, .. }) => {
                assert_eq!(text.as_deref(), Some("hello"));
                assert_eq!(server.as_deref(), Some("http://localhost:8080"));
            }
            _ => panic!("expected analyze command"),
        }
    }
}
