//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Cybertarot - three-card tarot readings interpreted by an LLM
#[derive(Parser)]
#[command(name = "ct", about = "Three-card tarot readings interpreted by an LLM", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a reading: ask a question, flip three cards, get an interpretation
    Read {
        /// The question to divine (prompted interactively if omitted)
        #[arg(short, long)]
        question: Option<String>,

        /// Seed the draw for a reproducible spread
        #[arg(long)]
        seed: Option<u64>,

        /// Print the drawn cards' reference meanings after the interpretation
        #[arg(long)]
        show_reference: bool,
    },

    /// List every card in the catalog with its keywords
    Cards {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cybertarot")
        .join("logs")
        .join("cybertarot.log")
}

/// Output format for listing commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["ct"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_read() {
        let cli = Cli::parse_from(["ct", "read", "--question", "我的职业"]);
        if let Some(Command::Read { question, seed, show_reference }) = cli.command {
            assert_eq!(question.as_deref(), Some("我的职业"));
            assert!(seed.is_none());
            assert!(!show_reference);
        } else {
            panic!("Expected Read command");
        }
    }

    #[test]
    fn test_cli_parse_read_with_seed() {
        let cli = Cli::parse_from(["ct", "read", "-q", "未来如何?", "--seed", "42", "--show-reference"]);
        if let Some(Command::Read { question, seed, show_reference }) = cli.command {
            assert_eq!(question.as_deref(), Some("未来如何?"));
            assert_eq!(seed, Some(42));
            assert!(show_reference);
        } else {
            panic!("Expected Read command");
        }
    }

    #[test]
    fn test_cli_parse_cards() {
        let cli = Cli::parse_from(["ct", "cards", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Cards {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["ct", "-c", "/path/to/config.yml", "cards"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
