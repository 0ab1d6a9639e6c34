use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kin: share family memories, one prompt at a time
#[derive(Parser, Debug)]
#[command(name = "kin")]
#[command(version)]
#[command(about = "Screen-flow prototype for capturing family memories")]
#[command(
    long_about = "Kin walks through choosing a capture format and browsing writing prompts. Capture is simulated: nothing is recorded or saved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $KIN_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive terminal front-end
    #[cfg(feature = "tui")]
    Tui,

    /// Replay a sequence of clicks and print the resulting session
    Click {
        /// Steps: an element id, `key=value[,key=value]` data selector, `@next` or `@prev`
        #[arg(required = true)]
        steps: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the prompt catalog
    Prompts {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List screens and navigation buttons of the page
    Screens {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "tui")]
            Commands::Tui => "tui",
            Commands::Click { .. } => "click",
            Commands::Prompts { .. } => "prompts",
            Commands::Screens { .. } => "screens",
        }
    }

    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        match self {
            #[cfg(feature = "tui")]
            Commands::Tui => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_click_parsing() {
        let cli = Cli::parse_from([
            "kin",
            "click",
            "nav-prompts",
            "category=funny",
            "@next",
            "--format",
            "json",
        ]);

        match cli.command {
            Commands::Click { steps, format } => {
                assert_eq!(steps, vec!["nav-prompts", "category=funny", "@next"]);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Wrong command parsed"),
        }
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_click_requires_steps() {
        assert!(Cli::try_parse_from(["kin", "click"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "kin",
            "prompts",
            "--category",
            "culture",
            "--log-level",
            "debug",
            "--config",
            "/tmp/kin.yaml",
        ]);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/kin.yaml")));
        match cli.command {
            Commands::Prompts { category, format } => {
                assert_eq!(category.as_deref(), Some("culture"));
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Wrong command parsed"),
        }
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::parse_from(["kin", "screens"]);
        assert_eq!(cli.command.name(), "screens");
        assert!(!cli.command.is_interactive());
    }
}
