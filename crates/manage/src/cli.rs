//! Command-line definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// polls-manage - administer the polls database
#[derive(Parser, Debug)]
#[command(name = "polls-manage", version, about = "Administer the polls database")]
pub struct Cli {
    /// Configuration file (defaults to `config/` plus `POLLS_*` variables)
    #[arg(short, long, global = true, env = "POLLS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,

    /// Sync content types and permissions for the installed models
    UpdatePermissions,

    /// Create a question
    CreateQuestion {
        /// Question text (at most 200 characters)
        #[arg(short, long)]
        text: String,

        /// Publish date, RFC 3339 (defaults to now)
        #[arg(short, long)]
        pub_date: Option<DateTime<Utc>>,
    },

    /// Add a choice to a question
    AddChoice {
        /// Question ID
        #[arg(short, long)]
        question: String,

        /// Choice text (at most 200 characters)
        #[arg(short, long)]
        text: String,
    },

    /// Count one vote for a choice
    Vote {
        /// Choice ID
        #[arg(long)]
        choice: String,
    },

    /// Delete a question and its choices
    DeleteQuestion {
        /// Question ID
        #[arg(short, long)]
        id: String,
    },

    /// Show the question creation history
    History {
        /// Maximum number of rows
        #[arg(short, long, default_value_t = 20)]
        limit: u64,
    },

    /// Show the latest published questions
    Recent {
        /// Maximum number of questions
        #[arg(short, long, default_value_t = 5)]
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_question() {
        let cli = Cli::try_parse_from([
            "polls-manage",
            "create-question",
            "--text",
            "Is this good?",
            "--pub-date",
            "2024-01-01T00:00:00Z",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        match cli.command {
            Command::CreateQuestion { text, pub_date } => {
                assert_eq!(text, "Is this good?");
                assert_eq!(
                    pub_date.map(|d| d.to_rfc3339()).as_deref(),
                    Some("2024-01-01T00:00:00+00:00")
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_history_default_limit() {
        let cli = Cli::try_parse_from(["polls-manage", "--json", "history"])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(cli.json);
        assert!(matches!(cli.command, Command::History { limit: 20 }));
    }
}
