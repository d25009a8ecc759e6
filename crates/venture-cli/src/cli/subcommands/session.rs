use clap::Subcommand;

/// Session lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Start a consultation and print the first question.
    New {
        /// Business name.
        #[arg(long)]
        name: String,
        /// Industry, used to steer comparison suggestions.
        #[arg(long)]
        industry: Option<String>,
    },
    /// List sessions, most recently updated first. Honours `--limit`.
    List,
    /// Show a session snapshot and the action it is waiting on.
    Show {
        /// Session ID.
        id: String,
    },
    /// Show the turn log of a session.
    Events {
        /// Session ID.
        id: String,
    },
    /// Delete a session and its turn log.
    Delete {
        /// Session ID.
        id: String,
    },
}
