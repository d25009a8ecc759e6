use clap::{Args, Subcommand, ValueEnum};
use venture_core::enums::CheckpointChoice;

use crate::cli::subcommands::SessionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session management.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Send a free-text answer.
    Turn(TurnArgs),
    /// Add a comparison company to the selection.
    Select(SelectionArgs),
    /// Remove a comparison company from the selection.
    Deselect(SelectionArgs),
    /// Answer the questionnaire checkpoint.
    Checkpoint(CheckpointArgs),
    /// Generate the evaluation report, or print the cached one.
    Report(ReportArgs),
    /// Serve the JSON HTTP API.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TurnArgs {
    /// Session ID.
    pub session_id: String,
    /// Answer text. Remaining words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

impl TurnArgs {
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Clone, Debug, Args)]
pub struct SelectionArgs {
    /// Session ID.
    pub session_id: String,
    /// Company name as presented in the candidate list.
    #[arg(required = true, num_args = 1..)]
    pub entity: Vec<String>,
}

impl SelectionArgs {
    #[must_use]
    pub fn entity(&self) -> String {
        self.entity.join(" ")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ChoiceArg {
    Continue,
    Stop,
}

impl From<ChoiceArg> for CheckpointChoice {
    fn from(value: ChoiceArg) -> Self {
        match value {
            ChoiceArg::Continue => Self::Continue,
            ChoiceArg::Stop => Self::Stop,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct CheckpointArgs {
    /// Session ID.
    pub session_id: String,
    /// continue or stop
    pub choice: ChoiceArg,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Session ID.
    pub session_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind).
    #[arg(long)]
    pub bind: Option<String>,
}
