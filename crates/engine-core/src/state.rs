use serde::Serialize;
use std::fmt;

/// Phases of one loader run. `Failed` is reachable from every non-terminal
/// state; `Completed` only from `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobState {
    Init,
    CredentialsResolved,
    TableReady,
    Loading,
    Completed,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Init => "Init",
            JobState::CredentialsResolved => "CredentialsResolved",
            JobState::TableReady => "TableReady",
            JobState::Loading => "Loading",
            JobState::Completed => "Completed",
            JobState::Failed => "Failed",
        };
        write!(f, "{name}")
    }
}
