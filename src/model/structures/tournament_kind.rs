use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Importance class of a tournament, derived from its name and file name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TournamentKind {
    National,
    State,
    Regular
}

impl TournamentKind {
    pub fn is_state_or_national(&self) -> bool {
        !matches!(self, TournamentKind::Regular)
    }
}
