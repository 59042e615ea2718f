use serde::{Deserialize, Serialize};

/// Running counters for a team across all seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMeta {
    /// Pairwise comparisons the team has been rated in.
    pub games: u32,
    /// Distinct events rated in the most recently updated season.
    pub events: usize
}
