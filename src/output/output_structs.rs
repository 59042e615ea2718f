use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::structures::{category_rating::CategoryRating, team_meta::TeamMeta};

/// Contents of `states<Division>/<STATE>.json`: canonical team name -> team.
pub type StateOutput = BTreeMap<String, TeamOutput>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOutput {
    pub seasons: BTreeMap<String, SeasonOutput>,
    pub meta: TeamMeta
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutput {
    /// Category (`__OVERALL__` or an event name) -> rating line.
    pub events: BTreeMap<String, CategoryRating>
}

/// Contents of `states<Division>/meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaFile {
    pub teams: Vec<String>,
    pub events: Vec<String>,
    pub tournaments: Vec<String>,
    /// State code -> display name, for every state with an output file.
    pub states: BTreeMap<String, String>,
    pub tournament_timeline: BTreeMap<String, Vec<TimelineEntry>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: String,
    pub tournament_id: usize,
    pub tournament_name: String,
    pub link: String,
    pub season: String
}
