use serde::{Deserialize, Serialize};

/// One tournament in a team's rating history for a category.
/// Serialized with single-letter keys to keep the published shards small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "d")]
    pub date: String,
    #[serde(rename = "t")]
    pub tournament_id: usize,
    #[serde(rename = "p")]
    pub place: u32,
    #[serde(rename = "e")]
    pub rating_after: f64,
    #[serde(rename = "l")]
    pub source_link: String,
    #[serde(rename = "n", skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>
}
