use serde::{Deserialize, Serialize};

use crate::model::structures::history_entry::HistoryEntry;

/// A team's rating line in one category for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRating {
    pub rating: f64,
    pub history: Vec<HistoryEntry>
}

impl CategoryRating {
    pub fn new(rating: f64) -> CategoryRating {
        CategoryRating {
            rating,
            history: Vec::new()
        }
    }
}
