use chrono::NaiveDate;

use crate::model::structures::tournament_kind::TournamentKind;

/// A tournament after name/date/season normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentDescriptor {
    /// Display name, after state and nationals substitutions.
    pub name: String,
    pub date: NaiveDate,
    /// Season year, e.g. `"2024"`.
    pub season: String,
    /// File stem, used to build the source link.
    pub filename: String,
    pub kind: TournamentKind
}

impl TournamentDescriptor {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn season_year(&self) -> Option<i32> {
        self.season.parse().ok()
    }
}
