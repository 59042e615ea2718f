use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Bound
};

use crate::{
    config::Config,
    model::{
        constants::OVERALL_CATEGORY,
        structures::{
            category_rating::CategoryRating, history_entry::HistoryEntry, rating_key::RatingKey, team_meta::TeamMeta,
            tournament_record::TournamentRecord
        }
    },
    output::output_structs::{SeasonOutput, StateOutput, TeamOutput}
};

/// The running rating table of one division.
///
/// Every rating line is addressed by a [`RatingKey`] (state, team, category,
/// season). Lines are created explicitly through [`RatingTracker::get_or_initialize`];
/// plain lookups never create anything.
pub struct RatingTracker {
    ratings: BTreeMap<RatingKey, CategoryRating>,
    meta: BTreeMap<(String, String), TeamMeta>,
    starting_elo: f64,
    elo_floor: f64
}

impl RatingTracker {
    pub fn new(config: &Config) -> RatingTracker {
        RatingTracker {
            ratings: BTreeMap::new(),
            meta: BTreeMap::new(),
            starting_elo: config.starting_elo,
            elo_floor: config.elo_floor
        }
    }

    /// Returns the rating line for `key`, creating it if needed.
    ///
    /// A new line starts from the rating of the nearest earlier season in which
    /// the team was rated in the same category, or the starting rating if there
    /// is none.
    pub fn get_or_initialize(&mut self, key: &RatingKey) -> &CategoryRating {
        if !self.ratings.contains_key(key) {
            let initial = self.carried_over_rating(key).unwrap_or(self.starting_elo);
            self.ratings.insert(key.clone(), CategoryRating::new(initial));
            self.meta.entry((key.state.clone(), key.team.clone())).or_default();
        }

        &self.ratings[key]
    }

    fn carried_over_rating(&self, key: &RatingKey) -> Option<f64> {
        let current: i64 = key.season.parse().ok()?;
        let start = RatingKey {
            season: String::new(),
            ..key.clone()
        };

        self.ratings
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(k, _)| k.same_line(key))
            .filter_map(|(k, v)| k.season.parse::<i64>().ok().map(|season| (season, v.rating)))
            .filter(|(season, _)| *season < current)
            .max_by_key(|(season, _)| *season)
            .map(|(_, rating)| rating)
    }

    pub fn rating(&self, key: &RatingKey) -> Option<f64> {
        self.ratings.get(key).map(|r| r.rating)
    }

    pub fn history(&self, key: &RatingKey) -> &[HistoryEntry] {
        self.ratings.get(key).map(|r| r.history.as_slice()).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn meta(&self, state: &str, team: &str) -> Option<TeamMeta> {
        self.meta.get(&(state.to_owned(), team.to_owned())).copied()
    }

    /// Writes the outcome of one category update for one team and returns the
    /// new rating.
    ///
    /// `base_rating` is normally the line's own rating; a demoted varsity team
    /// is committed into its JV line starting from the varsity rating. The new
    /// rating never drops below the floor. The history keeps the rating rounded
    /// to two decimals; the live rating keeps full precision.
    pub fn commit(&mut self, key: &RatingKey, base_rating: f64, change: f64, record: TournamentRecord) -> f64 {
        let new_rating = (base_rating + change).max(self.elo_floor);

        self.get_or_initialize(key);
        if let Some(line) = self.ratings.get_mut(key) {
            line.rating = new_rating;
            line.history.push(HistoryEntry {
                date: record.date,
                tournament_id: record.tournament_id,
                place: record.place,
                rating_after: round_to_hundredths(new_rating),
                source_link: record.source_link,
                note: record.note
            });
        }

        let events = if key.category == OVERALL_CATEGORY {
            None
        } else {
            Some(self.season_event_count(key))
        };

        let meta = self.meta.entry((key.state.clone(), key.team.clone())).or_default();
        meta.games += record.opponents;
        if let Some(events) = events {
            meta.events = events;
        }

        new_rating
    }

    fn season_event_count(&self, key: &RatingKey) -> usize {
        let start = RatingKey::new(&key.state, &key.team, "", "");

        self.ratings
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(k, _)| k.state == key.state && k.team == key.team)
            .filter(|(k, _)| k.season == key.season && k.category != OVERALL_CATEGORY)
            .count()
    }

    pub fn states(&self) -> BTreeSet<String> {
        self.meta.keys().map(|(state, _)| state.clone()).collect()
    }

    /// Regroups the table as state -> team -> season -> category.
    pub fn into_output(self) -> BTreeMap<String, StateOutput> {
        let mut output: BTreeMap<String, StateOutput> = BTreeMap::new();

        for ((state, team), meta) in &self.meta {
            output.entry(state.clone()).or_default().insert(
                team.clone(),
                TeamOutput {
                    seasons: BTreeMap::new(),
                    meta: *meta
                }
            );
        }

        for (key, line) in self.ratings {
            if let Some(team) = output.get_mut(&key.state).and_then(|teams| teams.get_mut(&key.team)) {
                team.seasons
                    .entry(key.season)
                    .or_insert_with(SeasonOutput::default)
                    .events
                    .insert(key.category, line);
            }
        }

        output
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
