/// Everything the update computation needs to know about one team in one category,
/// captured before any rating in the field is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub place: u32,
    pub rating: f64,
    /// Number of tournaments already recorded for this team in this category and season.
    pub prior_tournaments: usize,
    /// `rating_after` values of the most recent history entries, oldest first.
    pub recent_ratings: Vec<f64>
}
