/// What gets written into a team's history when a category update is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentRecord {
    pub date: String,
    pub tournament_id: usize,
    pub place: u32,
    pub source_link: String,
    pub note: Option<String>,
    /// Participants in the category minus one.
    pub opponents: u32
}
