/// Composite key of the rating table.
///
/// Field order drives the derived `Ord`: all seasons of one category sit next
/// to each other, which is what the season carry-over lookup scans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatingKey {
    pub state: String,
    pub team: String,
    pub category: String,
    pub season: String
}

impl RatingKey {
    pub fn new(state: &str, team: &str, season: &str, category: &str) -> RatingKey {
        RatingKey {
            state: state.to_owned(),
            team: team.to_owned(),
            category: category.to_owned(),
            season: season.to_owned()
        }
    }

    pub fn same_line(&self, other: &RatingKey) -> bool {
        self.state == other.state && self.team == other.team && self.category == other.category
    }
}
