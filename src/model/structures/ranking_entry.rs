/// One team's line in an overall or per-event ranking.
/// `score` is total placement points, lower is better.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub team_name: String,
    pub score: u32,
    pub place: u32
}
