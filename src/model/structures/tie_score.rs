/// Credit a team receives against an opponent with the exact same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieScore {
    /// Both sides are credited a full win. Used by the primary update pass.
    FullWin,
    /// Conventional half point each. Used when re-rating after a JV demotion.
    Split
}

impl TieScore {
    pub fn value(&self) -> f64 {
        match self {
            TieScore::FullWin => 1.0,
            TieScore::Split => 0.5
        }
    }
}
