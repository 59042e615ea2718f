// Category keys
pub const OVERALL_CATEGORY: &str = "__OVERALL__";
// Canonical team name suffixes
pub const VARSITY_SUFFIX: &str = " Varsity";
pub const JV_SUFFIX: &str = " JV";
// Field strength pivot for the competitiveness multiplier
pub const COMPETITIVENESS_PIVOT: f64 = 1500.0;
// Elo logistic base divisor
pub const ELO_DIVISOR: f64 = 400.0;
// Trend multiplier bounds
pub const TREND_MULTIPLIER_MIN: f64 = 0.5;
pub const TREND_MULTIPLIER_MAX: f64 = 1.5;
pub const DEMOTION_NOTE: &str = "Converted from Varsity due to large ELO drop";
