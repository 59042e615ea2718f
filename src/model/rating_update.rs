use itertools::Itertools;

use crate::{
    config::Config,
    model::{
        constants::{COMPETITIVENESS_PIVOT, ELO_DIVISOR, TREND_MULTIPLIER_MAX, TREND_MULTIPLIER_MIN},
        structures::{participant::Participant, tie_score::TieScore, tournament_kind::TournamentKind}
    }
};

/// Field-wide inputs that do not depend on any single participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldContext {
    pub importance: f64
}

impl FieldContext {
    pub fn new(kind: TournamentKind, config: &Config) -> FieldContext {
        FieldContext {
            importance: importance_multiplier(kind, config)
        }
    }
}

/// # Category update
///
/// Computes the rating change of every participant in one category (overall or
/// a single event) at one tournament. Output order matches `participants`.
///
/// Steps:
/// 1. Per-team modifiers: volatility from the number of prior tournaments, and
///     a trend multiplier from the recent history.
/// 2. Field modifiers: competitiveness from the strongest part of the field by
///     current rating, and the tournament importance in `context`.
/// 3. Round-robin expected vs. actual score against every other participant,
///     each divided by the number of opponents. An exact tie is credited with
///     `tie`.
/// 4. Scale, apply modifiers, then [`damp`].
/// 5. Subtract the mean change so the field's total rating is unchanged.
/// 6. Clamp losses at `-max_elo_loss`.
///
/// Nothing is mutated; callers commit the returned changes.
pub fn compute_category_update(
    participants: &[Participant],
    context: &FieldContext,
    config: &Config,
    tie: TieScore
) -> Vec<f64> {
    let n = participants.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let ratings: Vec<f64> = participants.iter().map(|p| p.rating).collect();
    let competitiveness = competitiveness_multiplier(&ratings, config);
    let opponents = (n - 1) as f64;

    let damped: Vec<f64> = participants
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let (expected, actual) = participants
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold((0.0, 0.0), |(expected, actual), (_, other)| {
                    let credit = if team.place < other.place {
                        1.0
                    } else if team.place == other.place {
                        tie.value()
                    } else {
                        0.0
                    };

                    (expected + expected_score(team.rating, other.rating), actual + credit)
                });

            let raw_change = config.elo_performance_scaling_factor * (actual / opponents - expected / opponents);
            let scaled_change = raw_change
                * volatility_factor(team.prior_tournaments, config)
                * competitiveness
                * context.importance
                * trend_multiplier(&team.recent_ratings, raw_change, config);

            damp(scaled_change, config)
        })
        .collect();

    let mean = damped.iter().sum::<f64>() / n as f64;

    damped
        .into_iter()
        .map(|change| (change - mean).max(-config.max_elo_loss))
        .collect()
}

/// Chance that a team rated `rating` places ahead of one rated `opponent`.
/// Written on the difference so very large ratings stay finite.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / ELO_DIVISOR))
}

/// New teams move faster: first tournament, second tournament, then normal.
pub fn volatility_factor(prior_tournaments: usize, config: &Config) -> f64 {
    match prior_tournaments {
        0 => config.first_tournament_volatility,
        1 => config.second_tournament_volatility,
        _ => config.normal_volatility
    }
}

/// Amplifies changes that continue a team's recent direction and softens those
/// that go against it.
///
/// The mean per-step change over `recent_ratings` is passed through
/// `tanh(mean / trend_scale)` and weighted by `trend_weight`. Returns 1.0 with
/// fewer than 2 ratings or a zero weight.
pub fn trend_multiplier(recent_ratings: &[f64], change: f64, config: &Config) -> f64 {
    if recent_ratings.len() < 2 || config.trend_weight == 0.0 || config.trend_scale <= 0.0 {
        return 1.0;
    }

    let window = &recent_ratings[recent_ratings.len().saturating_sub(config.trend_window.max(2))..];
    let steps = (window.len() - 1) as f64;
    let mean_step = (window[window.len() - 1] - window[0]) / steps;
    let trend = config.trend_weight * (mean_step / config.trend_scale).tanh();

    let multiplier = if change >= 0.0 { 1.0 + trend } else { 1.0 - trend };
    multiplier.clamp(TREND_MULTIPLIER_MIN, TREND_MULTIPLIER_MAX)
}

/// Linear in the mean rating of the top `top_teams_fraction` of the field
/// (at least one team), pivoting on 1500.
pub fn competitiveness_multiplier(ratings: &[f64], config: &Config) -> f64 {
    if ratings.is_empty() {
        return 1.0;
    }

    let top_count = ((ratings.len() as f64 * config.top_teams_fraction).floor() as usize).clamp(1, ratings.len());
    let average = ratings
        .iter()
        .sorted_by(|a, b| b.total_cmp(a))
        .take(top_count)
        .sum::<f64>()
        / top_count as f64;

    1.0 + config.tournament_competitiveness_factor * (average - COMPETITIVENESS_PIVOT) / COMPETITIVENESS_PIVOT
}

pub fn importance_multiplier(kind: TournamentKind, config: &Config) -> f64 {
    match kind {
        TournamentKind::National => config.national_tournament_multiplier * config.national_trend_multiplier,
        TournamentKind::State => config.state_tournament_multiplier * config.state_trend_multiplier,
        TournamentKind::Regular => 1.0
    }
}

/// Saturating damping: larger swings lose a larger share, up to `elo_damping_strength`.
pub fn damp(change: f64, config: &Config) -> f64 {
    let normalized = change.abs() / config.elo_damping_scale;
    change * (1.0 - config.elo_damping_strength * (normalized / (1.0 + normalized)))
}
