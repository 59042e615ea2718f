use serde::{Deserialize, Serialize};

use crate::{config::Config, model::structures::tournament_kind::TournamentKind};

/// Accumulated backtest loss, split by tournament kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossTotals {
    pub total_loss: f64,
    pub state_loss: f64,
    pub national_loss: f64,
    pub regular_loss: f64,
    pub tournaments_scored: usize
}

impl LossTotals {
    pub fn merge(&mut self, other: &LossTotals) {
        self.total_loss += other.total_loss;
        self.state_loss += other.state_loss;
        self.national_loss += other.national_loss;
        self.regular_loss += other.regular_loss;
        self.tournaments_scored += other.tournaments_scored;
    }
}

/// Scores how well pre-tournament ratings predicted the overall placements.
///
/// Read-only with respect to ratings; the loss is only used to compare
/// configurations against each other.
pub struct PredictionTracker {
    rank_weight_exponent: f64,
    state_loss_weight: f64,
    national_loss_weight: f64,
    totals: LossTotals
}

impl PredictionTracker {
    pub fn new(config: &Config) -> PredictionTracker {
        PredictionTracker {
            rank_weight_exponent: config.rank_weight_exponent,
            state_loss_weight: config.state_loss_weight,
            national_loss_weight: config.national_loss_weight,
            totals: LossTotals::default()
        }
    }

    /// Records one tournament. `field` holds each team's pre-update rating and
    /// actual place. Returns the weighted loss added to the totals.
    ///
    /// Teams are predicted in descending rating order (equal ratings share a
    /// place) and each miss costs `|predicted - actual| / actual^exponent`, so
    /// misses near the top weigh the most.
    pub fn observe(&mut self, field: &[(f64, u32)], kind: TournamentKind) -> f64 {
        if field.is_empty() {
            return 0.0;
        }

        let predicted = predicted_places(field);
        let loss: f64 = field
            .iter()
            .zip(predicted)
            .map(|((_, actual), predicted)| {
                let actual = f64::from((*actual).max(1));
                (f64::from(predicted) - actual).abs() / actual.powf(self.rank_weight_exponent)
            })
            .sum();

        let weighted = match kind {
            TournamentKind::National => loss * self.national_loss_weight,
            TournamentKind::State => loss * self.state_loss_weight,
            TournamentKind::Regular => loss
        };

        match kind {
            TournamentKind::National => self.totals.national_loss += weighted,
            TournamentKind::State => self.totals.state_loss += weighted,
            TournamentKind::Regular => self.totals.regular_loss += weighted
        }
        self.totals.total_loss += weighted;
        self.totals.tournaments_scored += 1;

        weighted
    }

    pub fn totals(&self) -> LossTotals {
        self.totals
    }
}

/// Predicted place of every entry, in input order.
fn predicted_places(field: &[(f64, u32)]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..field.len()).collect();
    order.sort_by(|a, b| field[*b].0.total_cmp(&field[*a].0));

    let mut places = vec![0; field.len()];
    let mut previous: Option<(f64, u32)> = None;
    for (index, i) in order.into_iter().enumerate() {
        let rating = field[i].0;
        let place = match previous {
            Some((previous_rating, previous_place)) if previous_rating == rating => previous_place,
            _ => index as u32 + 1
        };

        places[i] = place;
        previous = Some((rating, place));
    }

    places
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{predicted_places, LossTotals, PredictionTracker};
    use crate::{config::Config, model::structures::tournament_kind::TournamentKind};

    #[test]
    fn test_perfect_prediction_has_no_loss() {
        let mut tracker = PredictionTracker::new(&Config::default());

        let loss = tracker.observe(&[(1700.0, 1), (1600.0, 2), (1500.0, 3)], TournamentKind::Regular);

        assert_abs_diff_eq!(loss, 0.0);
        assert_eq!(tracker.totals().tournaments_scored, 1);
    }

    #[test]
    fn test_swapped_top_two() {
        let mut tracker = PredictionTracker::new(&Config::default());

        // Predicted 1, 2 but actual 2, 1: 1/2 + 1/1
        let loss = tracker.observe(&[(1700.0, 2), (1600.0, 1)], TournamentKind::Regular);

        assert_abs_diff_eq!(loss, 1.5);
        assert_abs_diff_eq!(tracker.totals().regular_loss, 1.5);
    }

    #[test]
    fn test_kind_weights() {
        let config = Config {
            national_loss_weight: 2.0,
            state_loss_weight: 0.5,
            ..Default::default()
        };
        let mut tracker = PredictionTracker::new(&config);
        let field = [(1700.0, 2), (1600.0, 1)];

        tracker.observe(&field, TournamentKind::National);
        tracker.observe(&field, TournamentKind::State);

        let totals = tracker.totals();
        assert_abs_diff_eq!(totals.national_loss, 3.0);
        assert_abs_diff_eq!(totals.state_loss, 0.75);
        assert_abs_diff_eq!(totals.total_loss, 3.75);
        assert_eq!(totals.tournaments_scored, 2);
    }

    #[test]
    fn test_equal_ratings_share_predicted_place() {
        assert_eq!(predicted_places(&[(1500.0, 1), (1600.0, 2), (1500.0, 3)]), vec![2, 1, 2]);
    }

    #[test]
    fn test_merge() {
        let mut a = LossTotals {
            total_loss: 1.0,
            regular_loss: 1.0,
            tournaments_scored: 1,
            ..Default::default()
        };
        let b = LossTotals {
            total_loss: 2.0,
            national_loss: 2.0,
            tournaments_scored: 3,
            ..Default::default()
        };

        a.merge(&b);

        assert_abs_diff_eq!(a.total_loss, 3.0);
        assert_abs_diff_eq!(a.national_loss, 2.0);
        assert_eq!(a.tournaments_scored, 4);
    }
}
