use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    model::{
        constants::{DEMOTION_NOTE, JV_SUFFIX, OVERALL_CATEGORY},
        prediction_tracker::{LossTotals, PredictionTracker},
        rating_tracker::RatingTracker,
        rating_update::{compute_category_update, FieldContext},
        registry::Registry,
        structures::{
            division::Division, participant::Participant, ranking_entry::RankingEntry, rating_key::RatingKey,
            tie_score::TieScore, tournament_kind::TournamentKind, tournament_record::TournamentRecord
        },
        team_resolver::{self, is_varsity, school_of}
    },
    output::output_structs::StateOutput,
    results::loader::LoadedTournament,
    utils::progress_utils::progress_bar
};

/// Per-tournament values shared by every category update.
#[derive(Debug, Clone)]
pub struct TournamentContext {
    pub tournament_id: usize,
    pub name: String,
    pub date: String,
    pub season: String,
    pub kind: TournamentKind,
    pub source_link: String,
    pub field: FieldContext
}

/// Loss of a single national tournament, reported when `printLoss` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct NationalLoss {
    pub name: String,
    pub date: String,
    pub teams: usize,
    pub loss: f64
}

/// Everything a finished division run produces.
pub struct DivisionResult {
    pub division: Division,
    pub states: BTreeMap<String, StateOutput>,
    pub registry: Registry,
    pub loss: LossTotals,
    pub national_losses: Vec<NationalLoss>
}

/// A participant together with the rating line it was read from.
struct Entrant {
    key: RatingKey,
    participant: Participant
}

/// Rates one division. Owns the registry and rating table for that division;
/// divisions never share state.
pub struct EloModel {
    pub division: Division,
    pub config: Config,
    pub registry: Registry,
    pub rating_tracker: RatingTracker,
    pub prediction_tracker: PredictionTracker,
    national_losses: Vec<NationalLoss>
}

impl EloModel {
    pub fn new(division: Division, config: &Config) -> EloModel {
        EloModel {
            division,
            config: config.clone(),
            registry: Registry::new(),
            rating_tracker: RatingTracker::new(config),
            prediction_tracker: PredictionTracker::new(config),
            national_losses: Vec::new()
        }
    }

    /// Processes tournaments in the given order. Stops at the first error, which
    /// can only be a fatal one.
    pub fn process(&mut self, tournaments: &[LoadedTournament]) -> Result<()> {
        let bar = progress_bar(tournaments.len() as u64, format!("Division {}", self.division));

        for tournament in tournaments {
            self.process_tournament(tournament)?;
            bar.inc(1);
        }

        bar.finish_and_clear();
        Ok(())
    }

    /// # Tournament processing
    ///
    /// Steps:
    /// 1. Resolve canonical Varsity/JV teams and rankings. A team without a
    ///     state code aborts the run.
    /// 2. Register the tournament, teams and events.
    /// 3. Score the pre-update ratings against the overall placements.
    /// 4. Update the overall category, with JV demotion.
    /// 5. Update every event category.
    pub fn process_tournament(&mut self, tournament: &LoadedTournament) -> Result<()> {
        let resolved = team_resolver::resolve(&tournament.document)?;
        let descriptor = &tournament.descriptor;

        let context = TournamentContext {
            tournament_id: self.registry.tournament_id(&descriptor.name),
            name: descriptor.name.clone(),
            date: descriptor.date_string(),
            season: descriptor.season.clone(),
            kind: descriptor.kind,
            source_link: format!("{}{}", self.config.link_prefix, descriptor.filename),
            field: FieldContext::new(descriptor.kind, &self.config)
        };

        for team in &resolved.team_names {
            self.registry.team_id(team);
        }
        for event in &resolved.event_names {
            self.registry.event_id(event);
        }

        debug!(
            "Processing {} from {} ({}, {}, {} teams)",
            context.name,
            tournament.path.display(),
            context.date,
            context.kind,
            resolved.overall.len()
        );

        self.observe_prediction(&context, &resolved.overall, &resolved.team_states);
        self.update_overall(&context, &resolved.overall, &resolved.team_states);

        for (event, ranking) in &resolved.events {
            self.update_category(&context, event, ranking, &resolved.team_states);
        }

        Ok(())
    }

    fn observe_prediction(
        &mut self,
        context: &TournamentContext,
        ranking: &[RankingEntry],
        team_states: &HashMap<String, String>
    ) {
        let entrants = self.entrants(context, OVERALL_CATEGORY, ranking, team_states);
        if entrants.len() < 2 {
            return;
        }

        let field: Vec<(f64, u32)> = entrants
            .iter()
            .map(|e| (e.participant.rating, e.participant.place))
            .collect();
        let loss = self.prediction_tracker.observe(&field, context.kind);

        if context.kind == TournamentKind::National {
            info!(
                "[Nationals loss] {} ({}) teams={} loss={:.2}",
                context.name,
                context.date,
                field.len(),
                loss
            );
            self.national_losses.push(NationalLoss {
                name: context.name.clone(),
                date: context.date.clone(),
                teams: field.len(),
                loss
            });
        }
    }

    /// Builds the participant list of a category, creating rating lines as needed.
    /// A category with fewer than two teams yields nothing and creates nothing.
    fn entrants(
        &mut self,
        context: &TournamentContext,
        category: &str,
        ranking: &[RankingEntry],
        team_states: &HashMap<String, String>
    ) -> Vec<Entrant> {
        if ranking.len() < 2 {
            return Vec::new();
        }

        let window = self.config.trend_window;

        ranking
            .iter()
            .filter_map(|entry| {
                let state = team_states.get(&entry.team_name)?;
                let key = RatingKey::new(state, &entry.team_name, &context.season, category);
                let line = self.rating_tracker.get_or_initialize(&key);
                let recent_ratings = line.history[line.history.len().saturating_sub(window)..]
                    .iter()
                    .map(|h| h.rating_after)
                    .collect();

                let participant = Participant {
                    name: entry.team_name.clone(),
                    place: entry.place,
                    rating: line.rating,
                    prior_tournaments: line.history.len(),
                    recent_ratings
                };

                Some(Entrant { key, participant })
            })
            .collect()
    }

    /// Updates one event category. Categories with fewer than two participants
    /// are left alone.
    pub fn update_category(
        &mut self,
        context: &TournamentContext,
        category: &str,
        ranking: &[RankingEntry],
        team_states: &HashMap<String, String>
    ) {
        let entrants = self.entrants(context, category, ranking, team_states);
        if entrants.len() < 2 {
            return;
        }

        let participants: Vec<Participant> = entrants.iter().map(|e| e.participant.clone()).collect();
        let changes = compute_category_update(&participants, &context.field, &self.config, TieScore::FullWin);
        log_changes(category, &participants, &changes);

        let opponents = (entrants.len() - 1) as u32;
        for (entrant, change) in entrants.iter().zip(changes) {
            self.commit(context, entrant, &entrant.key, change, opponents, None);
        }
    }

    /// Updates the overall category.
    ///
    /// At regular tournaments, a school whose best team is its Varsity and
    /// which loses more than `jv_loss_threshold` is treated as having sent its
    /// JV. The field is re-rated with that team renamed to JV, the school's own
    /// JV left out and ties split 0.5/0.5. The renamed team is committed into
    /// the school's JV line from its Varsity rating, with a note. The left-out
    /// JV gets no update for this tournament. Everyone else keeps the result of
    /// the first pass.
    pub fn update_overall(
        &mut self,
        context: &TournamentContext,
        ranking: &[RankingEntry],
        team_states: &HashMap<String, String>
    ) {
        let entrants = self.entrants(context, OVERALL_CATEGORY, ranking, team_states);
        if entrants.len() < 2 {
            return;
        }

        let participants: Vec<Participant> = entrants.iter().map(|e| e.participant.clone()).collect();
        let changes = compute_category_update(&participants, &context.field, &self.config, TieScore::FullWin);
        log_changes(OVERALL_CATEGORY, &participants, &changes);

        let demoted = if context.kind.is_state_or_national() {
            HashSet::new()
        } else {
            self.demoted_schools(&participants, &changes)
        };

        let opponents = (entrants.len() - 1) as u32;
        if demoted.is_empty() {
            for (entrant, change) in entrants.iter().zip(changes) {
                self.commit(context, entrant, &entrant.key, change, opponents, None);
            }
            return;
        }

        // Second pass without the demoted schools' JV teams
        let rerun: Vec<&Entrant> = entrants
            .iter()
            .filter(|e| {
                let school = school_of(&e.participant.name);
                !(demoted.contains(school) && !is_varsity(&e.participant.name))
            })
            .collect();
        let rerun_participants: Vec<Participant> = rerun
            .iter()
            .map(|e| {
                let mut participant = e.participant.clone();
                if demoted.contains(school_of(&participant.name)) {
                    participant.name = jv_name(&participant.name);
                }
                participant
            })
            .collect();
        let rerun_changes = compute_category_update(&rerun_participants, &context.field, &self.config, TieScore::Split);
        let rerun_opponents = (rerun.len() - 1) as u32;

        let rerun_by_name: HashMap<&str, f64> = rerun
            .iter()
            .zip(&rerun_changes)
            .map(|(e, change)| (e.participant.name.as_str(), *change))
            .collect();

        for (entrant, change) in entrants.iter().zip(changes) {
            let school = school_of(&entrant.participant.name);
            if !demoted.contains(school) {
                self.commit(context, entrant, &entrant.key, change, opponents, None);
                continue;
            }

            // The demoted school's own JV sits this tournament out
            let Some(rerun_change) = rerun_by_name.get(entrant.participant.name.as_str()).copied() else {
                continue;
            };

            let jv = jv_name(&entrant.participant.name);
            self.registry.team_id(&jv);
            let jv_key = RatingKey::new(&entrant.key.state, &jv, &entrant.key.season, &entrant.key.category);

            info!(
                "{}: converted {} to JV after a {:.1} drop (re-rated change {:.1})",
                context.name, entrant.participant.name, change, rerun_change
            );
            self.commit(
                context,
                entrant,
                &jv_key,
                rerun_change,
                rerun_opponents,
                Some(DEMOTION_NOTE.to_string())
            );
        }
    }

    /// Schools whose best-placed team is the Varsity and whose first-pass loss
    /// exceeds the threshold.
    fn demoted_schools<'a>(&self, participants: &'a [Participant], changes: &[f64]) -> HashSet<&'a str> {
        let mut best: BTreeMap<&str, (usize, u32)> = BTreeMap::new();
        for (i, participant) in participants.iter().enumerate() {
            let school = school_of(&participant.name);
            match best.get(school) {
                Some((_, place)) if *place <= participant.place => {}
                _ => {
                    best.insert(school, (i, participant.place));
                }
            }
        }

        best.into_iter()
            .filter(|(_, (i, _))| {
                let participant = &participants[*i];
                is_varsity(&participant.name)
                    && participant.rating >= self.config.jv_min_rating
                    && -changes[*i] > self.config.jv_loss_threshold
            })
            .map(|(school, _)| school)
            .collect()
    }

    fn commit(
        &mut self,
        context: &TournamentContext,
        entrant: &Entrant,
        key: &RatingKey,
        change: f64,
        opponents: u32,
        note: Option<String>
    ) {
        let record = TournamentRecord {
            date: context.date.clone(),
            tournament_id: context.tournament_id,
            place: entrant.participant.place,
            source_link: context.source_link.clone(),
            note,
            opponents
        };

        self.rating_tracker
            .commit(key, entrant.participant.rating, change, record);
    }

    pub fn finish(self) -> DivisionResult {
        info!(
            "Division {}: rated {} teams across {} states",
            self.division,
            self.registry.teams().len(),
            self.rating_tracker.states().len()
        );

        DivisionResult {
            division: self.division,
            loss: self.prediction_tracker.totals(),
            states: self.rating_tracker.into_output(),
            registry: self.registry,
            national_losses: self.national_losses
        }
    }
}

fn jv_name(varsity_name: &str) -> String {
    format!("{}{}", school_of(varsity_name), JV_SUFFIX)
}

fn log_changes(category: &str, participants: &[Participant], changes: &[f64]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let min_rating = participants.iter().map(|p| p.rating).fold(f64::INFINITY, f64::min);
    let max_rating = participants.iter().map(|p| p.rating).fold(f64::NEG_INFINITY, f64::max);
    let max_gain = changes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_loss = changes.iter().copied().fold(f64::INFINITY, f64::min);

    debug!(
        "  {}: {} teams, ratings {:.1}..{:.1}, max gain {:.1}, max loss {:.1}",
        category,
        participants.len(),
        min_rating,
        max_rating,
        max_gain,
        max_loss
    );
}
