use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::{
    error::{ProcessorError, Result},
    model::{
        constants::{JV_SUFFIX, VARSITY_SUFFIX},
        structures::ranking_entry::RankingEntry
    },
    results::result_structs::{Placing, TournamentDocument}
};

/// Rankings for one tournament, keyed by canonical team name.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTournament {
    pub overall: Vec<RankingEntry>,
    /// Event name -> ranking. Events nobody placed in are absent.
    pub events: IndexMap<String, Vec<RankingEntry>>,
    pub team_states: HashMap<String, String>,
    /// Canonical names in first-seen order (per school: Varsity, then JV).
    pub team_names: Vec<String>,
    /// Every declared event, including ones with no finishers.
    pub event_names: Vec<String>
}

/// Builds canonical Varsity/JV rankings for a single tournament.
///
/// A team with no place in any event is a no-show and is ignored throughout. A
/// team that competed but has no place in some event is scored one worse than
/// that event's number of finishers, both in the event ranking and in its
/// overall total.
pub fn resolve(document: &TournamentDocument) -> Result<ResolvedTournament> {
    for team in &document.teams {
        if team.state.as_deref().map_or(true, |state| state.trim().is_empty()) {
            return Err(ProcessorError::MissingStateCode {
                number: team.number,
                school: team.school.clone()
            });
        }
    }

    let mut placings_by_team: HashMap<i64, Vec<&Placing>> = HashMap::new();
    for placing in &document.placings {
        placings_by_team.entry(placing.team).or_default().push(placing);
    }

    let place_in = |team: i64, event: &str| -> Option<u32> {
        placings_by_team
            .get(&team)
            .and_then(|placings| placings.iter().find(|p| p.event == event))
            .and_then(|p| p.scored_place())
    };

    let no_shows: HashSet<i64> = document
        .teams
        .iter()
        .filter(|team| {
            placings_by_team
                .get(&team.number)
                .map_or(true, |placings| placings.iter().all(|p| p.scored_place().is_none()))
        })
        .map(|team| team.number)
        .collect();

    let competitor_counts: IndexMap<&str, u32> = document
        .events
        .iter()
        .map(|event| {
            let competitors: HashSet<i64> = document
                .placings
                .iter()
                .filter(|p| p.event == event.name && p.scored_place().is_some() && !no_shows.contains(&p.team))
                .map(|p| p.team)
                .collect();
            (event.name.as_str(), competitors.len() as u32)
        })
        .collect();

    let active: Vec<_> = document
        .teams
        .iter()
        .filter(|team| !no_shows.contains(&team.number))
        .collect();

    let total_scores: HashMap<i64, u32> = active
        .iter()
        .map(|team| {
            let total: u32 = competitor_counts
                .iter()
                .map(|(event, count)| place_in(team.number, event).unwrap_or(count + 1))
                .sum();
            (team.number, total)
        })
        .collect();

    // Group by school in first-seen order, best total first
    let mut by_school: IndexMap<&str, Vec<i64>> = IndexMap::new();
    for team in &active {
        by_school.entry(team.school.as_str()).or_default().push(team.number);
    }

    let mut canonical: HashMap<i64, String> = HashMap::new();
    let mut resolved = ResolvedTournament::default();

    for (school, mut numbers) in by_school {
        numbers.sort_by_key(|number| total_scores.get(number).copied().unwrap_or(u32::MAX));

        for (number, suffix) in numbers.iter().zip([VARSITY_SUFFIX, JV_SUFFIX]) {
            let name = format!("{}{}", school, suffix);
            if let Some(state) = active.iter().find(|t| t.number == *number).and_then(|t| t.state.clone()) {
                resolved.team_states.insert(name.clone(), state);
            }
            resolved.team_names.push(name.clone());
            canonical.insert(*number, name);
        }
    }

    let ranked = |score_of: &dyn Fn(i64) -> u32| -> Vec<RankingEntry> {
        dense_rank(
            active
                .iter()
                .filter_map(|team| canonical.get(&team.number).map(|name| (name.clone(), score_of(team.number))))
                .collect()
        )
    };

    resolved.overall = ranked(&|number: i64| total_scores.get(&number).copied().unwrap_or_default());

    for (event, count) in &competitor_counts {
        resolved.event_names.push(event.to_string());
        if *count == 0 {
            continue;
        }

        let ranking = ranked(&|number: i64| place_in(number, event).unwrap_or(count + 1));
        resolved.events.insert(event.to_string(), ranking);
    }

    Ok(resolved)
}

/// Sorts ascending by score (stable) and assigns places. Equal scores share a
/// place; the next distinct score takes its 1-based index, so `[3, 3, 5]` ranks
/// as `[1, 1, 3]`.
pub fn dense_rank(mut scores: Vec<(String, u32)>) -> Vec<RankingEntry> {
    scores.sort_by_key(|(_, score)| *score);

    let mut ranking: Vec<RankingEntry> = Vec::with_capacity(scores.len());
    for (index, (team_name, score)) in scores.into_iter().enumerate() {
        let place = match ranking.last() {
            Some(previous) if previous.score == score => previous.place,
            _ => index as u32 + 1
        };

        ranking.push(RankingEntry { team_name, score, place });
    }

    ranking
}

/// `"Troy High School JV"` -> `"Troy High School"`
pub fn school_of(team_name: &str) -> &str {
    team_name
        .strip_suffix(VARSITY_SUFFIX)
        .or_else(|| team_name.strip_suffix(JV_SUFFIX))
        .unwrap_or(team_name)
}

pub fn is_varsity(team_name: &str) -> bool {
    team_name.ends_with(VARSITY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::{dense_rank, is_varsity, resolve, school_of};
    use crate::{
        error::ProcessorError,
        utils::test_utils::{generate_document, generate_placing, generate_team}
    };

    fn places(ranking: &[crate::model::structures::ranking_entry::RankingEntry]) -> Vec<(String, u32, u32)> {
        ranking
            .iter()
            .map(|e| (e.team_name.clone(), e.score, e.place))
            .collect()
    }

    #[test]
    fn test_dense_rank_ties() {
        let ranking = dense_rank(vec![("a".to_string(), 3), ("b".to_string(), 5), ("c".to_string(), 3)]);

        let placed: Vec<(&str, u32)> = ranking.iter().map(|e| (e.team_name.as_str(), e.place)).collect();
        assert_eq!(placed, vec![("a", 1), ("c", 1), ("b", 3)]);
    }

    #[test]
    fn test_dense_rank_empty() {
        assert!(dense_rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_missing_state_is_fatal() {
        let mut document = generate_document(
            &[generate_team(1, "Troy", "CA"), generate_team(2, "Solon", "OH")],
            &["Anatomy"],
            &[generate_placing(1, "Anatomy", Some(1)), generate_placing(2, "Anatomy", Some(2))]
        );
        document.teams[1].state = None;

        let err = resolve(&document).unwrap_err();

        assert!(matches!(err, ProcessorError::MissingStateCode { number: 2, .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_no_show_is_excluded() {
        let document = generate_document(
            &[
                generate_team(1, "Troy", "CA"),
                generate_team(2, "Solon", "OH"),
                generate_team(3, "Mason", "OH"),
            ],
            &["Anatomy", "Codebusters"],
            &[
                generate_placing(1, "Anatomy", Some(1)),
                generate_placing(2, "Anatomy", Some(2)),
                generate_placing(3, "Anatomy", None),
                generate_placing(1, "Codebusters", Some(2)),
                generate_placing(2, "Codebusters", Some(1)),
                generate_placing(3, "Codebusters", Some(0)),
            ]
        );

        let resolved = resolve(&document).unwrap();

        assert_eq!(resolved.overall.len(), 2);
        assert!(resolved.overall.iter().all(|e| e.team_name != "Mason Varsity"));
        assert!(!resolved.team_states.contains_key("Mason Varsity"));
        for ranking in resolved.events.values() {
            assert_eq!(ranking.len(), 2);
        }
    }

    #[test]
    fn test_missing_event_penalty() {
        let teams: Vec<_> = (1..=6)
            .map(|n| generate_team(n, &format!("School {}", n), "OH"))
            .collect();
        let mut placings: Vec<_> = (1..=5).map(|n| generate_placing(n, "Anatomy", Some(n as u32))).collect();
        // Team 6 only competes in Codebusters
        placings.extend((1..=6).map(|n| generate_placing(n, "Codebusters", Some(n as u32))));

        let document = generate_document(&teams, &["Anatomy", "Codebusters"], &placings);
        let resolved = resolve(&document).unwrap();

        let anatomy = &resolved.events["Anatomy"];
        let skipped = anatomy.iter().find(|e| e.team_name == "School 6 Varsity").unwrap();
        assert_eq!(skipped.score, 6);
        assert_eq!(skipped.place, 6);

        let overall = resolved
            .overall
            .iter()
            .find(|e| e.team_name == "School 6 Varsity")
            .unwrap();
        assert_eq!(overall.score, 6 + 6);
    }

    #[test]
    fn test_varsity_jv_split() {
        let document = generate_document(
            &[
                generate_team(1, "Troy", "CA"),
                generate_team(2, "Troy", "CA"),
                generate_team(3, "Troy", "CA"),
                generate_team(4, "Solon", "OH"),
            ],
            &["Anatomy"],
            &[
                generate_placing(1, "Anatomy", Some(3)),
                generate_placing(2, "Anatomy", Some(1)),
                generate_placing(3, "Anatomy", Some(4)),
                generate_placing(4, "Anatomy", Some(2)),
            ]
        );

        let resolved = resolve(&document).unwrap();

        assert_eq!(resolved.team_names, vec!["Troy Varsity", "Troy JV", "Solon Varsity"]);
        assert_eq!(
            places(&resolved.overall),
            vec![
                ("Troy Varsity".to_string(), 1, 1),
                ("Solon Varsity".to_string(), 2, 2),
                ("Troy JV".to_string(), 3, 3),
            ]
        );
        assert_eq!(resolved.team_states["Troy JV"], "CA");
    }

    #[test]
    fn test_event_without_finishers_is_registered_but_unranked() {
        let document = generate_document(
            &[generate_team(1, "Troy", "CA"), generate_team(2, "Solon", "OH")],
            &["Anatomy", "Cancelled Event"],
            &[generate_placing(1, "Anatomy", Some(1)), generate_placing(2, "Anatomy", Some(2))]
        );

        let resolved = resolve(&document).unwrap();

        assert_eq!(resolved.event_names, vec!["Anatomy", "Cancelled Event"]);
        assert!(resolved.events.contains_key("Anatomy"));
        assert!(!resolved.events.contains_key("Cancelled Event"));
        // The cancelled event adds 0 + 1 to every total
        assert_eq!(resolved.overall[0].score, 2);
    }

    #[test]
    fn test_school_of() {
        assert_eq!(school_of("Troy High School Varsity"), "Troy High School");
        assert_eq!(school_of("Troy High School JV"), "Troy High School");
        assert!(is_varsity("Troy Varsity"));
        assert!(!is_varsity("Troy JV"));
    }
}
