use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    model::structures::{
        participant::Participant, tournament_descriptor::TournamentDescriptor, tournament_kind::TournamentKind,
        tournament_record::TournamentRecord
    },
    results::{
        loader::LoadedTournament,
        result_structs::{Event, Placing, SeasonYear, Team, TournamentDocument, TournamentInfo},
        tournament_parser
    }
};

pub fn generate_team(number: i64, school: &str, state: &str) -> Team {
    Team {
        number,
        school: school.to_string(),
        state: Some(state.to_string())
    }
}

pub fn generate_placing(team: i64, event: &str, place: Option<u32>) -> Placing {
    Placing {
        team,
        event: event.to_string(),
        place
    }
}

/// A document with an empty `Tournament` block. Name, date and season then
/// come from the file name when parsed.
pub fn generate_document(teams: &[Team], events: &[&str], placings: &[Placing]) -> TournamentDocument {
    TournamentDocument {
        tournament: Some(TournamentInfo::default()),
        teams: teams.to_vec(),
        events: events
            .iter()
            .map(|name| Event {
                name: name.to_string()
            })
            .collect(),
        placings: placings.to_vec()
    }
}

/// Parses `document` as if it were read from `<filename>.yaml`, with `season`
/// as its declared year.
pub fn generate_loaded(filename: &str, season: &str, mut document: TournamentDocument) -> LoadedTournament {
    let info = document.tournament.get_or_insert_with(TournamentInfo::default);
    info.year = Some(SeasonYear::Text(season.to_string()));

    let path = PathBuf::from(format!("{}.yaml", filename));
    let descriptor = tournament_parser::parse(&path, &document).unwrap();

    LoadedTournament {
        path,
        document,
        descriptor
    }
}

/// A loaded tournament with no teams, for season filtering.
pub fn generate_loaded_tournament(filename: &str, season: &str) -> LoadedTournament {
    LoadedTournament {
        path: Path::new(filename).with_extension("yaml"),
        document: generate_document(&[], &[], &[]),
        descriptor: TournamentDescriptor {
            name: filename.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            season: season.to_string(),
            filename: filename.to_string(),
            kind: TournamentKind::Regular
        }
    }
}

pub fn generate_participant(name: &str, place: u32, rating: f64, prior_tournaments: usize) -> Participant {
    Participant {
        name: name.to_string(),
        place,
        rating,
        prior_tournaments,
        recent_ratings: Vec::new()
    }
}

/// Established teams (normal volatility) placed in the order given.
pub fn generate_participants(ratings: &[f64]) -> Vec<Participant> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| generate_participant(&format!("Team {}", i + 1), i as u32 + 1, *rating, 2))
        .collect()
}

pub fn generate_record(tournament_id: usize, place: u32) -> TournamentRecord {
    TournamentRecord {
        date: "2024-01-21".to_string(),
        tournament_id,
        place,
        source_link: format!("https://www.duosmium.org/results/tournament_{}", tournament_id),
        note: None,
        opponents: 1
    }
}
