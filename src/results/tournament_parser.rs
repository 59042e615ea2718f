use std::path::Path;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{
    error::{ProcessorError, Result},
    model::structures::{tournament_descriptor::TournamentDescriptor, tournament_kind::TournamentKind},
    results::result_structs::TournamentDocument,
    utils::state_names::state_name
};

lazy_static! {
    static ref NATIONALS: Regex = Regex::new(r"(?i)\bnationals\b").unwrap();
    static ref BRACKETED_STATE: Regex = Regex::new(r"\[([^,]+),\s*([A-Z]{2})\]").unwrap();
    static ref STATE_STATES: Regex = Regex::new(r"(?i)\b([a-z]?)([a-z]{2})\s+states\b").unwrap();
    static ref NATIONAL_TEXT: Regex = Regex::new(r"national tournament|nationals|national championship").unwrap();
    static ref STATE_TEXT: Regex = Regex::new(r"state tournament|states|state championship").unwrap();
}

const NATIONAL_TOURNAMENT_NAME: &str = "Science Olympiad National Tournament";

/// Normalizes one result document into a [`TournamentDescriptor`].
///
/// The descriptor's date is the declared start date (or the file name's leading
/// `YYYY-MM-DD`) moved forward one day, which is what the published data uses.
pub fn parse(path: &Path, document: &TournamentDocument) -> Result<TournamentDescriptor> {
    let filename = file_stem(path);
    let info = document
        .tournament
        .as_ref()
        .ok_or_else(|| ProcessorError::MissingTournament { path: path.to_path_buf() })?;

    let raw_name = info
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| name_from_filename(&filename));
    let name = process_tournament_name(&raw_name);

    let declared_date = match &info.start_date {
        Some(value) => Some(parse_date(value).ok_or_else(|| ProcessorError::InvalidDate {
            path: path.to_path_buf(),
            value: value.clone()
        })?),
        None => None
    };
    let base_date = declared_date
        .or_else(|| filename_date(&filename))
        .ok_or_else(|| ProcessorError::InvalidDate {
            path: path.to_path_buf(),
            value: filename.clone()
        })?;
    let date = base_date.succ_opt().unwrap_or(base_date);

    let season = info
        .year
        .as_ref()
        .and_then(|year| year.as_season())
        .or_else(|| declared_date.map(|d| d.year().to_string()))
        .or_else(|| filename_date(&filename).map(|d| d.year().to_string()))
        .ok_or_else(|| ProcessorError::MissingSeason { path: path.to_path_buf() })?;

    let search_text = [
        Some(name.as_str()),
        Some(raw_name.as_str()),
        Some(filename.as_str()),
        info.level.as_deref()
    ]
    .into_iter()
    .flatten()
    .join(" ");

    Ok(TournamentDescriptor {
        name,
        date,
        season,
        filename,
        kind: classify(&search_text)
    })
}

/// Replaces `nationals` and the two state-tournament spellings found in result
/// file names with their display names.
pub fn process_tournament_name(raw: &str) -> String {
    let name = NATIONALS.replace_all(raw, NATIONAL_TOURNAMENT_NAME);

    let name = BRACKETED_STATE.replace_all(&name, |caps: &Captures| {
        format!("{} Science Olympiad State Tournament", state_name(&caps[2]))
    });

    let name = STATE_STATES.replace_all(&name, |caps: &Captures| {
        let prefix = caps[1].to_lowercase();
        let code = caps[2].to_uppercase();
        let state = match (code.as_str(), prefix.as_str()) {
            ("CA", "s") => "Southern California".to_string(),
            ("CA", "n") => "Northern California".to_string(),
            _ => state_name(&code)
        };

        format!("{} Science Olympiad State Tournament", state)
    });

    name.into_owned()
}

/// National wins over state when both phrases appear.
pub fn classify(text: &str) -> TournamentKind {
    let lower = text.to_lowercase();

    if NATIONAL_TEXT.is_match(&lower) {
        TournamentKind::National
    } else if STATE_TEXT.is_match(&lower) {
        TournamentKind::State
    } else {
        TournamentKind::Regular
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `2024-01-27_mit_invitational_c` -> `mit invitational`
fn name_from_filename(filename: &str) -> String {
    let parts: Vec<&str> = filename.split('_').collect();
    if parts.len() <= 2 {
        return String::new();
    }

    parts[1..parts.len() - 1].join(" ")
}

fn filename_date(filename: &str) -> Option<NaiveDate> {
    filename.split('_').next().and_then(parse_date)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| trimmed.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()))
}
