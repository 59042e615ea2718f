use std::{
    fs,
    path::{Path, PathBuf}
};

use tracing::{debug, warn};

use crate::{
    error::{ProcessorError, Result},
    model::structures::{division::Division, tournament_descriptor::TournamentDescriptor},
    results::{result_structs::TournamentDocument, tournament_parser}
};

/// A result file that was read, parsed and normalized.
#[derive(Debug, Clone)]
pub struct LoadedTournament {
    pub path: PathBuf,
    pub document: TournamentDocument,
    pub descriptor: TournamentDescriptor
}

/// Recursively collects every `*_<division>.yaml` under `results_dir`, sorted by
/// path. Processing order is significant: ratings are path dependent.
pub fn discover_files(results_dir: &Path, division: Division) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(results_dir, &division.file_suffix(), &mut files)?;
    files.sort();

    Ok(files)
}

fn collect_files(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| ProcessorError::Io {
        path: dir.to_path_buf(),
        source
    })?;

    for entry in entries {
        let path = entry
            .map_err(|source| ProcessorError::Io {
                path: dir.to_path_buf(),
                source
            })?
            .path();

        if path.is_dir() {
            collect_files(&path, suffix, files)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix))
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Reads and parses a single file.
pub fn load_tournament(path: &Path) -> Result<LoadedTournament> {
    let contents = fs::read_to_string(path).map_err(|source| ProcessorError::Io {
        path: path.to_path_buf(),
        source
    })?;
    let document: TournamentDocument = serde_yaml::from_str(&contents).map_err(|source| ProcessorError::Yaml {
        path: path.to_path_buf(),
        source
    })?;
    let descriptor = tournament_parser::parse(path, &document)?;

    Ok(LoadedTournament {
        path: path.to_path_buf(),
        document,
        descriptor
    })
}

/// Loads every file in order. Files that fail to read or parse are logged and
/// left out; the rest of the run carries on without them.
pub fn load_tournaments(files: &[PathBuf]) -> Vec<LoadedTournament> {
    files
        .iter()
        .filter_map(|path| match load_tournament(path) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// Keeps tournaments from the most recent `seasons_to_include` seasons, counted
/// back from the latest season present. 0 keeps everything.
pub fn filter_recent_seasons(tournaments: Vec<LoadedTournament>, seasons_to_include: u32) -> Vec<LoadedTournament> {
    if seasons_to_include == 0 {
        return tournaments;
    }

    let Some(max_season) = tournaments.iter().filter_map(|t| t.descriptor.season_year()).max() else {
        return tournaments;
    };
    let min_season = max_season - (seasons_to_include as i32 - 1);

    let before = tournaments.len();
    let kept: Vec<LoadedTournament> = tournaments
        .into_iter()
        .filter(|t| t.descriptor.season_year().is_some_and(|season| season >= min_season))
        .collect();

    debug!(
        "Season filter kept {} of {} tournaments (seasons {}..={})",
        kept.len(),
        before,
        min_season,
        max_season
    );

    kept
}
