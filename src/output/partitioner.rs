use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf}
};

use tracing::{debug, info};

use crate::{
    error::{ProcessorError, Result},
    model::{constants::OVERALL_CATEGORY, registry::Registry, structures::division::Division},
    output::output_structs::{MetaFile, StateOutput, TimelineEntry},
    utils::state_names::state_name
};

/// Writes one compact JSON file per state plus a pretty-printed `meta.json`
/// into `<output_dir>/states<Division>/`. Returns that directory.
pub fn write_division(
    output_dir: &Path,
    division: Division,
    states: &BTreeMap<String, StateOutput>,
    registry: &Registry
) -> Result<PathBuf> {
    let states_dir = output_dir.join(division.output_dir_name());
    fs::create_dir_all(&states_dir).map_err(|source| ProcessorError::Io {
        path: states_dir.clone(),
        source
    })?;

    let mut state_names = BTreeMap::new();
    for (code, teams) in states {
        let path = states_dir.join(format!("{}.json", code));
        write_file(&path, &serde_json::to_string(teams)?)?;
        state_names.insert(code.clone(), state_name(code));

        debug!("Generated {} for Division {}", path.display(), division);
    }

    let meta = MetaFile {
        teams: registry.teams(),
        events: registry.events(),
        tournaments: registry.tournaments(),
        states: state_names,
        tournament_timeline: tournament_timeline(states, registry)
    };
    write_file(&states_dir.join("meta.json"), &serde_json::to_string_pretty(&meta)?)?;

    info!(
        "Division {}: wrote {} state files and meta.json to {}",
        division,
        states.len(),
        states_dir.display()
    );

    Ok(states_dir)
}

/// Every tournament that shows up in some team's overall history, grouped by
/// season and sorted by date. A tournament is listed once per `(date, id)`.
/// Every season in the table gets an entry, even if it is empty.
pub fn tournament_timeline(
    states: &BTreeMap<String, StateOutput>,
    registry: &Registry
) -> BTreeMap<String, Vec<TimelineEntry>> {
    let mut timeline: BTreeMap<String, Vec<TimelineEntry>> = BTreeMap::new();
    let mut seen: HashSet<(String, usize)> = HashSet::new();

    for team in states.values().flat_map(|teams| teams.values()) {
        for (season, season_output) in &team.seasons {
            let entries = timeline.entry(season.clone()).or_default();
            let Some(overall) = season_output.events.get(OVERALL_CATEGORY) else {
                continue;
            };

            for entry in &overall.history {
                if !seen.insert((entry.date.clone(), entry.tournament_id)) {
                    continue;
                }

                entries.push(TimelineEntry {
                    date: entry.date.clone(),
                    tournament_id: entry.tournament_id,
                    tournament_name: registry
                        .tournament_name(entry.tournament_id)
                        .map(str::to_owned)
                        .unwrap_or_else(|| format!("Tournament {}", entry.tournament_id)),
                    link: entry.source_link.clone(),
                    season: season.clone()
                });
            }
        }
    }

    for entries in timeline.values_mut() {
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.tournament_id.cmp(&b.tournament_id)));
    }

    timeline
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| ProcessorError::Io {
        path: path.to_path_buf(),
        source
    })
}
