use std::{collections::BTreeMap, fs, path::Path};

use serde::Serialize;
use tracing::info;

use crate::{
    config::Config,
    error::{ProcessorError, Result},
    model::{prediction_tracker::LossTotals, structures::division::Division}
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsFile<'a> {
    #[serde(flatten)]
    totals: LossTotals,
    divisions: BTreeMap<String, LossTotals>,
    config: &'a Config
}

/// Writes the backtest loss of a run, overall and per division, together with
/// the configuration that produced it.
pub fn write_metrics(path: &Path, divisions: &BTreeMap<Division, LossTotals>, config: &Config) -> Result<()> {
    let mut totals = LossTotals::default();
    for division_totals in divisions.values() {
        totals.merge(division_totals);
    }

    let metrics = MetricsFile {
        totals,
        divisions: divisions
            .iter()
            .map(|(division, totals)| (division.to_string(), *totals))
            .collect(),
        config
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ProcessorError::Io {
            path: parent.to_path_buf(),
            source
        })?;
    }

    fs::write(path, serde_json::to_string_pretty(&metrics)?).map_err(|source| ProcessorError::Io {
        path: path.to_path_buf(),
        source
    })?;

    info!("Wrote metrics to {}", path.display());
    Ok(())
}
