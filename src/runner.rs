use std::{collections::BTreeMap, path::Path};

use rayon::prelude::*;
use tracing::info;

use crate::{
    args::Args,
    config::Config,
    error::Result,
    model::{
        elo_model::{DivisionResult, EloModel},
        structures::division::Division
    },
    output::{metrics::write_metrics, partitioner::write_division},
    results::loader::{discover_files, filter_recent_seasons, load_tournaments}
};

/// Rates a single division from scratch. Returns `None` when the division has
/// no result files.
pub fn run_division(results_dir: &Path, division: Division, config: &Config) -> Result<Option<DivisionResult>> {
    let files = discover_files(results_dir, division)?;
    if files.is_empty() {
        info!("Division {}: no result files found", division);
        return Ok(None);
    }

    let loaded = load_tournaments(&files);
    info!("Division {}: parsed {} of {} files", division, loaded.len(), files.len());

    let tournaments = filter_recent_seasons(loaded, config.seasons_to_include);

    let mut model = EloModel::new(division, config);
    model.process(&tournaments)?;

    Ok(Some(model.finish()))
}

/// Runs every requested division, writes the per-state output, then the
/// optional loss report and metrics file.
pub fn run(args: &Args, config: &Config) -> Result<Vec<DivisionResult>> {
    let divisions = args.divisions();

    let results: Vec<Option<DivisionResult>> = if config.parallel_divisions {
        divisions
            .par_iter()
            .map(|division| run_division(&args.results_dir, *division, config))
            .collect::<Result<_>>()?
    } else {
        divisions
            .iter()
            .map(|division| run_division(&args.results_dir, *division, config))
            .collect::<Result<_>>()?
    };
    let results: Vec<DivisionResult> = results.into_iter().flatten().collect();

    for result in &results {
        if !config.skip_output {
            write_division(&args.output_dir, result.division, &result.states, &result.registry)?;
        }
        if config.print_loss {
            print_loss(result);
        }
    }

    if let Some(path) = &config.metrics_out {
        let losses: BTreeMap<Division, _> = results.iter().map(|r| (r.division, r.loss)).collect();
        write_metrics(path, &losses, config)?;
    }

    Ok(results)
}

fn print_loss(result: &DivisionResult) {
    for national in &result.national_losses {
        println!(
            "[Nationals Loss] {} ({}) teams={} loss={:.2}",
            national.name, national.date, national.teams, national.loss
        );
    }

    println!(
        "[Loss Total] Division {}: total={:.2} state={:.2} national={:.2} regular={:.2} tournaments={}",
        result.division,
        result.loss.total_loss,
        result.loss.state_loss,
        result.loss.national_loss,
        result.loss.regular_loss,
        result.loss.tournaments_scored
    );
}
