use std::process::ExitCode;

use clap::Parser;
use scioly_elo::{args::Args, runner};
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = args.resolve_config();

    // enableLogging forces per-category traces regardless of --log-level
    let level = match &config {
        Ok(config) if config.enable_logging => "debug",
        _ => args.log_level.as_str()
    };
    init_tracing(level);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runner::run(&args, &config) {
        Ok(results) => {
            info!("Processed {} division(s)", results.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_fatal() {
                error!("Aborting: {}", e);
            } else {
                error!("Run failed: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}
