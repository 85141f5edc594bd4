//! Handler for the `run` command.

use tokio::signal;
use tracing::{error, info};

use crate::app::App;
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();

    info!(
        sport = %config.feed.sport,
        poll_interval_secs = config.feed.poll_interval_secs,
        mock = args.mock,
        "stakehouse starting"
    );

    tokio::select! {
        result = App::run(config, args.mock) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("stakehouse stopped");
    Ok(())
}
