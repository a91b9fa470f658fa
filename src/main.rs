use clap::Parser;
use log::{error, info};
use softshade::app::run_cli;
use softshade::io::cli::Cli;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_level(true)
        .init();

    info!("softshade {}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = cli.resolve_config().map_err(|e| {
        error!("Configuration error: {e}");
        e.to_string()
    })?;

    let report = run_cli(&config).map_err(|e| {
        error!("Shading failed: {e}");
        e.to_string()
    })?;

    info!(
        "{} objects shaded, {} polygons needed sorting",
        report.objects.len(),
        report.stats.sorted
    );
    Ok(())
}
