use clap::Parser;
use ndf_core::GenerationPlan;

mod bootstrap;
mod cli;
mod pipeline;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ndf error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config(&cli)?;
    let paths = pipeline::PipelinePaths::from_config(&config.paths)?;
    tracing::debug!(?paths, "resolved paths");

    let mut pipeline = pipeline::Pipeline::new(paths, GenerationPlan::standard());
    let report = pipeline.run().await?;

    ui::announce(&format!(
        "Wrote {} missions, {} images and {} relation shards ({} files) to {}",
        report.missions,
        report.images,
        report.relation_shards,
        report.archived_files,
        report.archive_path.display()
    ));
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("NDF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
