use crate::commands::handlers::{extract, list_tracks, normalize, print_toc};
use crate::commands::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Toc(cmd) => print_toc(cmd)?,
        Commands::Tracks(cmd) => list_tracks(cmd)?,
        Commands::Normalize(cmd) => normalize(cmd)?,
        Commands::Extract(cmd) => extract(pb.clone(), cmd)?,
    }

    Ok(())
}
