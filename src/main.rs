use crate::commands::{Cli, Commands};
use crate::process::{print_plan, split};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;
mod config;
mod cue;
mod error;
mod plan;
mod process;
mod sheet;
mod sox;
mod tags;

#[tokio::main]
async fn main() -> Result<()> {
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
        Commands::Split(cmd) => split(pb.clone(), cmd.args).await?,
        Commands::Plan(cmd) => print_plan(cmd.args, cmd.json).await?,
    }

    Ok(())
}
