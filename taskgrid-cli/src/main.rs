//! taskgrid command-line interface.

mod cli;
mod commands;
mod error;
mod input;
mod paths;
mod render;

use std::fs::{self, File};

use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use taskgrid_lib::config::StoreConfig;
use taskgrid_lib::model::RowId;
use taskgrid_lib::storage::{SnapshotStorage, SqliteBackend};

use crate::cli::Cli;
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: {}", e);
    }

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let data_dir = cli
        .data_dir
        .or_else(paths::data_dir)
        .ok_or(CliError::NoDataDir)?;
    fs::create_dir_all(&data_dir)?;

    let backend = SqliteBackend::open(data_dir.join(paths::DATABASE_FILE)).await?;
    let config = if cli.strict {
        StoreConfig::strict()
    } else {
        StoreConfig::default()
    };

    let selection: Vec<RowId> = cli.select.into_iter().map(RowId::from).collect();
    let mut session =
        Session::open(SnapshotStorage::new(backend), config, cli.route, &selection).await?;
    let result = commands::execute(&mut session, cli.command).await;
    // whatever was applied before a failure is kept
    session.save().await?;
    result?;

    commands::show(&session);
    Ok(())
}

/// Writes logs to a fresh `latest.log` in the cache directory.
fn init_logging(verbose: u8) -> Result<(), CliError> {
    let Some(log_file) = paths::log_file() else {
        return Ok(());
    };
    paths::rotate_logs();

    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    WriteLogger::init(level, Config::default(), File::create(&log_file)?)?;
    info!("taskgrid {} logging to {}", env!("CARGO_PKG_VERSION"), log_file.display());
    Ok(())
}
