#![allow(clippy::doc_markdown)]

mod api;
mod cli;
mod config;
mod output;
mod prelude;
mod query;
mod run;
mod setter;

use std::path::Path;

use chrono::Local;
use clap::{Parser, crate_version};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{
    api::e3dc,
    cli::Args,
    config::{Config, file::FileConfig},
    prelude::*,
    run::Runner,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy(),
        )
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let file = FileConfig::load(args.config.as_deref(), Path::new(FileConfig::DEFAULT_PATH))?;
    let config = Config::resolve(args, file)?;

    let mut system = e3dc::connect(&config.connection, &config.extended)?;
    let output = Runner::builder()
        .config(&config)
        .system(system.as_mut())
        .now(Local::now().naive_local())
        .build()
        .run();
    if let Err(error) = system.disconnect() {
        warn!("failed to disconnect: {error:#}");
    }
    output?.write(config.output.as_deref())?;

    info!("done!");
    Ok(())
}
