// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! camctl CLI
//!
//! Query and set camera-control properties of a tcambin camera.

use std::path::PathBuf;

use anyhow::{Context, Result};
use camctl::{Assignment, CamctlConfig};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "camctl")]
#[command(author, version, about = "Camera-control properties for tcambin cameras", long_about = None)]
struct Cli {
    /// Config file (default: $CAMCTL_CONFIG or ~/.camctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Serial number of the camera to open (default: first camera)
    #[arg(long, global = true)]
    serial: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all properties, before and after the pipeline is started
    List,

    /// Print the current value of properties
    Get {
        /// Property names, e.g. "Exposure Auto"
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Set properties, printing the watched properties before and after
    Set {
        /// Assignments such as "Exposure Auto=false" or "Brightness=200".
        /// Uses the configured settings when omitted.
        #[arg(value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<Assignment>,

        /// Properties to print before and after (default: configured watch list)
        #[arg(long = "watch", value_name = "NAME")]
        watch: Vec<String>,
    },

    /// Read the device state JSON, write it back, read it again
    State {
        /// Write this state file instead of the current state
        #[arg(long, value_name = "FILE")]
        load: Option<PathBuf>,

        /// Save the state read after the write
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Edit the state before writing, e.g. "/properties/Brightness=200"
        #[arg(long = "patch", value_name = "LOCATION=JSON")]
        patches: Vec<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn parse_assignment(s: &str) -> std::result::Result<Assignment, String> {
    s.parse().map_err(|e: camctl::Error| e.to_string())
}

/// `RUST_LOG` if set, else `fallback`.
fn log_filter(fallback: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .with_context(|| format!("Invalid log filter '{}'", fallback))
}

fn main() -> Result<()> {
    // Load .env before reading CAMCTL_* variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        // No subcommand: show help without touching the config
        Cli::command().print_help()?;
        return Ok(());
    };

    // Config loading logs before the configured level is known
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(log_filter("warn")?)
        .with_writer(std::io::stderr)
        .finish();
    let mut config = tracing::subscriber::with_default(bootstrap, || {
        CamctlConfig::load(cli.config.as_deref())
    })
    .context("Failed to load config")?;
    if let Some(serial) = cli.serial {
        config.serial = Some(serial);
    }

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_level).context("Invalid log_level in config")?)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::List => commands::list::run(&config)?,
        Commands::Get { names } => commands::get::run(&config, &names)?,
        Commands::Set { assignments, watch } => commands::set::run(&config, &assignments, &watch)?,
        Commands::State {
            load,
            save,
            patches,
            pretty,
        } => commands::state::run(&config, load.as_deref(), save.as_deref(), &patches, pretty)?,
    }

    Ok(())
}
