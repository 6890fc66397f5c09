// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Device-state round trip: read, print, write back (optionally loaded from
//! a file and patched), read and print again.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use camctl::device_state::parse_patch;
use camctl::{CamctlConfig, DeviceState, operations};

pub fn run(
    config: &CamctlConfig,
    load: Option<&Path>,
    save: Option<&Path>,
    patches: &[String],
    pretty: bool,
) -> Result<()> {
    // Validate inputs before touching the camera
    let patches = patches
        .iter()
        .map(|patch| parse_patch(patch))
        .collect::<camctl::Result<Vec<_>>>()
        .context("Invalid --patch")?;
    let loaded = load
        .map(|path| {
            DeviceState::load(path)
                .with_context(|| format!("Failed to load device state from {}", path.display()))
        })
        .transpose()?;

    let pipeline = super::open_started(config)?;

    let after = operations::round_trip_state(
        pipeline.source(),
        pretty,
        |current| {
            let mut state = loaded.unwrap_or(current);
            for (location, value) in patches {
                state.patch(&location, value)?;
            }
            Ok(state)
        },
        &mut io::stdout().lock(),
    )?;

    if let Some(path) = save {
        after
            .save(path, pretty)
            .with_context(|| format!("Failed to save device state to {}", path.display()))?;
        tracing::info!("Device state saved to {}", path.display());
    }

    pipeline.stop()?;
    Ok(())
}
