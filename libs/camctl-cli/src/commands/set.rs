// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::io;

use anyhow::Result;
use camctl::{Assignment, CamctlConfig, operations};

/// Print the watched properties, apply the assignments, print them again.
/// Empty arguments fall back to the configured watch list and settings.
pub fn run(config: &CamctlConfig, assignments: &[Assignment], watch: &[String]) -> Result<()> {
    let assignments = if assignments.is_empty() {
        config.settings.as_slice()
    } else {
        assignments
    };
    let watch = if watch.is_empty() {
        config.watch.as_slice()
    } else {
        watch
    };

    let pipeline = super::open_started(config)?;
    let failures =
        operations::set_properties(pipeline.source(), watch, assignments, &mut io::stdout().lock())?;
    pipeline.stop()?;

    if !failures.is_empty() {
        tracing::warn!("{} of {} assignments failed", failures.len(), assignments.len());
    }
    Ok(())
}
