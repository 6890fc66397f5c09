// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::io::{self, Write};

use anyhow::{Context, Result};
use camctl::{CamctlConfig, CapturePipeline, operations};

/// List properties before and after the pipeline reaches PLAYING; some
/// properties are implemented in software and only appear once it runs.
pub fn run(config: &CamctlConfig) -> Result<()> {
    let pipeline = CapturePipeline::open(config).context("Failed to open capture pipeline")?;
    let mut out = io::stdout().lock();

    writeln!(out, "Properties before state PLAYING:")?;
    operations::list_properties(pipeline.source(), &mut out)?;

    pipeline.start().context("Failed to start capture pipeline")?;

    writeln!(out, "\n\nProperties after state PLAYING:")?;
    operations::list_properties(pipeline.source(), &mut out)?;

    pipeline.stop()?;
    Ok(())
}
