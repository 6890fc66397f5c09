// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use anyhow::{Context, Result};
use camctl::{CamctlConfig, CapturePipeline};

pub mod get;
pub mod list;
pub mod set;
pub mod state;

/// Open the pipeline and bring it to PLAYING, so software-implemented
/// properties are available too.
pub fn open_started(config: &CamctlConfig) -> Result<CapturePipeline> {
    let pipeline = CapturePipeline::open(config).context("Failed to open capture pipeline")?;
    pipeline.start().context("Failed to start capture pipeline")?;
    Ok(pipeline)
}
