// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::io;

use anyhow::Result;
use camctl::{CamctlConfig, operations};

pub fn run(config: &CamctlConfig, names: &[String]) -> Result<()> {
    let pipeline = super::open_started(config)?;
    operations::print_properties(pipeline.source(), names, &mut io::stdout().lock())?;
    pipeline.stop()?;
    Ok(())
}
