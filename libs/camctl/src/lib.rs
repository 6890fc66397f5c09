// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Camera-control properties and device state for `tcambin` GStreamer
//! pipelines.
//!
//! ```no_run
//! use camctl::{CamctlConfig, CapturePipeline, operations};
//!
//! # fn main() -> camctl::Result<()> {
//! let config = CamctlConfig::load(None)?;
//! let pipeline = CapturePipeline::open(&config)?;
//! pipeline.start()?;
//! operations::set_properties(
//!     pipeline.source(),
//!     &config.watch,
//!     &config.settings,
//!     &mut std::io::stdout(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod device_state;
pub mod error;
pub mod operations;
pub mod pipeline;
pub mod property;
pub mod report;
pub mod tcam;

pub use config::CamctlConfig;
pub use device_state::{DeviceState, DeviceStateAccess};
pub use error::{Error, Result};
pub use pipeline::CapturePipeline;
pub use property::{Assignment, PropertyInfo, PropertyProvider, PropertyType, PropertyValue};
pub use tcam::TcamBin;
