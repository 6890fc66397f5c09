// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Capture pipeline lifecycle: a camera source feeding a discard sink.
//!
//! Some camera models implement properties (e.g. Exposure Auto, Gain Auto
//! on DFK 72) in software; those only exist once the pipeline is PLAYING.

use std::time::Duration;

use gstreamer as gst;
use gstreamer::prelude::*;

use crate::config::CamctlConfig;
use crate::error::{Error, Result};
use crate::tcam::TcamBin;

pub struct CapturePipeline {
    bin: gst::Bin,
    source: TcamBin,
    start_timeout: Duration,
}

impl CapturePipeline {
    /// Build the pipeline and select the camera. The pipeline stays in NULL.
    pub fn open(config: &CamctlConfig) -> Result<Self> {
        gst::init().map_err(Error::Init)?;

        tracing::debug!("Parsing pipeline: {}", config.pipeline);
        let element = gst::parse::launch(&config.pipeline).map_err(|source| Error::Pipeline {
            description: config.pipeline.clone(),
            source,
        })?;
        let bin = element
            .downcast::<gst::Bin>()
            .map_err(|_| Error::NotABin(config.pipeline.clone()))?;

        let source = bin
            .by_name(&config.source_name)
            .ok_or_else(|| Error::ElementNotFound(config.source_name.clone()))?;
        let source = TcamBin::new(source)?;

        if let Some(serial) = &config.serial {
            source.set_serial(serial)?;
        }

        Ok(Self {
            bin,
            source,
            start_timeout: config.start_timeout(),
        })
    }

    pub fn source(&self) -> &TcamBin {
        &self.source
    }

    /// Transition to PLAYING and wait for it, bounded by the start timeout.
    pub fn start(&self) -> Result<()> {
        tracing::info!("Starting pipeline");
        self.bin
            .set_state(gst::State::Playing)
            .map_err(|e| Error::StateChange(e.to_string()))?;

        let (result, current, pending) = self.bin.state(clock_time(self.start_timeout));
        match result {
            Ok(gst::StateChangeSuccess::Async) => {
                tracing::warn!(
                    "Pipeline still {:?} -> {:?} after {:?}; continuing",
                    current,
                    pending,
                    self.start_timeout
                );
            }
            Ok(_) => tracing::info!(
                "Pipeline is {:?} (camera {})",
                current,
                self.source.serial().unwrap_or_else(|| "unknown".into())
            ),
            Err(err) => {
                return Err(Error::StateChange(format!(
                    "{} (state {:?}, pending {:?})",
                    err, current, pending
                )));
            }
        }
        Ok(())
    }

    /// Transition back to NULL, releasing the device.
    pub fn stop(&self) -> Result<()> {
        tracing::info!("Stopping pipeline");
        self.bin
            .set_state(gst::State::Null)
            .map_err(|e| Error::StateChange(e.to_string()))?;
        Ok(())
    }
}

/// Convert a wait bound, saturating at the largest representable clock time.
fn clock_time(duration: Duration) -> gst::ClockTime {
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    gst::ClockTime::from_nseconds(nanos.min(gst::ClockTime::MAX.nseconds()))
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        if let Err(err) = self.bin.set_state(gst::State::Null) {
            tracing::warn!("Failed to reset pipeline on drop: {}", err);
        }
    }
}
