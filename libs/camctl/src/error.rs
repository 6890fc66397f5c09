// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GStreamer initialization failed: {0}")]
    Init(#[source] glib::Error),

    #[error("Failed to build pipeline '{description}': {source}")]
    Pipeline {
        description: String,
        #[source]
        source: glib::Error,
    },

    #[error("Pipeline '{0}' is not a bin")]
    NotABin(String),

    #[error("Element '{0}' not found in pipeline")]
    ElementNotFound(String),

    #[error("Failed to load libtcamprop: {0}")]
    Library(String),

    #[error("Element '{element}' does not implement {interface}")]
    MissingInterface {
        element: String,
        interface: &'static str,
    },

    #[error("Pipeline state change failed: {0}")]
    StateChange(String),

    #[error("Property '{0}' is not supported by current device")]
    PropertyNotSupported(String),

    #[error("Device rejected value {value} for property '{name}'")]
    PropertyRejected { name: String, value: String },

    #[error("Invalid value '{value}' for property '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Unknown property type '{0}'")]
    UnknownPropertyType(String),

    #[error("Invalid device state: {0}")]
    DeviceState(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
