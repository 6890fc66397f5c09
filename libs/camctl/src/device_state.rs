// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! JSON snapshot of all current property values of a device.
//!
//! The document layout is owned by the camera plugin. This type only
//! guarantees that the text is valid JSON and offers pointer-based edits
//! so a saved state can be adjusted before it is written back.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Read and write the device-state string of a source element.
pub trait DeviceStateAccess {
    fn device_state(&self) -> Result<DeviceState>;

    fn apply_device_state(&self, state: &DeviceState) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    raw: String,
    json: Value,
}

impl DeviceState {
    /// Validate `raw` as JSON and keep the text exactly as the device sent it.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(Error::DeviceState("device returned an empty state".into()));
        }
        let json = serde_json::from_str(&raw)?;
        Ok(Self { raw, json })
    }

    pub fn from_json(json: Value) -> Result<Self> {
        let raw = serde_json::to_string(&json)?;
        Ok(Self { raw, json })
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading device state from {}", path.display());
        Self::parse(fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        tracing::debug!("Saving device state to {}", path.display());
        let mut text = self.render(pretty)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(path, text)?;
        Ok(())
    }

    /// The text handed to the device.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn render(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(&self.json)?)
        } else {
            Ok(self.raw.clone())
        }
    }

    /// Look up a value by JSON pointer (`/properties/Brightness`) or by a
    /// bare top-level key (`Brightness`).
    pub fn get(&self, location: &str) -> Option<&Value> {
        self.json.pointer(&to_pointer(location))
    }

    /// Replace or insert the value at `location`. The parent must exist.
    pub fn patch(&mut self, location: &str, value: Value) -> Result<()> {
        let pointer = to_pointer(location);
        let (parent_pointer, token) = pointer
            .rsplit_once('/')
            .ok_or_else(|| Error::DeviceState(format!("invalid location '{}'", location)))?;
        let key = unescape_token(token);

        let parent = self.json.pointer_mut(parent_pointer).ok_or_else(|| {
            Error::DeviceState(format!("no parent for '{}' in device state", location))
        })?;

        match parent {
            Value::Object(map) => {
                map.insert(key, value);
            }
            Value::Array(items) => {
                let slot = key
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index))
                    .ok_or_else(|| {
                        Error::DeviceState(format!("index '{}' out of range for '{}'", key, location))
                    })?;
                *slot = value;
            }
            _ => {
                return Err(Error::DeviceState(format!(
                    "'{}' does not point into an object or array",
                    location
                )));
            }
        }

        self.raw = serde_json::to_string(&self.json)?;
        Ok(())
    }
}

/// Split `LOCATION=JSON` as given on the command line. Values that are not
/// valid JSON are taken as strings, so `Exposure Auto=Off` works unquoted.
pub fn parse_patch(text: &str) -> Result<(String, Value)> {
    let (location, value) = text
        .split_once('=')
        .ok_or_else(|| Error::DeviceState(format!("expected LOCATION=JSON, got '{}'", text)))?;
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::DeviceState(format!("empty location in '{}'", text)));
    }
    let value = value.trim();
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((location.to_string(), value))
}

fn to_pointer(location: &str) -> String {
    if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{}", location.replace('~', "~0").replace('/', "~1"))
    }
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
