// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! In-memory camera used by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use camctl::{
    DeviceState, DeviceStateAccess, Error, PropertyInfo, PropertyProvider, PropertyType,
    PropertyValue, Result,
};

#[derive(Default)]
pub struct FakeCamera {
    properties: RefCell<Vec<PropertyInfo>>,
    menus: HashMap<String, Vec<String>>,
    /// Listed by name but unreadable.
    broken: HashSet<String>,
    /// Readable but every write is refused.
    read_only: HashSet<String>,
    state: RefCell<String>,
    pub writes: RefCell<Vec<(String, PropertyValue)>>,
    pub state_writes: RefCell<Vec<String>>,
}

impl FakeCamera {
    /// A USB camera with boolean auto modes and an integer brightness.
    pub fn usb() -> Self {
        let mut camera = Self::default()
            .with(
                PropertyInfo::new("Exposure Auto", PropertyType::Boolean)
                    .with_value(true)
                    .with_default(true)
                    .with_grouping("Exposure", "Exposure"),
            )
            .with(
                PropertyInfo::new("Gain Auto", PropertyType::Boolean)
                    .with_value(true)
                    .with_default(true)
                    .with_grouping("Exposure", "Gain"),
            )
            .with(
                PropertyInfo::new("Brightness", PropertyType::Integer)
                    .with_value(16)
                    .with_default(16)
                    .with_range(0, 255, 1)
                    .with_grouping("Color", "Brightness"),
            );
        camera.state = RefCell::new(
            r#"{"properties":{"Exposure Auto":true,"Gain Auto":true,"Brightness":16}}"#.to_string(),
        );
        camera
    }

    /// A camera lacking Brightness whose auto modes are enumerations.
    pub fn gige() -> Self {
        Self::default()
            .with(
                PropertyInfo::new("Exposure Auto", PropertyType::Enum)
                    .with_value("Continuous")
                    .with_default("Continuous")
                    .with_grouping("Exposure", "Exposure"),
            )
            .with(
                PropertyInfo::new("Gain Auto", PropertyType::Enum)
                    .with_value("Continuous")
                    .with_default("Continuous")
                    .with_grouping("Exposure", "Gain"),
            )
            .with_menu("Exposure Auto", &["Off", "Once", "Continuous"])
            .with_menu("Gain Auto", &["Off", "Once", "Continuous"])
    }

    pub fn with(self, info: PropertyInfo) -> Self {
        self.properties.borrow_mut().push(info);
        self
    }

    pub fn with_menu(mut self, name: &str, entries: &[&str]) -> Self {
        self.menus.insert(
            name.to_string(),
            entries.iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    pub fn with_broken(mut self, name: &str) -> Self {
        self.broken.insert(name.to_string());
        self
    }

    pub fn with_read_only(mut self, name: &str) -> Self {
        self.read_only.insert(name.to_string());
        self
    }

    pub fn with_state(self, state: &str) -> Self {
        *self.state.borrow_mut() = state.to_string();
        self
    }

    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        self.property(name).and_then(|info| info.value)
    }
}

impl PropertyProvider for FakeCamera {
    fn property_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .properties
            .borrow()
            .iter()
            .map(|info| info.name.clone())
            .collect();
        names.extend(self.broken.iter().cloned());
        names
    }

    fn property(&self, name: &str) -> Option<PropertyInfo> {
        self.properties
            .borrow()
            .iter()
            .find(|info| info.name == name)
            .cloned()
    }

    fn set_property(&self, name: &str, value: &PropertyValue) -> Result<()> {
        if self.read_only.contains(name) {
            return Err(Error::PropertyRejected {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        let mut properties = self.properties.borrow_mut();
        let info = properties
            .iter_mut()
            .find(|info| info.name == name)
            .ok_or_else(|| Error::PropertyNotSupported(name.to_string()))?;
        info.value = Some(value.clone());
        self.writes
            .borrow_mut()
            .push((name.to_string(), value.clone()));
        Ok(())
    }

    fn menu_entries(&self, name: &str) -> Vec<String> {
        self.menus.get(name).cloned().unwrap_or_default()
    }
}

impl DeviceStateAccess for FakeCamera {
    fn device_state(&self) -> Result<DeviceState> {
        DeviceState::parse(self.state.borrow().clone())
    }

    fn apply_device_state(&self, state: &DeviceState) -> Result<()> {
        self.state_writes.borrow_mut().push(state.as_str().to_string());
        *self.state.borrow_mut() = state.as_str().to_string();
        Ok(())
    }
}
