// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::{Assignment, PropertyInfo, PropertyValue};
use crate::error::{Error, Result};

/// Named camera-control properties of one device.
pub trait PropertyProvider {
    /// Names of every property the device currently exposes.
    fn property_names(&self) -> Vec<String>;

    /// Full description of `name`, or `None` when the device does not
    /// support it.
    fn property(&self, name: &str) -> Option<PropertyInfo>;

    /// Write `value` to `name`.
    fn set_property(&self, name: &str, value: &PropertyValue) -> Result<()>;

    /// Menu entries of an enumeration property. Empty for other types.
    fn menu_entries(&self, name: &str) -> Vec<String>;

    /// Resolve the property's type, parse the assignment against it and
    /// write the result. Returns the value that was written.
    fn apply(&self, assignment: &Assignment) -> Result<PropertyValue> {
        let info = self
            .property(&assignment.name)
            .ok_or_else(|| Error::PropertyNotSupported(assignment.name.clone()))?;
        let value = PropertyValue::parse(&assignment.name, &assignment.value, info.value_type)?;
        self.set_property(&assignment.name, &value)?;
        Ok(value)
    }
}
