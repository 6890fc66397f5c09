// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::{PropertyType, PropertyValue};

/// Everything the device reports about one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    pub value_type: PropertyType,
    /// Current value. Buttons have none.
    pub value: Option<PropertyValue>,
    pub min: Option<PropertyValue>,
    pub max: Option<PropertyValue>,
    pub default: Option<PropertyValue>,
    pub step: Option<PropertyValue>,
    pub flags: i32,
    pub category: String,
    pub group: String,
}

impl PropertyInfo {
    /// A property with only a name, type and value; used by test doubles
    /// and by callers that fill in the rest through the builder methods.
    pub fn new(name: impl Into<String>, value_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            value_type,
            value: None,
            min: None,
            max: None,
            default: None,
            step: None,
            flags: 0,
            category: String::new(),
            group: String::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<PropertyValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_range(
        mut self,
        min: impl Into<PropertyValue>,
        max: impl Into<PropertyValue>,
        step: impl Into<PropertyValue>,
    ) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self.step = Some(step.into());
        self
    }

    pub fn with_grouping(mut self, category: impl Into<String>, group: impl Into<String>) -> Self {
        self.category = category.into();
        self.group = group.into();
        self
    }
}
