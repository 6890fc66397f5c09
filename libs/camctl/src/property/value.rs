// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Value type of a camera-control property, as named by the tcam plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Integer,
    Double,
    String,
    Enum,
    Boolean,
    Button,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Integer => "integer",
            PropertyType::Double => "double",
            PropertyType::String => "string",
            PropertyType::Enum => "enum",
            PropertyType::Boolean => "boolean",
            PropertyType::Button => "button",
        }
    }
}

impl FromStr for PropertyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "integer" => Ok(PropertyType::Integer),
            "double" => Ok(PropertyType::Double),
            "string" => Ok(PropertyType::String),
            "enum" => Ok(PropertyType::Enum),
            "boolean" => Ok(PropertyType::Boolean),
            "button" => Ok(PropertyType::Button),
            other => Err(Error::UnknownPropertyType(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value passed into or out of the device.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl PropertyValue {
    /// Parse user-supplied text into the value shape `ty` expects.
    ///
    /// Enumeration entries travel as strings. Buttons ignore the text and
    /// are pressed with `true`.
    pub fn parse(name: &str, text: &str, ty: PropertyType) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidValue {
            name: name.to_string(),
            value: text.to_string(),
            reason: reason.to_string(),
        };

        match ty {
            PropertyType::Boolean => parse_bool(text)
                .map(PropertyValue::Boolean)
                .ok_or_else(|| invalid("expected true/false, on/off, yes/no or 1/0")),
            PropertyType::Integer => text
                .trim()
                .parse::<i64>()
                .map(PropertyValue::Integer)
                .map_err(|e| invalid(&e.to_string())),
            PropertyType::Double => text
                .trim()
                .parse::<f64>()
                .map(PropertyValue::Double)
                .map_err(|e| invalid(&e.to_string())),
            PropertyType::String | PropertyType::Enum => Ok(PropertyValue::String(text.to_string())),
            PropertyType::Button => Ok(PropertyValue::Boolean(true)),
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Double(d) => write!(f, "{}", d),
            PropertyValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_names() {
        for ty in [
            PropertyType::Integer,
            PropertyType::Double,
            PropertyType::String,
            PropertyType::Enum,
            PropertyType::Boolean,
            PropertyType::Button,
        ] {
            assert_eq!(ty.as_str().parse::<PropertyType>().unwrap(), ty);
        }
        assert!(matches!(
            "float".parse::<PropertyType>(),
            Err(Error::UnknownPropertyType(name)) if name == "float"
        ));
    }

    #[test]
    fn test_parse_boolean_spellings() {
        for text in ["true", "On", "YES", "1", " true "] {
            assert_eq!(
                PropertyValue::parse("Gain Auto", text, PropertyType::Boolean).unwrap(),
                PropertyValue::Boolean(true)
            );
        }
        for text in ["false", "off", "No", "0"] {
            assert_eq!(
                PropertyValue::parse("Gain Auto", text, PropertyType::Boolean).unwrap(),
                PropertyValue::Boolean(false)
            );
        }
        assert!(PropertyValue::parse("Gain Auto", "maybe", PropertyType::Boolean).is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(
            PropertyValue::parse("Brightness", "200", PropertyType::Integer).unwrap(),
            PropertyValue::Integer(200)
        );
        assert_eq!(
            PropertyValue::parse("Gain", "4.5", PropertyType::Double).unwrap(),
            PropertyValue::Double(4.5)
        );

        let err = PropertyValue::parse("Brightness", "bright", PropertyType::Integer).unwrap_err();
        match err {
            Error::InvalidValue { name, value, .. } => {
                assert_eq!(name, "Brightness");
                assert_eq!(value, "bright");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_enum_and_button() {
        // GigE cameras expose auto modes as enumerations
        assert_eq!(
            PropertyValue::parse("Exposure Auto", "Off", PropertyType::Enum).unwrap(),
            PropertyValue::String("Off".into())
        );
        assert_eq!(
            PropertyValue::parse("Software Trigger", "", PropertyType::Button).unwrap(),
            PropertyValue::Boolean(true)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Boolean(false).to_string(), "false");
        assert_eq!(PropertyValue::Integer(-3).to_string(), "-3");
        assert_eq!(PropertyValue::Double(0.25).to_string(), "0.25");
        assert_eq!(PropertyValue::from("Continuous").to_string(), "Continuous");
    }
}
