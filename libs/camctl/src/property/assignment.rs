// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `NAME=VALUE` as typed by the user. The value stays text until the
/// target property's type is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

impl Assignment {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Assignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Property names contain spaces ("Exposure Auto"), values may contain '='
        let (name, value) = s.split_once('=').ok_or_else(|| Error::InvalidValue {
            name: s.to_string(),
            value: String::new(),
            reason: "expected NAME=VALUE".to_string(),
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidValue {
                name: String::new(),
                value: value.to_string(),
                reason: "property name is empty".to_string(),
            });
        }

        Ok(Self::new(name, value.trim()))
    }
}

impl TryFrom<String> for Assignment {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Assignment> for String {
    fn from(assignment: Assignment) -> Self {
        assignment.to_string()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment_with_spaces() {
        let a: Assignment = "Exposure Auto=false".parse().unwrap();
        assert_eq!(a.name, "Exposure Auto");
        assert_eq!(a.value, "false");

        let a: Assignment = " Brightness = 200 ".parse().unwrap();
        assert_eq!(a, Assignment::new("Brightness", "200"));
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let a: Assignment = "Strobe Mode=a=b".parse().unwrap();
        assert_eq!(a.name, "Strobe Mode");
        assert_eq!(a.value, "a=b");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("Brightness".parse::<Assignment>().is_err());
        assert!("=200".parse::<Assignment>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let a = Assignment::new("Gain Auto", "false");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"Gain Auto=false\"");
        let back: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
