// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Console lines for property listings and value queries.

use std::io::{self, Write};

use crate::property::{PropertyInfo, PropertyType, PropertyValue};

fn show(value: &Option<PropertyValue>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// One listing entry, shaped by the property's type. `entries` are the
/// menu entries of an enumeration and ignored otherwise.
pub fn write_property(out: &mut impl Write, info: &PropertyInfo, entries: &[String]) -> io::Result<()> {
    let name = &info.name;
    let category = &info.category;
    let group = &info.group;

    match info.value_type {
        PropertyType::Integer | PropertyType::Double => writeln!(
            out,
            "{}({}) value: {} default: {} min: {} max: {} grouping: {} - {}",
            name,
            info.value_type,
            show(&info.value),
            show(&info.default),
            show(&info.min),
            show(&info.max),
            category,
            group
        ),
        PropertyType::String => writeln!(
            out,
            "{}(string) value: {} default: {} grouping: {} - {}",
            name,
            show(&info.value),
            show(&info.default),
            category,
            group
        ),
        PropertyType::Button => {
            writeln!(out, "{}(button) grouping is {} -  {}", name, category, group)
        }
        PropertyType::Boolean => writeln!(
            out,
            "{}(boolean) value: {} default: {} grouping: {} - {}",
            name,
            show(&info.value),
            show(&info.default),
            category,
            group
        ),
        PropertyType::Enum => {
            writeln!(
                out,
                "{}(enum) value: {} default: {} grouping {} - {}",
                name,
                show(&info.value),
                show(&info.default),
                category,
                group
            )?;
            writeln!(out, "Entries: ")?;
            for entry in entries {
                writeln!(out, "\t {}", entry)?;
            }
            Ok(())
        }
    }
}

pub fn write_unreadable(out: &mut impl Write, name: &str) -> io::Result<()> {
    writeln!(out, "could not receive value {}", name)
}

/// `<name> has value: <value>`, or the not-supported line when the device
/// does not report the property at all.
pub fn write_value(out: &mut impl Write, name: &str, info: Option<&PropertyInfo>) -> io::Result<()> {
    match info {
        None => write_not_supported(out, name),
        Some(PropertyInfo {
            value: Some(value), ..
        }) => writeln!(out, "{} has value: {}", name, value),
        // Buttons, and strings the device left unset
        Some(_) => writeln!(out, "{} has no value", name),
    }
}

pub fn write_not_supported(out: &mut impl Write, name: &str) -> io::Result<()> {
    writeln!(out, "Property {} is not supported by current device", name)
}

pub fn write_not_available(out: &mut impl Write, name: &str) -> io::Result<()> {
    writeln!(out, "Property {} is not available", name)
}
