// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Call sequences against a device, printing to any writer.

use std::io::Write;

use crate::device_state::{DeviceState, DeviceStateAccess};
use crate::error::{Error, Result};
use crate::property::{Assignment, PropertyProvider, PropertyType};
use crate::report;

/// Print every property the device currently exposes.
pub fn list_properties<P: PropertyProvider + ?Sized>(provider: &P, out: &mut impl Write) -> Result<()> {
    let names = provider.property_names();
    tracing::debug!("Device exposes {} properties", names.len());

    for name in &names {
        let Some(info) = provider.property(name) else {
            report::write_unreadable(out, name)?;
            continue;
        };

        let entries = if info.value_type == PropertyType::Enum {
            provider.menu_entries(name)
        } else {
            Vec::new()
        };
        report::write_property(out, &info, &entries)?;
    }

    Ok(())
}

/// Print the current value of each named property.
pub fn print_properties<P, S>(provider: &P, names: &[S], out: &mut impl Write) -> Result<()>
where
    P: PropertyProvider + ?Sized,
    S: AsRef<str>,
{
    for name in names {
        let name = name.as_ref();
        report::write_value(out, name, provider.property(name).as_ref())?;
    }
    Ok(())
}

/// Apply each assignment in order. A failed assignment is reported and
/// skipped. Returns the failures.
pub fn apply_assignments<P: PropertyProvider + ?Sized>(
    provider: &P,
    assignments: &[Assignment],
    out: &mut impl Write,
) -> Result<Vec<(Assignment, Error)>> {
    let mut failures = Vec::new();

    for assignment in assignments {
        match provider.apply(assignment) {
            Ok(value) => {
                tracing::info!("Set '{}' to {}", assignment.name, value);
            }
            Err(err) => {
                tracing::warn!("Could not set '{}': {}", assignment.name, err);
                report::write_not_available(out, &assignment.name)?;
                failures.push((assignment.clone(), err));
            }
        }
    }

    Ok(failures)
}

/// Print `watch`, apply `assignments`, print `watch` again.
pub fn set_properties<P, S>(
    provider: &P,
    watch: &[S],
    assignments: &[Assignment],
    out: &mut impl Write,
) -> Result<Vec<(Assignment, Error)>>
where
    P: PropertyProvider + ?Sized,
    S: AsRef<str>,
{
    print_properties(provider, watch, out)?;
    let failures = apply_assignments(provider, assignments, out)?;
    print_properties(provider, watch, out)?;
    Ok(failures)
}

/// Read the device state, print it, write `edit(state)` back, then read
/// and print it again. Returns the state read after the write.
pub fn round_trip_state<D, F>(device: &D, pretty: bool, edit: F, out: &mut impl Write) -> Result<DeviceState>
where
    D: DeviceStateAccess + ?Sized,
    F: FnOnce(DeviceState) -> Result<DeviceState>,
{
    let before = device.device_state()?;
    write_state(&before, pretty, out)?;

    let desired = edit(before)?;
    device.apply_device_state(&desired)?;
    tracing::info!("Device state written ({} bytes)", desired.as_str().len());

    let after = device.device_state()?;
    write_state(&after, pretty, out)?;
    Ok(after)
}

fn write_state(state: &DeviceState, pretty: bool, out: &mut impl Write) -> Result<()> {
    writeln!(out, "State of device is:\n{}", state.render(pretty)?)?;
    Ok(())
}
