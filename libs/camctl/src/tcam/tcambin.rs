// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::ffi::{c_char, CStr, CString};

use glib::ffi::{GSList, GFALSE};
use glib::gobject_ffi::{self, GValue};
use glib::translate::{from_glib, ToGlibPtr};
use gstreamer as gst;
use gstreamer::prelude::*;

use super::ffi::{self, TcamPropApi};
use crate::device_state::{DeviceState, DeviceStateAccess};
use crate::error::{Error, Result};
use crate::property::{PropertyInfo, PropertyProvider, PropertyType, PropertyValue};

const STATE_PROPERTY: &str = "state";
const SERIAL_PROPERTY: &str = "serial";

/// A source element implementing the TcamProp interface (`tcambin`,
/// `tcamsrc`).
#[derive(Clone)]
pub struct TcamBin {
    element: gst::Element,
    api: &'static TcamPropApi,
}

impl TcamBin {
    pub fn new(element: gst::Element) -> Result<Self> {
        let api = TcamPropApi::get()?;
        // SAFETY: registers (once) and returns the interface GType
        let interface: glib::Type = unsafe { from_glib((api.get_type)()) };
        if !element.type_().is_a(interface) {
            return Err(Error::MissingInterface {
                element: element.name().to_string(),
                interface: "TcamProp",
            });
        }
        Ok(Self { element, api })
    }

    /// Select the camera to open. Must happen before the pipeline leaves NULL.
    pub fn set_serial(&self, serial: &str) -> Result<()> {
        self.require_string_property(SERIAL_PROPERTY)?;
        tracing::debug!("Selecting camera serial {}", serial);
        self.element.set_property(SERIAL_PROPERTY, serial);
        Ok(())
    }

    pub fn serial(&self) -> Option<String> {
        self.require_string_property(SERIAL_PROPERTY).ok()?;
        self.element.property::<Option<String>>(SERIAL_PROPERTY)
    }

    fn require_string_property(&self, name: &str) -> Result<()> {
        match self.element.find_property(name) {
            Some(pspec) if pspec.value_type() == glib::Type::STRING => Ok(()),
            _ => Err(Error::PropertyNotSupported(name.to_string())),
        }
    }

    fn as_tcam_prop(&self) -> *mut ffi::TcamProp {
        self.element.as_ptr() as *mut ffi::TcamProp
    }
}

impl PropertyProvider for TcamBin {
    fn property_names(&self) -> Vec<String> {
        // SAFETY: instance implements TcamProp (checked in new); list is transfer full
        unsafe { take_string_list((self.api.get_tcam_property_names)(self.as_tcam_prop())) }
    }

    fn property(&self, name: &str) -> Option<PropertyInfo> {
        let c_name = CString::new(name).ok()?;

        let mut value = OutValue::new();
        let mut min = OutValue::new();
        let mut max = OutValue::new();
        let mut default = OutValue::new();
        let mut step = OutValue::new();
        let mut value_type = OutValue::new();
        let mut flags = OutValue::new();
        let mut category = OutValue::new();
        let mut group = OutValue::new();

        // SAFETY: all out-parameters are zeroed GValues owned by this frame
        let found = unsafe {
            (self.api.get_tcam_property)(
                self.as_tcam_prop(),
                c_name.as_ptr(),
                value.as_mut_ptr(),
                min.as_mut_ptr(),
                max.as_mut_ptr(),
                default.as_mut_ptr(),
                step.as_mut_ptr(),
                value_type.as_mut_ptr(),
                flags.as_mut_ptr(),
                category.as_mut_ptr(),
                group.as_mut_ptr(),
            )
        };

        if found == GFALSE {
            tracing::debug!("Property '{}' not reported by device", name);
            return None;
        }

        let value_type = match value_type.string().as_deref().map(str::parse::<PropertyType>) {
            Some(Ok(ty)) => ty,
            Some(Err(err)) => {
                tracing::warn!("Property '{}': {}", name, err);
                return None;
            }
            None => {
                tracing::warn!("Property '{}' reported without a type", name);
                return None;
            }
        };

        Some(PropertyInfo {
            name: name.to_string(),
            value_type,
            value: value.property_value(),
            min: min.property_value(),
            max: max.property_value(),
            default: default.property_value(),
            step: step.property_value(),
            flags: flags.int().unwrap_or_default(),
            category: category.string().unwrap_or_default(),
            group: group.string().unwrap_or_default(),
        })
    }

    fn set_property(&self, name: &str, value: &PropertyValue) -> Result<()> {
        let c_name = CString::new(name).map_err(|e| Error::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        let gvalue = to_glib_value(name, value)?;
        let gvalue_ptr: *const GValue = gvalue.to_glib_none().0;

        tracing::debug!("Setting '{}' to {}", name, value);
        // SAFETY: gvalue outlives the call; the callee copies what it keeps
        let accepted = unsafe {
            (self.api.set_tcam_property)(
                self.as_tcam_prop(),
                c_name.as_ptr(),
                gvalue_ptr,
            )
        };

        if accepted == GFALSE {
            return Err(Error::PropertyRejected {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn menu_entries(&self, name: &str) -> Vec<String> {
        let Ok(c_name) = CString::new(name) else {
            return Vec::new();
        };
        // SAFETY: list is transfer full
        unsafe {
            take_string_list((self.api.get_tcam_menu_entries)(
                self.as_tcam_prop(),
                c_name.as_ptr(),
            ))
        }
    }
}

impl DeviceStateAccess for TcamBin {
    fn device_state(&self) -> Result<DeviceState> {
        self.require_string_property(STATE_PROPERTY)?;
        let raw = self
            .element
            .property::<Option<String>>(STATE_PROPERTY)
            .unwrap_or_default();
        DeviceState::parse(raw)
    }

    fn apply_device_state(&self, state: &DeviceState) -> Result<()> {
        self.require_string_property(STATE_PROPERTY)?;
        self.element.set_property(STATE_PROPERTY, state.as_str());
        Ok(())
    }
}

/// Integer properties of the plugin are `gint`.
fn to_glib_value(name: &str, value: &PropertyValue) -> Result<glib::Value> {
    Ok(match value {
        PropertyValue::Boolean(b) => b.to_value(),
        PropertyValue::Integer(i) => i32::try_from(*i)
            .map_err(|_| Error::InvalidValue {
                name: name.to_string(),
                value: i.to_string(),
                reason: "outside the 32-bit integer range".to_string(),
            })?
            .to_value(),
        PropertyValue::Double(d) => d.to_value(),
        PropertyValue::String(s) => s.to_value(),
    })
}

/// A zero-initialized (`G_VALUE_INIT`) out-parameter, unset on drop.
struct OutValue(GValue);

impl OutValue {
    fn new() -> Self {
        // SAFETY: an all-zero GValue is G_VALUE_INIT
        Self(unsafe { std::mem::zeroed() })
    }

    fn as_mut_ptr(&mut self) -> *mut GValue {
        &mut self.0
    }

    fn as_ptr(&self) -> *const GValue {
        &self.0
    }

    fn string(&self) -> Option<String> {
        if self.0.g_type != gobject_ffi::G_TYPE_STRING {
            return None;
        }
        // SAFETY: holds a string; the pointer stays owned by the GValue
        unsafe {
            let ptr = gobject_ffi::g_value_get_string(self.as_ptr());
            (!ptr.is_null()).then(|| CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    }

    fn int(&self) -> Option<i32> {
        if self.0.g_type != gobject_ffi::G_TYPE_INT {
            return None;
        }
        // SAFETY: type checked above
        Some(unsafe { gobject_ffi::g_value_get_int(self.as_ptr()) })
    }

    fn property_value(&self) -> Option<PropertyValue> {
        let ptr = self.as_ptr();
        // SAFETY: each getter matches the GType it is dispatched on
        unsafe {
            match self.0.g_type {
                gobject_ffi::G_TYPE_BOOLEAN => Some(PropertyValue::Boolean(
                    gobject_ffi::g_value_get_boolean(ptr) != GFALSE,
                )),
                gobject_ffi::G_TYPE_INT => Some(PropertyValue::Integer(
                    gobject_ffi::g_value_get_int(ptr).into(),
                )),
                gobject_ffi::G_TYPE_UINT => Some(PropertyValue::Integer(
                    gobject_ffi::g_value_get_uint(ptr).into(),
                )),
                gobject_ffi::G_TYPE_INT64 => Some(PropertyValue::Integer(
                    gobject_ffi::g_value_get_int64(ptr),
                )),
                gobject_ffi::G_TYPE_UINT64 => i64::try_from(gobject_ffi::g_value_get_uint64(ptr))
                    .ok()
                    .map(PropertyValue::Integer),
                gobject_ffi::G_TYPE_DOUBLE => Some(PropertyValue::Double(
                    gobject_ffi::g_value_get_double(ptr),
                )),
                gobject_ffi::G_TYPE_FLOAT => Some(PropertyValue::Double(
                    gobject_ffi::g_value_get_float(ptr).into(),
                )),
                gobject_ffi::G_TYPE_STRING => self.string().map(PropertyValue::String),
                _ => None,
            }
        }
    }
}

impl Drop for OutValue {
    fn drop(&mut self) {
        if self.0.g_type != gobject_ffi::G_TYPE_INVALID {
            // SAFETY: initialized by the callee
            unsafe { gobject_ffi::g_value_unset(&mut self.0) };
        }
    }
}

/// Copy a transfer-full `GSList` of strings and free it.
unsafe fn take_string_list(list: *mut GSList) -> Vec<String> {
    let mut out = Vec::new();
    let mut node = list;
    while !node.is_null() {
        // SAFETY: caller passes a valid, owned list of gchar*
        unsafe {
            let data = (*node).data as *mut c_char;
            if !data.is_null() {
                out.push(CStr::from_ptr(data).to_string_lossy().into_owned());
                glib::ffi::g_free(data as glib::ffi::gpointer);
            }
            node = (*node).next;
        }
    }
    // SAFETY: nodes are no longer referenced
    unsafe { glib::ffi::g_slist_free(list) };
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_outside_gint_range_is_rejected() {
        let err = to_glib_value("Exposure Time (us)", &PropertyValue::Integer(1 << 40)).unwrap_err();
        match err {
            Error::InvalidValue { name, value, .. } => {
                assert_eq!(name, "Exposure Time (us)");
                assert_eq!(value, (1i64 << 40).to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_values_map_to_plugin_types() {
        let value = to_glib_value("Brightness", &PropertyValue::Integer(200)).unwrap();
        assert_eq!(value.get::<i32>().unwrap(), 200);

        let value = to_glib_value("Gain", &PropertyValue::Double(4.5)).unwrap();
        assert_eq!(value.get::<f64>().unwrap(), 4.5);

        let value = to_glib_value("Exposure Auto", &PropertyValue::Boolean(false)).unwrap();
        assert!(!value.get::<bool>().unwrap());

        let value = to_glib_value("Exposure Auto", &PropertyValue::from("Off")).unwrap();
        assert_eq!(value.get::<String>().unwrap(), "Off");
    }

    #[test]
    fn test_take_string_list() {
        // SAFETY: builds an owned list of g_strdup'd strings, as the plugin returns
        let entries = unsafe {
            let mut list: *mut GSList = std::ptr::null_mut();
            for entry in [c"Off", c"Once", c"Continuous"] {
                let copy = glib::ffi::g_strdup(entry.as_ptr());
                list = glib::ffi::g_slist_append(list, copy as glib::ffi::gpointer);
            }
            take_string_list(list)
        };
        assert_eq!(entries, ["Off", "Once", "Continuous"]);

        // SAFETY: an empty list is NULL
        assert!(unsafe { take_string_list(std::ptr::null_mut()) }.is_empty());
    }

    #[test]
    fn test_unset_out_value_reads_nothing() {
        let value = OutValue::new();
        assert!(value.property_value().is_none());
        assert!(value.string().is_none());
        assert!(value.int().is_none());
    }
}
