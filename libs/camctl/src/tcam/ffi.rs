// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! TcamProp GObject interface, resolved from libtcamprop at runtime.
//!
//! The library is opened on first use and kept loaded for the rest of the
//! process; the function pointers below borrow from it.

use std::ffi::{c_char, OsString};
use std::sync::OnceLock;

use glib::ffi::{gboolean, GSList, GType};
use glib::gobject_ffi::GValue;
use libloading::Library;

use crate::error::{Error, Result};

/// Overrides the library search below.
pub const LIBRARY_ENV: &str = "CAMCTL_TCAMPROP_LIB";

const LIBRARY_CANDIDATES: &[&str] = &["libtcamprop.so", "libtcamprop.so.0", "libtcamprop.so.1"];

/// Opaque instance of any object implementing the TcamProp interface.
#[repr(C)]
pub struct TcamProp {
    _private: [u8; 0],
}

type GetTypeFn = unsafe extern "C" fn() -> GType;

/// Returns: (element-type utf8) (transfer full)
type GetNamesFn = unsafe extern "C" fn(self_: *mut TcamProp) -> *mut GSList;

/// Every out-parameter is optional (NULL). Zeroed GValues are initialized
/// by the callee.
type GetPropertyFn = unsafe extern "C" fn(
    self_: *mut TcamProp,
    name: *const c_char,
    value: *mut GValue,
    min: *mut GValue,
    max: *mut GValue,
    def: *mut GValue,
    step: *mut GValue,
    value_type: *mut GValue,
    flags: *mut GValue,
    category: *mut GValue,
    group: *mut GValue,
) -> gboolean;

type SetPropertyFn =
    unsafe extern "C" fn(self_: *mut TcamProp, name: *const c_char, value: *const GValue) -> gboolean;

/// Returns: (element-type utf8) (transfer full)
type GetMenuEntriesFn = unsafe extern "C" fn(self_: *mut TcamProp, name: *const c_char) -> *mut GSList;

pub struct TcamPropApi {
    pub get_type: GetTypeFn,
    pub get_tcam_property_names: GetNamesFn,
    pub get_tcam_property: GetPropertyFn,
    pub set_tcam_property: SetPropertyFn,
    pub get_tcam_menu_entries: GetMenuEntriesFn,
    // Must outlive the pointers above
    _library: Library,
}

static API: OnceLock<std::result::Result<TcamPropApi, String>> = OnceLock::new();

impl TcamPropApi {
    /// The process-wide API table, loading the library on first call.
    pub fn get() -> Result<&'static TcamPropApi> {
        API.get_or_init(Self::load)
            .as_ref()
            .map_err(|reason| Error::Library(reason.clone()))
    }

    fn load() -> std::result::Result<TcamPropApi, String> {
        let candidates: Vec<OsString> = match std::env::var_os(LIBRARY_ENV) {
            Some(path) => vec![path],
            None => LIBRARY_CANDIDATES.iter().map(OsString::from).collect(),
        };

        let mut failures = Vec::new();
        for candidate in &candidates {
            // SAFETY: libtcamprop has no load-time side effects beyond GType registration
            match unsafe { Self::open(candidate) } {
                Ok(api) => {
                    tracing::debug!("Loaded {}", candidate.to_string_lossy());
                    return Ok(api);
                }
                Err(err) => failures.push(format!("{}: {}", candidate.to_string_lossy(), err)),
            }
        }
        Err(failures.join("; "))
    }

    unsafe fn open(name: &OsString) -> std::result::Result<TcamPropApi, libloading::Error> {
        // SAFETY: symbol signatures follow tcamprop.h
        unsafe {
            let library = Library::new(name)?;
            let get_type = *library.get::<GetTypeFn>(b"tcam_prop_get_type\0")?;
            let get_tcam_property_names =
                *library.get::<GetNamesFn>(b"tcam_prop_get_tcam_property_names\0")?;
            let get_tcam_property = *library.get::<GetPropertyFn>(b"tcam_prop_get_tcam_property\0")?;
            let set_tcam_property = *library.get::<SetPropertyFn>(b"tcam_prop_set_tcam_property\0")?;
            let get_tcam_menu_entries =
                *library.get::<GetMenuEntriesFn>(b"tcam_prop_get_tcam_menu_entries\0")?;

            Ok(TcamPropApi {
                get_type,
                get_tcam_property_names,
                get_tcam_property,
                set_tcam_property,
                get_tcam_menu_entries,
                _library: library,
            })
        }
    }
}
