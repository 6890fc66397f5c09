// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Property model: types, values, descriptions and the access trait.

mod assignment;
mod info;
mod provider;
mod value;

pub use assignment::Assignment;
pub use info::PropertyInfo;
pub use provider::PropertyProvider;
pub use value::{PropertyType, PropertyValue};
