// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! The Imaging Source camera plugin: property access through TcamProp and
//! device state through the `state` element property.

mod ffi;
mod tcambin;

pub use tcambin::TcamBin;
