// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod field;
pub mod params;
pub mod schema;
pub mod value;

pub use error::{Diagnostic, Error, IntoDiagnostic};
pub use field::{FieldKind, FieldSpec};
pub use params::Params;
pub use schema::Schema;
pub use value::{IntoValue, OrderedF64, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
