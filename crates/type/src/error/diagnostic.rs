// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Type-level diagnostics. Column and segment diagnostics live with the
//! column crate.

pub mod schema;
pub mod value;
