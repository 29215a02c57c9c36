// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared fixtures and assertions for column tests.

pub mod assert;
pub mod fixture;
pub mod logging;

pub use assert::{assert_container_consistent, assert_partition, assert_same_contents};
pub use logging::init_tracing;
