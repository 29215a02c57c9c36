// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Column index containers for immutable segments.
//!
//! Stored columns are dictionary encoded into a forward index, a dictionary
//! and an inverted index. Virtual columns expose the same three structures
//! but synthesize them from a [`VirtualColumnContext`] through a
//! [`VirtualColumnProvider`] looked up in a [`VirtualColumnRegistry`].

pub mod config;
pub mod container;
pub mod context;
pub mod encode;
pub mod error;
pub mod index;
pub mod metadata;
pub mod physical;
pub mod provider;
pub mod registry;
pub mod segment;

pub use config::{ColumnFailurePolicy, SegmentLoadConfig};
pub use container::VirtualColumnIndexContainer;
pub use context::{ColumnLookup, VirtualColumnContext, VirtualColumnContextBuilder};
pub use error::{ColumnError, Result};
pub use index::{ColumnIndexContainer, DictId, Dictionary, ForwardIndexReader, InvertedIndex, RowId};
pub use metadata::{ColumnMetadata, build_shared_metadata};
pub use physical::PhysicalColumnIndexContainer;
pub use provider::{
	CONSTANT_VALUE_PARAM, ConstantProvider, DerivedFunction, DerivedProvider, RowIndexProvider, constant_params,
	VirtualColumnProvider,
};
pub use registry::{BuiltColumn, VirtualColumnRegistry};
pub use segment::{ColumnEntry, ColumnId, Segment, SegmentData, SegmentLoader};
