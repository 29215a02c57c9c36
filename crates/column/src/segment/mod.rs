// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use segmentdb_type::{Params, Schema, Value};

use crate::{
	context::ColumnLookup, error::ColumnError, index::ColumnIndexContainer, metadata::ColumnMetadata,
};

mod builtin;
mod loader;
mod order;

pub use builtin::{DOC_ID, HOST_NAME, SEGMENT_NAME};
pub use loader::SegmentLoader;

/// Raw input of a segment load: the schema, stored column values and
/// per-column parameters for virtual columns.
#[derive(Debug, Clone)]
pub struct SegmentData {
	pub name: String,
	pub schema: Schema,
	pub total_docs: u32,
	pub columns: HashMap<String, Vec<Value>>,
	pub params: HashMap<String, Params>,
}

impl SegmentData {
	pub fn new(name: impl Into<String>, schema: Schema, total_docs: u32) -> Self {
		Self {
			name: name.into(),
			schema,
			total_docs,
			columns: HashMap::new(),
			params: HashMap::new(),
		}
	}

	pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
		self.columns.insert(name.into(), values);
		self
	}

	pub fn with_params(mut self, name: impl Into<String>, params: Params) -> Self {
		self.params.insert(name.into(), params);
		self
	}
}

/// Position of a column in a segment's column arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub usize);

pub struct ColumnEntry {
	pub metadata: ColumnMetadata,
	pub container: Arc<dyn ColumnIndexContainer>,
}

/// A loaded segment. Every column it exposes is complete; the set of
/// columns never changes after load.
pub struct Segment {
	name: String,
	schema: Schema,
	total_docs: u32,
	columns: Vec<ColumnEntry>,
	by_name: HashMap<String, ColumnId>,
	failures: Vec<ColumnError>,
}

impl Segment {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The schema as served, including built-in columns.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn total_docs(&self) -> u32 {
		self.total_docs
	}

	pub fn column_id(&self, name: &str) -> Option<ColumnId> {
		self.by_name.get(name).copied()
	}

	pub fn column(&self, name: &str) -> Option<&ColumnEntry> {
		self.column_id(name).and_then(|id| self.column_by_id(id))
	}

	pub fn column_by_id(&self, id: ColumnId) -> Option<&ColumnEntry> {
		self.columns.get(id.0)
	}

	pub fn container(&self, name: &str) -> Option<Arc<dyn ColumnIndexContainer>> {
		self.column(name).map(|entry| entry.container.clone())
	}

	pub fn metadata(&self, name: &str) -> Option<&ColumnMetadata> {
		self.column(name).map(|entry| &entry.metadata)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Columns in publication order.
	pub fn columns(&self) -> impl Iterator<Item = &ColumnEntry> {
		self.columns.iter()
	}

	pub fn column_names(&self) -> Vec<&str> {
		self.columns.iter().map(|entry| entry.metadata.name.as_str()).collect()
	}

	/// Columns left out under [`ColumnFailurePolicy::Skip`](crate::config::ColumnFailurePolicy::Skip).
	pub fn failures(&self) -> &[ColumnError] {
		&self.failures
	}
}

impl ColumnLookup for Segment {
	fn column(&self, name: &str) -> Option<Arc<dyn ColumnIndexContainer>> {
		self.container(name)
	}
}
