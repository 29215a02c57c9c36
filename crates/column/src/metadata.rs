// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_type::{FieldKind, FieldSpec, Type};
use serde::{Deserialize, Serialize};

use crate::{context::VirtualColumnContext, index::Dictionary};

/// Descriptive metadata published next to every column container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
	pub name: String,
	pub kind: FieldKind,
	pub data_type: Type,
	pub total_docs: u32,
	pub is_virtual: bool,
	pub cardinality: u32,
	pub is_sorted: bool,
}

impl ColumnMetadata {
	pub fn physical(field: &FieldSpec, total_docs: u32) -> Self {
		Self {
			name: field.name.clone(),
			kind: field.kind,
			data_type: field.data_type,
			total_docs,
			is_virtual: false,
			cardinality: 0,
			is_sorted: false,
		}
	}

	/// Fills the dictionary derived fields from a built dictionary.
	pub fn with_dictionary(mut self, dictionary: &dyn Dictionary) -> Self {
		self.cardinality = dictionary.len();
		self.is_sorted = dictionary.is_sorted();
		self
	}
}

/// The metadata every virtual column shares, derived only from the context.
pub fn build_shared_metadata(ctx: &VirtualColumnContext<'_>) -> ColumnMetadata {
	let field = ctx.field();
	ColumnMetadata {
		name: field.name.clone(),
		kind: field.kind,
		data_type: field.data_type,
		total_docs: ctx.total_docs(),
		is_virtual: true,
		cardinality: 0,
		is_sorted: false,
	}
}
