// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_type::FieldSpec;

use crate::{
	container::VirtualColumnIndexContainer,
	context::VirtualColumnContext,
	error::Result,
	index::{Dictionary, ForwardIndexReader, InvertedIndex},
	metadata::{ColumnMetadata, build_shared_metadata},
};

mod constant;
mod derived;
mod row_index;

pub use constant::{CONSTANT_VALUE_PARAM, ConstantProvider, constant_params};
pub use derived::{DerivedFunction, DerivedProvider};
pub use row_index::RowIndexProvider;

/// Synthesizes the index triad of a column that has no stored data.
///
/// Providers are stateless with respect to segments. Every build works only
/// from its context, so one provider instance may serve any number of
/// segments concurrently.
pub trait VirtualColumnProvider: Send + Sync {
	/// Columns that must be resolved before this one can be built.
	fn dependencies(&self, _field: &FieldSpec) -> Vec<String> {
		Vec::new()
	}

	fn build_reader(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn ForwardIndexReader>>;

	fn build_dictionary(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn Dictionary>>;

	fn build_inverted_index(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn InvertedIndex>>;

	fn build_metadata(&self, ctx: &VirtualColumnContext<'_>) -> ColumnMetadata {
		build_shared_metadata(ctx)
	}

	/// Builds all three parts or none of them.
	fn build_column_index_container(&self, ctx: &VirtualColumnContext<'_>) -> Result<VirtualColumnIndexContainer> {
		let reader = self.build_reader(ctx)?;
		let inverted_index = self.build_inverted_index(ctx)?;
		let dictionary = self.build_dictionary(ctx)?;
		Ok(VirtualColumnIndexContainer::new(reader, dictionary, inverted_index))
	}
}
