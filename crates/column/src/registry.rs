// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use dashmap::DashMap;
use segmentdb_type::FieldSpec;
use tracing::{debug, instrument};

use crate::{
	context::VirtualColumnContext,
	error::{ColumnError, Result},
	index::ColumnIndexContainer,
	metadata::ColumnMetadata,
	provider::{ConstantProvider, RowIndexProvider, VirtualColumnProvider},
};

pub const ROW_INDEX: &str = "row_index";
pub const CONSTANT: &str = "constant";

/// A virtual column built by a provider, ready to be published.
pub struct BuiltColumn {
	pub metadata: ColumnMetadata,
	pub container: Arc<dyn ColumnIndexContainer>,
}

/// Maps provider kinds to provider instances.
///
/// Lookups are lock-free reads; registration may happen while segments are
/// being loaded on other threads.
pub struct VirtualColumnRegistry {
	providers: DashMap<String, Arc<dyn VirtualColumnProvider>>,
}

impl Default for VirtualColumnRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualColumnRegistry {
	/// A registry holding the `row_index` and `constant` providers.
	pub fn new() -> Self {
		let result = Self::empty();
		result.register(ROW_INDEX, RowIndexProvider);
		result.register(CONSTANT, ConstantProvider);
		result
	}

	pub fn empty() -> Self {
		Self {
			providers: DashMap::new(),
		}
	}

	/// Registers `provider` under `kind`, returning the provider it replaces.
	pub fn register(
		&self,
		kind: impl Into<String>,
		provider: impl VirtualColumnProvider + 'static,
	) -> Option<Arc<dyn VirtualColumnProvider>> {
		let kind = kind.into();
		debug!(kind = %kind, "registering virtual column provider");
		self.providers.insert(kind, Arc::new(provider))
	}

	pub fn find(&self, kind: &str) -> Option<Arc<dyn VirtualColumnProvider>> {
		self.providers.get(kind).map(|entry| entry.value().clone())
	}

	pub fn contains(&self, kind: &str) -> bool {
		self.providers.contains_key(kind)
	}

	pub fn kinds(&self) -> Vec<String> {
		let mut result: Vec<String> = self.providers.iter().map(|entry| entry.key().clone()).collect();
		result.sort();
		result
	}

	/// The provider serving `field`. Fails for stored fields and unknown kinds.
	pub fn resolve(&self, field: &FieldSpec) -> Result<Arc<dyn VirtualColumnProvider>> {
		let Some(kind) = field.virtual_provider.as_deref() else {
			return Err(ColumnError::InvalidContext {
				reason: format!("column `{}` is stored, not virtual", field.name),
			});
		};

		self.find(kind).ok_or_else(|| ColumnError::UnknownProvider {
			column: field.name.clone(),
			kind: kind.to_string(),
		})
	}

	/// Builds the metadata and container of the virtual column described by `ctx`.
	#[instrument(name = "column::registry::build", level = "debug", skip(self, ctx), fields(column = %ctx.column_name()))]
	pub fn build(&self, ctx: &VirtualColumnContext<'_>) -> Result<BuiltColumn> {
		let provider = self.resolve(ctx.field())?;
		build_with(provider.as_ref(), ctx)
	}
}

/// Builds a column with an explicit provider, bypassing kind lookup.
pub fn build_with(provider: &dyn VirtualColumnProvider, ctx: &VirtualColumnContext<'_>) -> Result<BuiltColumn> {
	let container = provider.build_column_index_container(ctx)?;
	let metadata = provider.build_metadata(ctx).with_dictionary(container.dictionary());

	Ok(BuiltColumn {
		metadata,
		container: Arc::new(container),
	})
}
