// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt, sync::Arc};

use segmentdb_type::{FieldSpec, Value};
use tracing::instrument;

use crate::{
	container::VirtualColumnIndexContainer,
	context::VirtualColumnContext,
	encode::{DictionaryEncoder, EncodedColumn},
	error::{ColumnError, Result},
	index::{ColumnIndexContainer, Dictionary, ForwardIndexReader, InvertedIndex},
	provider::VirtualColumnProvider,
};

/// Per-row expression over the input values, in input order.
pub type DerivedFunction = Arc<dyn Fn(&[Value]) -> std::result::Result<Value, String> + Send + Sync>;

/// Computes a column from other columns of the same segment.
///
/// The function must be deterministic. Its result for row `r` depends only
/// on the input values at row `r`. An `Undefined` result is stored as the
/// field's default null value.
#[derive(Clone)]
pub struct DerivedProvider {
	inputs: Vec<String>,
	function: DerivedFunction,
}

impl fmt::Debug for DerivedProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DerivedProvider").field("inputs", &self.inputs).finish_non_exhaustive()
	}
}

impl DerivedProvider {
	pub fn new<F>(inputs: impl IntoIterator<Item = impl Into<String>>, function: F) -> Self
	where
		F: Fn(&[Value]) -> std::result::Result<Value, String> + Send + Sync + 'static,
	{
		Self {
			inputs: inputs.into_iter().map(Into::into).collect(),
			function: Arc::new(function),
		}
	}

	pub fn inputs(&self) -> &[String] {
		&self.inputs
	}

	#[instrument(name = "column::derived::evaluate", level = "trace", skip(self, ctx), fields(column = %ctx.column_name(), rows = ctx.total_docs()))]
	fn evaluate(&self, ctx: &VirtualColumnContext<'_>) -> Result<EncodedColumn> {
		let field = ctx.field();
		let total_docs = ctx.total_docs();

		let inputs = self.inputs.iter().map(|name| ctx.dependency(name)).collect::<Result<Vec<_>>>()?;

		for (name, input) in self.inputs.iter().zip(&inputs) {
			let num_docs = input.reader().num_docs();
			if num_docs < total_docs {
				return Err(ColumnError::BuildFailure {
					column: field.name.clone(),
					reason: format!("input `{}` covers {} rows but the segment has {}", name, num_docs, total_docs),
				});
			}
		}

		let null = field.default_null_value();
		let mut encoder = DictionaryEncoder::with_capacity(field.data_type, total_docs as usize);
		let mut row_values = Vec::with_capacity(inputs.len());

		for row in 0..total_docs {
			row_values.clear();
			for (name, input) in self.inputs.iter().zip(&inputs) {
				let value = input.reader().value(row).ok_or_else(|| ColumnError::BuildFailure {
					column: field.name.clone(),
					reason: format!("input `{}` has no value at row {}", name, row),
				})?;
				row_values.push(value);
			}

			let value = (self.function)(&row_values).map_err(|reason| ColumnError::BuildFailure {
				column: field.name.clone(),
				reason: format!("expression failed at row {}: {}", row, reason),
			})?;

			let value = if value.is_undefined() {
				null.clone()
			} else {
				value
			};

			if value.get_type() != field.data_type {
				return Err(ColumnError::TypeMismatch {
					column: field.name.clone(),
					expected: field.data_type,
					actual: value.get_type(),
				});
			}

			encoder.push(value);
		}

		Ok(encoder.finish())
	}
}

impl VirtualColumnProvider for DerivedProvider {
	fn dependencies(&self, _field: &FieldSpec) -> Vec<String> {
		self.inputs.clone()
	}

	fn build_reader(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn ForwardIndexReader>> {
		Ok(Box::new(self.evaluate(ctx)?.forward))
	}

	fn build_dictionary(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn Dictionary>> {
		Ok(Box::new(self.evaluate(ctx)?.dictionary))
	}

	fn build_inverted_index(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn InvertedIndex>> {
		Ok(Box::new(self.evaluate(ctx)?.inverted))
	}

	/// Evaluates the expression once and splits the pass into the triad.
	fn build_column_index_container(&self, ctx: &VirtualColumnContext<'_>) -> Result<VirtualColumnIndexContainer> {
		let encoded = self.evaluate(ctx)?;
		Ok(VirtualColumnIndexContainer::new(
			Box::new(encoded.forward),
			Box::new(encoded.dictionary),
			Box::new(encoded.inverted),
		))
	}
}
