// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use segmentdb_type::{FieldSpec, Params, Value};

use crate::{
	error::{ColumnError, Result},
	index::ColumnIndexContainer,
};

/// Resolves sibling columns of the segment under construction.
pub trait ColumnLookup: Send + Sync {
	fn column(&self, name: &str) -> Option<Arc<dyn ColumnIndexContainer>>;
}

impl ColumnLookup for HashMap<String, Arc<dyn ColumnIndexContainer>> {
	fn column(&self, name: &str) -> Option<Arc<dyn ColumnIndexContainer>> {
		self.get(name).cloned()
	}
}

struct NoColumns;

impl ColumnLookup for NoColumns {
	fn column(&self, _name: &str) -> Option<Arc<dyn ColumnIndexContainer>> {
		None
	}
}

static NO_COLUMNS: NoColumns = NoColumns;

/// Everything a provider needs to build one virtual column.
#[derive(Clone)]
pub struct VirtualColumnContext<'a> {
	field: FieldSpec,
	total_docs: u32,
	params: Params,
	columns: &'a dyn ColumnLookup,
}

impl VirtualColumnContext<'static> {
	/// A context without sibling columns, for providers with no dependencies.
	pub fn new(field: FieldSpec, total_docs: u32) -> Self {
		Self {
			field,
			total_docs,
			params: Params::None,
			columns: &NO_COLUMNS,
		}
	}
}

impl<'a> VirtualColumnContext<'a> {
	pub fn builder() -> VirtualColumnContextBuilder<'a> {
		VirtualColumnContextBuilder::default()
	}

	pub fn field(&self) -> &FieldSpec {
		&self.field
	}

	pub fn column_name(&self) -> &str {
		&self.field.name
	}

	pub fn total_docs(&self) -> u32 {
		self.total_docs
	}

	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Named parameter, falling back to the first positional one.
	pub fn param(&self, name: &str) -> Option<&Value> {
		self.params.get_named(name).or_else(|| self.params.get_positional(0))
	}

	pub fn require_param(&self, name: &str) -> Result<&Value> {
		self.param(name).ok_or_else(|| ColumnError::MissingParameter {
			column: self.field.name.clone(),
			parameter: name.to_string(),
		})
	}

	/// A column this one depends on. Fails when the segment has not resolved it.
	pub fn dependency(&self, name: &str) -> Result<Arc<dyn ColumnIndexContainer>> {
		self.columns.column(name).ok_or_else(|| ColumnError::DependencyUnavailable {
			column: self.field.name.clone(),
			dependency: name.to_string(),
		})
	}

	pub fn with_params(mut self, params: Params) -> Self {
		self.params = params;
		self
	}
}

#[derive(Default)]
pub struct VirtualColumnContextBuilder<'a> {
	field: Option<FieldSpec>,
	total_docs: Option<i64>,
	params: Params,
	columns: Option<&'a dyn ColumnLookup>,
}

impl<'a> VirtualColumnContextBuilder<'a> {
	pub fn field(mut self, field: FieldSpec) -> Self {
		self.field = Some(field);
		self
	}

	pub fn total_docs(mut self, total_docs: impl Into<i64>) -> Self {
		self.total_docs = Some(total_docs.into());
		self
	}

	pub fn params(mut self, params: Params) -> Self {
		self.params = params;
		self
	}

	pub fn columns(mut self, columns: &'a dyn ColumnLookup) -> Self {
		self.columns = Some(columns);
		self
	}

	pub fn build(self) -> Result<VirtualColumnContext<'a>> {
		let Some(field) = self.field else {
			return Err(ColumnError::InvalidContext {
				reason: "field descriptor is missing".to_string(),
			});
		};

		let Some(total_docs) = self.total_docs else {
			return Err(ColumnError::InvalidContext {
				reason: format!("document count for column `{}` is missing", field.name),
			});
		};

		let total_docs = u32::try_from(total_docs).map_err(|_| ColumnError::InvalidContext {
			reason: format!("document count {} for column `{}` is outside [0, {}]", total_docs, field.name, u32::MAX),
		})?;

		Ok(VirtualColumnContext {
			field,
			total_docs,
			params: self.params,
			columns: self.columns.unwrap_or(&NO_COLUMNS),
		})
	}
}

#[cfg(test)]
mod tests {
	use segmentdb_type::{Type, params};

	use super::*;

	#[test]
	fn test_builder() {
		let ctx = VirtualColumnContext::builder()
			.field(FieldSpec::dimension("country", Type::Utf8))
			.total_docs(3)
			.params(params! { value: "US" })
			.build()
			.unwrap();
		assert_eq!(ctx.column_name(), "country");
		assert_eq!(ctx.total_docs(), 3);
		assert_eq!(ctx.param("value"), Some(&Value::utf8("US")));
	}

	#[test]
	fn test_missing_field() {
		let err = VirtualColumnContext::builder().total_docs(3).build().err().unwrap();
		assert!(matches!(err, ColumnError::InvalidContext { .. }));
	}

	#[test]
	fn test_missing_total_docs() {
		let err =
			VirtualColumnContext::builder().field(FieldSpec::dimension("a", Type::Int4)).build().err().unwrap();
		assert!(matches!(err, ColumnError::InvalidContext { .. }));
	}

	#[test]
	fn test_negative_total_docs() {
		let err = VirtualColumnContext::builder()
			.field(FieldSpec::dimension("a", Type::Int4))
			.total_docs(-1)
			.build()
			.err()
			.unwrap();
		assert!(matches!(err, ColumnError::InvalidContext { .. }));
	}

	#[test]
	fn test_total_docs_above_u32() {
		let err = VirtualColumnContext::builder()
			.field(FieldSpec::dimension("a", Type::Int4))
			.total_docs(u32::MAX as i64 + 1)
			.build()
			.err()
			.unwrap();
		assert!(matches!(err, ColumnError::InvalidContext { .. }));
	}

	#[test]
	fn test_positional_param_fallback() {
		let ctx = VirtualColumnContext::new(FieldSpec::dimension("a", Type::Int8), 1).with_params(params![5i64]);
		assert_eq!(ctx.param("value"), Some(&Value::Int8(5)));
	}

	#[test]
	fn test_require_param() {
		let ctx = VirtualColumnContext::new(FieldSpec::dimension("country", Type::Utf8), 3);
		let err = ctx.require_param("value").unwrap_err();
		assert_eq!(
			err,
			ColumnError::MissingParameter {
				column: "country".to_string(),
				parameter: "value".to_string(),
			}
		);
	}

	#[test]
	fn test_dependency_unavailable() {
		let ctx = VirtualColumnContext::new(FieldSpec::metric("revenue", Type::Float8), 3);
		let err = ctx.dependency("price").err().unwrap();
		assert!(matches!(err, ColumnError::DependencyUnavailable { dependency, .. } if dependency == "price"));
	}
}
