// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use roaring::RoaringBitmap;
use segmentdb_type::{Params, Type, Value};

use crate::{
	context::VirtualColumnContext,
	error::{ColumnError, Result},
	index::{DictId, Dictionary, ForwardIndexReader, InvertedIndex, RowId},
	provider::VirtualColumnProvider,
};

/// Parameter carrying the literal of a constant column.
pub const CONSTANT_VALUE_PARAM: &str = "value";

/// Parameters for a constant column serving `value`.
pub fn constant_params(value: Value) -> Params {
	Params::Named(HashMap::from([(CONSTANT_VALUE_PARAM.to_string(), value)]))
}

/// Serves the same literal for every row of the segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantProvider;

impl ConstantProvider {
	fn literal(ctx: &VirtualColumnContext<'_>) -> Result<Value> {
		let value = ctx.require_param(CONSTANT_VALUE_PARAM)?;
		let expected = ctx.field().data_type;
		if value.get_type() != expected {
			return Err(ColumnError::TypeMismatch {
				column: ctx.column_name().to_string(),
				expected,
				actual: value.get_type(),
			});
		}
		Ok(value.clone())
	}
}

impl VirtualColumnProvider for ConstantProvider {
	fn build_reader(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn ForwardIndexReader>> {
		Ok(Box::new(ConstantReader {
			value: Self::literal(ctx)?,
			total_docs: ctx.total_docs(),
		}))
	}

	fn build_dictionary(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn Dictionary>> {
		Ok(Box::new(ConstantDictionary {
			value: Self::literal(ctx)?,
		}))
	}

	fn build_inverted_index(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn InvertedIndex>> {
		let mut rows = RoaringBitmap::new();
		rows.insert_range(0..ctx.total_docs());
		Ok(Box::new(ConstantInvertedIndex {
			rows,
		}))
	}
}

struct ConstantReader {
	value: Value,
	total_docs: u32,
}

impl ForwardIndexReader for ConstantReader {
	fn num_docs(&self) -> u32 {
		self.total_docs
	}

	fn dict_id(&self, row: RowId) -> Option<DictId> {
		(row < self.total_docs).then_some(DictId(0))
	}

	fn value(&self, row: RowId) -> Option<Value> {
		(row < self.total_docs).then(|| self.value.clone())
	}
}

struct ConstantDictionary {
	value: Value,
}

impl Dictionary for ConstantDictionary {
	fn data_type(&self) -> Type {
		self.value.get_type()
	}

	fn len(&self) -> u32 {
		1
	}

	fn value_of(&self, id: DictId) -> Option<Value> {
		(id.0 == 0).then(|| self.value.clone())
	}

	fn id_of(&self, value: &Value) -> Option<DictId> {
		(*value == self.value).then_some(DictId(0))
	}

	fn is_sorted(&self) -> bool {
		true
	}

	fn min_value(&self) -> Option<Value> {
		Some(self.value.clone())
	}

	fn max_value(&self) -> Option<Value> {
		Some(self.value.clone())
	}
}

struct ConstantInvertedIndex {
	rows: RoaringBitmap,
}

impl InvertedIndex for ConstantInvertedIndex {
	fn rows_for(&self, id: DictId) -> RoaringBitmap {
		if id.0 == 0 {
			self.rows.clone()
		} else {
			RoaringBitmap::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use segmentdb_type::{FieldSpec, params};

	use super::*;
	use crate::index::ColumnIndexContainer;

	#[test]
	fn test_constant_column() {
		let ctx = VirtualColumnContext::new(FieldSpec::dimension("country", Type::Utf8), 3)
			.with_params(params! { value: "US" });
		let container = ConstantProvider.build_column_index_container(&ctx).unwrap();

		for row in 0..3 {
			assert_eq!(container.reader().value(row), Some(Value::utf8("US")));
			assert_eq!(container.reader().dict_id(row), Some(DictId(0)));
		}
		assert_eq!(container.dictionary().len(), 1);
		assert_eq!(container.dictionary().value_of(DictId(0)), Some(Value::utf8("US")));
		let rows: Vec<u32> = container.inverted_index().rows_for(DictId(0)).iter().collect();
		assert_eq!(rows, vec![0, 1, 2]);
	}

	#[test]
	fn test_constant_params() {
		let params = constant_params(Value::int8(7));
		assert_eq!(params, params! { value: 7i64 });

		let ctx = VirtualColumnContext::new(FieldSpec::metric("seven", Type::Int8), 2).with_params(params);
		let container = ConstantProvider.build_column_index_container(&ctx).unwrap();
		assert_eq!(container.reader().value(1), Some(Value::Int8(7)));
	}

	#[test]
	fn test_unknown_value() {
		let ctx = VirtualColumnContext::new(FieldSpec::dimension("country", Type::Utf8), 3)
			.with_params(params! { value: "US" });
		let container = ConstantProvider.build_column_index_container(&ctx).unwrap();
		assert_eq!(container.dictionary().id_of(&Value::utf8("DE")), None);
		assert!(container.rows_matching(&Value::utf8("DE")).is_empty());
		assert!(container.inverted_index().rows_for(DictId(1)).is_empty());
	}

	#[test]
	fn test_missing_value() {
		let ctx = VirtualColumnContext::new(FieldSpec::dimension("country", Type::Utf8), 3);
		let err = ConstantProvider.build_column_index_container(&ctx).err().unwrap();
		assert_eq!(
			err,
			ColumnError::MissingParameter {
				column: "country".to_string(),
				parameter: "value".to_string(),
			}
		);
	}

	#[test]
	fn test_value_type_mismatch() {
		let ctx = VirtualColumnContext::new(FieldSpec::metric("clicks", Type::Int8), 3)
			.with_params(params! { value: "many" });
		let err = ConstantProvider.build_column_index_container(&ctx).err().unwrap();
		assert!(matches!(err, ColumnError::TypeMismatch { expected: Type::Int8, actual: Type::Utf8, .. }));
	}

	#[test]
	fn test_zero_docs() {
		let ctx = VirtualColumnContext::new(FieldSpec::metric("one", Type::Int8), 0)
			.with_params(params! { value: 1i64 });
		let container = ConstantProvider.build_column_index_container(&ctx).unwrap();
		assert_eq!(container.reader().value(0), None);
		assert!(container.inverted_index().rows_for(DictId(0)).is_empty());
	}
}
