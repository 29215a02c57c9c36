// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use roaring::RoaringBitmap;
use segmentdb_type::{Type, Value};

use crate::{
	context::VirtualColumnContext,
	error::{ColumnError, Result},
	index::{DictId, Dictionary, ForwardIndexReader, InvertedIndex, RowId},
	provider::VirtualColumnProvider,
};

/// Serves each row's own position: `value(r) == r` for every row.
///
/// Every value is distinct and ids equal row positions, so the dictionary
/// is the identity mapping and the inverted index holds one row per id.
#[derive(Debug, Default, Clone, Copy)]
pub struct RowIndexProvider;

impl RowIndexProvider {
	fn data_type(ctx: &VirtualColumnContext<'_>) -> Result<Type> {
		let data_type = ctx.field().data_type;
		let overflows_int4 = data_type == Type::Int4 && ctx.total_docs() > i32::MAX as u32 + 1;
		if !data_type.is_integer() || overflows_int4 {
			return Err(ColumnError::UnsupportedType {
				column: ctx.column_name().to_string(),
				provider: "row_index".to_string(),
				data_type,
			});
		}
		Ok(data_type)
	}
}

impl VirtualColumnProvider for RowIndexProvider {
	fn build_reader(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn ForwardIndexReader>> {
		Ok(Box::new(RowIndexReader {
			data_type: Self::data_type(ctx)?,
			total_docs: ctx.total_docs(),
		}))
	}

	fn build_dictionary(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn Dictionary>> {
		Ok(Box::new(RowIndexDictionary {
			data_type: Self::data_type(ctx)?,
			total_docs: ctx.total_docs(),
		}))
	}

	fn build_inverted_index(&self, ctx: &VirtualColumnContext<'_>) -> Result<Box<dyn InvertedIndex>> {
		Ok(Box::new(RowIndexInvertedIndex {
			total_docs: ctx.total_docs(),
		}))
	}
}

fn row_value(data_type: Type, row: RowId) -> Value {
	match data_type {
		Type::Int4 => Value::Int4(row as i32),
		_ => Value::Int8(row as i64),
	}
}

struct RowIndexReader {
	data_type: Type,
	total_docs: u32,
}

impl ForwardIndexReader for RowIndexReader {
	fn num_docs(&self) -> u32 {
		self.total_docs
	}

	fn dict_id(&self, row: RowId) -> Option<DictId> {
		(row < self.total_docs).then_some(DictId(row))
	}

	fn value(&self, row: RowId) -> Option<Value> {
		(row < self.total_docs).then(|| row_value(self.data_type, row))
	}
}

struct RowIndexDictionary {
	data_type: Type,
	total_docs: u32,
}

impl Dictionary for RowIndexDictionary {
	fn data_type(&self) -> Type {
		self.data_type
	}

	fn len(&self) -> u32 {
		self.total_docs
	}

	fn value_of(&self, id: DictId) -> Option<Value> {
		(id.0 < self.total_docs).then(|| row_value(self.data_type, id.0))
	}

	fn id_of(&self, value: &Value) -> Option<DictId> {
		if value.get_type() != self.data_type {
			return None;
		}
		let row = u32::try_from(value.as_i64()?).ok()?;
		(row < self.total_docs).then_some(DictId(row))
	}

	fn is_sorted(&self) -> bool {
		true
	}

	fn min_value(&self) -> Option<Value> {
		self.value_of(DictId(0))
	}

	fn max_value(&self) -> Option<Value> {
		let last = self.total_docs.checked_sub(1)?;
		self.value_of(DictId(last))
	}
}

struct RowIndexInvertedIndex {
	total_docs: u32,
}

impl InvertedIndex for RowIndexInvertedIndex {
	fn rows_for(&self, id: DictId) -> RoaringBitmap {
		let mut rows = RoaringBitmap::new();
		if id.0 < self.total_docs {
			rows.insert(id.0);
		}
		rows
	}
}
