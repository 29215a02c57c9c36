// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use roaring::RoaringBitmap;
use segmentdb_type::{Type, Value};

use crate::index::{DictId, Dictionary, ForwardIndexReader, InvertedIndex, RowId};

/// Dictionary-encodes a column one row at a time.
///
/// Ids are handed out in first-seen order. Rows must be pushed in ascending
/// order starting at zero.
#[derive(Debug)]
pub struct DictionaryEncoder {
	data_type: Type,
	ids: HashMap<Value, DictId>,
	values: Vec<Value>,
	rows: Vec<RoaringBitmap>,
	dict_ids: Vec<DictId>,
}

impl DictionaryEncoder {
	pub fn new(data_type: Type) -> Self {
		Self {
			data_type,
			ids: HashMap::new(),
			values: Vec::new(),
			rows: Vec::new(),
			dict_ids: Vec::new(),
		}
	}

	pub fn with_capacity(data_type: Type, rows: usize) -> Self {
		let mut result = Self::new(data_type);
		result.dict_ids.reserve(rows);
		result
	}

	/// Number of rows pushed so far.
	pub fn num_docs(&self) -> u32 {
		self.dict_ids.len() as u32
	}

	pub fn push(&mut self, value: Value) -> DictId {
		let row = self.dict_ids.len() as RowId;
		let id = match self.ids.get(&value) {
			Some(id) => *id,
			None => {
				let id = DictId(self.values.len() as u32);
				self.ids.insert(value.clone(), id);
				self.values.push(value);
				self.rows.push(RoaringBitmap::new());
				id
			}
		};
		self.rows[id.0 as usize].insert(row);
		self.dict_ids.push(id);
		id
	}

	pub fn finish(self) -> EncodedColumn {
		let values: Arc<[Value]> = self.values.into();
		let sorted = values.windows(2).all(|pair| pair[0] < pair[1]);
		let min = values.iter().min().cloned();
		let max = values.iter().max().cloned();

		EncodedColumn {
			forward: EncodedForwardIndex {
				dict_ids: self.dict_ids,
				values: values.clone(),
			},
			dictionary: EncodedDictionary {
				data_type: self.data_type,
				values,
				ids: self.ids,
				sorted,
				min,
				max,
			},
			inverted: EncodedInvertedIndex {
				rows: self.rows,
			},
		}
	}
}

/// The output of a single encoding pass.
pub struct EncodedColumn {
	pub forward: EncodedForwardIndex,
	pub dictionary: EncodedDictionary,
	pub inverted: EncodedInvertedIndex,
}

#[derive(Debug)]
pub struct EncodedForwardIndex {
	dict_ids: Vec<DictId>,
	values: Arc<[Value]>,
}

impl ForwardIndexReader for EncodedForwardIndex {
	fn num_docs(&self) -> u32 {
		self.dict_ids.len() as u32
	}

	fn dict_id(&self, row: RowId) -> Option<DictId> {
		self.dict_ids.get(row as usize).copied()
	}

	fn value(&self, row: RowId) -> Option<Value> {
		let id = self.dict_id(row)?;
		self.values.get(id.0 as usize).cloned()
	}
}

#[derive(Debug)]
pub struct EncodedDictionary {
	data_type: Type,
	values: Arc<[Value]>,
	ids: HashMap<Value, DictId>,
	sorted: bool,
	min: Option<Value>,
	max: Option<Value>,
}

impl Dictionary for EncodedDictionary {
	fn data_type(&self) -> Type {
		self.data_type
	}

	fn len(&self) -> u32 {
		self.values.len() as u32
	}

	fn value_of(&self, id: DictId) -> Option<Value> {
		self.values.get(id.0 as usize).cloned()
	}

	fn id_of(&self, value: &Value) -> Option<DictId> {
		self.ids.get(value).copied()
	}

	fn is_sorted(&self) -> bool {
		self.sorted
	}

	fn min_value(&self) -> Option<Value> {
		self.min.clone()
	}

	fn max_value(&self) -> Option<Value> {
		self.max.clone()
	}
}

#[derive(Debug)]
pub struct EncodedInvertedIndex {
	rows: Vec<RoaringBitmap>,
}

impl InvertedIndex for EncodedInvertedIndex {
	fn rows_for(&self, id: DictId) -> RoaringBitmap {
		self.rows.get(id.0 as usize).cloned().unwrap_or_default()
	}
}
