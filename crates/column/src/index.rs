// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The three read-side structures every column exposes.
//!
//! A column maps each row in `[0, total_docs)` to a dictionary id. The
//! forward index answers "which value does row r hold", the dictionary maps
//! ids to values and back, and the inverted index answers "which rows hold
//! value id d". Implementations are immutable once built and are shared
//! across query threads without locking.

use std::{fmt, ops::Deref};

use roaring::RoaringBitmap;
use segmentdb_type::{Type, Value};
use serde::{Deserialize, Serialize};

/// Position of a document inside a segment.
pub type RowId = u32;

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct DictId(pub u32);

impl Deref for DictId {
	type Target = u32;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<u32> for DictId {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl From<DictId> for u32 {
	fn from(value: DictId) -> Self {
		value.0
	}
}

impl fmt::Display for DictId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

pub trait ForwardIndexReader: Send + Sync {
	/// Number of rows this reader covers.
	fn num_docs(&self) -> u32;

	/// Dictionary id stored at `row`, `None` when `row` is out of range.
	fn dict_id(&self, row: RowId) -> Option<DictId>;

	/// Value stored at `row`, `None` when `row` is out of range.
	fn value(&self, row: RowId) -> Option<Value>;
}

pub trait Dictionary: Send + Sync {
	fn data_type(&self) -> Type;

	fn len(&self) -> u32;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn value_of(&self, id: DictId) -> Option<Value>;

	fn id_of(&self, value: &Value) -> Option<DictId>;

	/// True when ids are assigned in ascending value order.
	fn is_sorted(&self) -> bool;

	fn min_value(&self) -> Option<Value>;

	fn max_value(&self) -> Option<Value>;
}

pub trait InvertedIndex: Send + Sync {
	/// Rows holding dictionary id `id`. Unknown ids yield an empty set.
	fn rows_for(&self, id: DictId) -> RoaringBitmap;
}

/// Bundles the forward index, dictionary and inverted index of one column.
pub trait ColumnIndexContainer: Send + Sync {
	fn reader(&self) -> &dyn ForwardIndexReader;

	fn dictionary(&self) -> &dyn Dictionary;

	fn inverted_index(&self) -> &dyn InvertedIndex;

	/// Rows whose value equals `value`.
	fn rows_matching(&self, value: &Value) -> RoaringBitmap {
		match self.dictionary().id_of(value) {
			Some(id) => self.inverted_index().rows_for(id),
			None => RoaringBitmap::new(),
		}
	}
}
