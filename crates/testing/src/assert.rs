// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use roaring::RoaringBitmap;
use segmentdb_column::{ColumnIndexContainer, DictId};

/// Asserts that the inverted index partitions `[0, total_docs)` by dictionary id
/// and agrees with the forward index.
pub fn assert_partition(container: &dyn ColumnIndexContainer, total_docs: u32) {
	let dictionary = container.dictionary();
	let inverted = container.inverted_index();
	let reader = container.reader();

	let mut covered = RoaringBitmap::new();
	for id in 0..dictionary.len() {
		let id = DictId(id);
		let rows = inverted.rows_for(id);
		assert!(covered.is_disjoint(&rows), "rows of dictionary id {} overlap another id", id);
		for row in &rows {
			assert_eq!(reader.dict_id(row), Some(id), "row {} is listed under id {}", row, id);
		}
		covered |= rows;
	}

	let mut expected = RoaringBitmap::new();
	expected.insert_range(0..total_docs);
	assert_eq!(covered, expected, "inverted index does not cover every row exactly once");
}

/// Asserts that reader, dictionary and inverted index agree on every row.
pub fn assert_container_consistent(container: &dyn ColumnIndexContainer) {
	let dictionary = container.dictionary();
	let inverted = container.inverted_index();
	let reader = container.reader();

	for row in 0..reader.num_docs() {
		let id = reader.dict_id(row).unwrap_or_else(|| panic!("row {} has no dictionary id", row));
		let value = reader.value(row).unwrap_or_else(|| panic!("row {} has no value", row));

		assert_eq!(value.get_type(), dictionary.data_type(), "row {} has the wrong type", row);
		assert_eq!(dictionary.value_of(id), Some(value.clone()), "row {} disagrees with the dictionary", row);
		assert_eq!(dictionary.id_of(&value), Some(id), "value {} does not map back to id {}", value, id);
		assert!(inverted.rows_for(id).contains(row), "row {} is missing from the inverted index", row);
	}

	let values: Vec<_> = (0..dictionary.len()).filter_map(|id| dictionary.value_of(DictId(id))).collect();
	assert_eq!(values.len() as u32, dictionary.len(), "dictionary has holes");
	assert_eq!(dictionary.min_value(), values.iter().min().cloned());
	assert_eq!(dictionary.max_value(), values.iter().max().cloned());
	if dictionary.is_sorted() {
		assert!(values.windows(2).all(|pair| pair[0] < pair[1]), "dictionary claims to be sorted but is not");
	}
}

/// Asserts that two containers serve identical contents: per-row values and
/// ids, the dictionary mapping in both directions and every row set.
pub fn assert_same_contents(left: &dyn ColumnIndexContainer, right: &dyn ColumnIndexContainer) {
	assert_eq!(left.reader().num_docs(), right.reader().num_docs());
	assert_eq!(left.dictionary().data_type(), right.dictionary().data_type());
	assert_eq!(left.dictionary().len(), right.dictionary().len());
	assert_eq!(left.dictionary().is_sorted(), right.dictionary().is_sorted());
	for row in 0..left.reader().num_docs() {
		assert_eq!(left.reader().value(row), right.reader().value(row), "row {} differs", row);
		assert_eq!(left.reader().dict_id(row), right.reader().dict_id(row), "row {} id differs", row);
	}
	for id in 0..left.dictionary().len() {
		let id = DictId(id);
		let value = left.dictionary().value_of(id);
		assert_eq!(value, right.dictionary().value_of(id), "dictionary id {} differs", id);
		if let Some(value) = value {
			assert_eq!(
				left.dictionary().id_of(&value),
				right.dictionary().id_of(&value),
				"value {} maps differently",
				value
			);
		}
		assert_eq!(
			left.inverted_index().rows_for(id),
			right.inverted_index().rows_for(id),
			"rows of id {} differ",
			id
		);
	}
}
