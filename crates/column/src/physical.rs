// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_type::{FieldSpec, Value};
use tracing::instrument;

use crate::{
	encode::{DictionaryEncoder, EncodedDictionary, EncodedForwardIndex, EncodedInvertedIndex},
	error::{ColumnError, Result},
	index::{ColumnIndexContainer, Dictionary, ForwardIndexReader, InvertedIndex},
};

/// Container for a column whose values are stored in the segment.
pub struct PhysicalColumnIndexContainer {
	reader: EncodedForwardIndex,
	dictionary: EncodedDictionary,
	inverted_index: EncodedInvertedIndex,
}

impl PhysicalColumnIndexContainer {
	/// Encodes `values` for `field`. Undefined cells are replaced by the
	/// field's default null value.
	#[instrument(name = "column::physical::encode", level = "trace", skip(field, values), fields(column = %field.name, rows = values.len()))]
	pub fn encode(field: &FieldSpec, values: Vec<Value>) -> Result<Self> {
		let null = field.default_null_value();
		let mut encoder = DictionaryEncoder::with_capacity(field.data_type, values.len());

		for value in values {
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

		let encoded = encoder.finish();
		Ok(Self {
			reader: encoded.forward,
			dictionary: encoded.dictionary,
			inverted_index: encoded.inverted,
		})
	}
}

impl ColumnIndexContainer for PhysicalColumnIndexContainer {
	fn reader(&self) -> &dyn ForwardIndexReader {
		&self.reader
	}

	fn dictionary(&self) -> &dyn Dictionary {
		&self.dictionary
	}

	fn inverted_index(&self) -> &dyn InvertedIndex {
		&self.inverted_index
	}
}
