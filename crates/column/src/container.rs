// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::index::{ColumnIndexContainer, Dictionary, ForwardIndexReader, InvertedIndex};

/// The index triad of a virtual column. Owns its three parts exclusively.
pub struct VirtualColumnIndexContainer {
	reader: Box<dyn ForwardIndexReader>,
	dictionary: Box<dyn Dictionary>,
	inverted_index: Box<dyn InvertedIndex>,
}

impl VirtualColumnIndexContainer {
	pub fn new(
		reader: Box<dyn ForwardIndexReader>,
		dictionary: Box<dyn Dictionary>,
		inverted_index: Box<dyn InvertedIndex>,
	) -> Self {
		Self {
			reader,
			dictionary,
			inverted_index,
		}
	}
}

impl ColumnIndexContainer for VirtualColumnIndexContainer {
	fn reader(&self) -> &dyn ForwardIndexReader {
		self.reader.as_ref()
	}

	fn dictionary(&self) -> &dyn Dictionary {
		self.dictionary.as_ref()
	}

	fn inverted_index(&self) -> &dyn InvertedIndex {
		self.inverted_index.as_ref()
	}
}
