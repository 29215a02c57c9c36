// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{
	FieldSpec,
	error::diagnostic::schema::{duplicate_field, invalid_schema},
	return_error,
};

/// An ordered set of uniquely named fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Schema {
	fields: Vec<FieldSpec>,
}

impl Schema {
	pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> crate::Result<Self> {
		let mut schema = Self::default();
		for field in fields {
			schema.add_field(field)?;
		}
		Ok(schema)
	}

	pub fn from_json(json: &str) -> crate::Result<Self> {
		#[derive(Deserialize)]
		struct Raw {
			fields: Vec<FieldSpec>,
		}

		let raw: Raw = match serde_json::from_str(json) {
			Ok(raw) => raw,
			Err(err) => return_error!(invalid_schema(err.to_string())),
		};
		Self::new(raw.fields)
	}

	pub fn add_field(&mut self, field: FieldSpec) -> crate::Result<()> {
		if self.contains(&field.name) {
			return_error!(duplicate_field(&field.name));
		}
		self.fields.push(field);
		Ok(())
	}

	pub fn find(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.find(name).is_some()
	}

	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Type;

	#[test]
	fn test_duplicate_field_rejected() {
		let err = Schema::new([FieldSpec::dimension("country", Type::Utf8), FieldSpec::metric("country", Type::Int8)])
			.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_001");
	}

	#[test]
	fn test_find_preserves_order() {
		let schema =
			Schema::new([FieldSpec::dimension("country", Type::Utf8), FieldSpec::metric("clicks", Type::Int8)])
				.unwrap();
		assert_eq!(schema.len(), 2);
		assert_eq!(schema.fields()[1].name, "clicks");
		assert_eq!(schema.find("country").map(|f| f.data_type), Some(Type::Utf8));
		assert!(schema.find("missing").is_none());
	}

	#[test]
	fn test_from_json() {
		let schema = Schema::from_json(
			r#"{"fields":[
				{"name":"country","kind":"dimension","data_type":"Utf8"},
				{"name":"clicks","kind":"metric","data_type":"Int8"}
			]}"#,
		)
		.unwrap();
		assert_eq!(schema.len(), 2);
	}

	#[test]
	fn test_from_json_invalid() {
		let err = Schema::from_json("{").unwrap_err();
		assert_eq!(err.code(), "SCHEMA_002");
	}
}
