// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Type, Value};

/// The semantic role a column plays in analytical queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Dimension,
	Metric,
	Time,
}

impl Display for FieldKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldKind::Dimension => f.write_str("DIMENSION"),
			FieldKind::Metric => f.write_str("METRIC"),
			FieldKind::Time => f.write_str("TIME"),
		}
	}
}

/// Static schema metadata for one column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
	pub name: String,
	pub kind: FieldKind,
	pub data_type: Type,
	/// Overrides the per-kind default returned by [`FieldSpec::default_null_value`]
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_null_value: Option<Value>,
	/// Registry kind of the virtual column provider serving this field.
	/// `None` for physically stored columns.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub virtual_provider: Option<String>,
}

impl FieldSpec {
	pub fn new(name: impl Into<String>, kind: FieldKind, data_type: Type) -> Self {
		Self {
			name: name.into(),
			kind,
			data_type,
			default_null_value: None,
			virtual_provider: None,
		}
	}

	pub fn dimension(name: impl Into<String>, data_type: Type) -> Self {
		Self::new(name, FieldKind::Dimension, data_type)
	}

	pub fn metric(name: impl Into<String>, data_type: Type) -> Self {
		Self::new(name, FieldKind::Metric, data_type)
	}

	pub fn time(name: impl Into<String>, data_type: Type) -> Self {
		Self::new(name, FieldKind::Time, data_type)
	}

	pub fn with_default_null_value(mut self, value: Value) -> Self {
		self.default_null_value = Some(value);
		self
	}

	pub fn with_virtual_provider(mut self, provider: impl Into<String>) -> Self {
		self.virtual_provider = Some(provider.into());
		self
	}

	pub fn is_virtual(&self) -> bool {
		self.virtual_provider.is_some()
	}

	/// The value stored for rows that have no value for this field.
	///
	/// Dimensions and time columns use the smallest value of their type so
	/// that nulls sort first; metrics use zero so aggregations are unaffected.
	pub fn default_null_value(&self) -> Value {
		if let Some(value) = &self.default_null_value {
			return value.clone();
		}

		match (self.kind, self.data_type) {
			(FieldKind::Metric, Type::Int4) => Value::Int4(0),
			(FieldKind::Metric, Type::Int8) => Value::Int8(0),
			(FieldKind::Metric, Type::Float8) => Value::float8(0.0),
			(_, Type::Int4) => Value::Int4(i32::MIN),
			(_, Type::Int8) => Value::Int8(i64::MIN),
			(_, Type::Float8) => Value::float8(f64::NEG_INFINITY),
			(_, Type::Boolean) => Value::Boolean(false),
			(_, Type::Utf8) => Value::utf8("null"),
			(_, Type::Undefined) => Value::Undefined,
		}
	}
}
