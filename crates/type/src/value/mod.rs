// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod into;
mod ordered_f64;
mod r#type;

pub use into::IntoValue;
pub use ordered_f64::OrderedF64;
pub use r#type::Type;

/// A scalar cell value, represented as a native Rust type.
///
/// Values are totally ordered and hashable so they can key a dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte floating point
	Float8(OrderedF64),
	/// A UTF-8 encoded text.
	Utf8(String),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int4(v: impl Into<i32>) -> Self {
		Value::Int4(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	/// NaN has no place in a dictionary and maps to `Undefined`.
	pub fn float8(v: impl Into<f64>) -> Self {
		OrderedF64::try_from(v.into()).map(Value::Float8).unwrap_or(Value::Undefined)
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Float8(_) => Type::Float8,
			Value::Utf8(_) => Type::Utf8,
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	/// Widens any integer value to `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int4(v) => Some(*v as i64),
			Value::Int8(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Int4(v) => Some(*v as f64),
			Value::Int8(v) => Some(*v as f64),
			Value::Float8(v) => Some(v.value()),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Utf8(v) => Some(v.as_str()),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
		}
	}
}
