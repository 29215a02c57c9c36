// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_column::{DerivedProvider, SegmentData};
use segmentdb_type::{FieldSpec, Schema, Type, Value};

pub fn int8_values(values: &[i64]) -> Vec<Value> {
	values.iter().map(|v| Value::int8(*v)).collect()
}

pub fn float8_values(values: &[f64]) -> Vec<Value> {
	values.iter().map(|v| Value::float8(*v)).collect()
}

pub fn utf8_values(values: &[&str]) -> Vec<Value> {
	values.iter().map(|v| Value::utf8(*v)).collect()
}

/// `country`, `price` and `quantity`, all stored.
pub fn sales_schema() -> Schema {
	Schema::new([
		FieldSpec::dimension("country", Type::Utf8),
		FieldSpec::metric("price", Type::Float8),
		FieldSpec::metric("quantity", Type::Int8),
	])
	.expect("sales schema is valid")
}

/// Four sales rows. Revenue per row is 10, 3, 10 and 0.
pub fn sales_segment(name: &str) -> SegmentData {
	SegmentData::new(name, sales_schema(), 4)
		.with_column("country", utf8_values(&["US", "DE", "US", "FR"]))
		.with_column("price", float8_values(&[2.0, 3.0, 2.0, 7.5]))
		.with_column("quantity", int8_values(&[5, 1, 5, 0]))
}

/// `price * quantity` as a `Float8` column.
pub fn revenue_provider() -> DerivedProvider {
	DerivedProvider::new(["price", "quantity"], |values| {
		let price = values[0].as_f64().ok_or_else(|| format!("price `{}` is not numeric", values[0]))?;
		let quantity = values[1].as_f64().ok_or_else(|| format!("quantity `{}` is not numeric", values[1]))?;
		Ok(Value::float8(price * quantity))
	})
}
