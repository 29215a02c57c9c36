// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, diagnostic::value::nan_not_allowed};

/// An `f64` that is never NaN, giving it total order, equality and hashing.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl fmt::Debug for OrderedF64 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl fmt::Display for OrderedF64 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl From<OrderedF64> for f64 {
	fn from(v: OrderedF64) -> Self {
		v.0
	}
}

impl TryFrom<f64> for OrderedF64 {
	type Error = Error;

	fn try_from(f: f64) -> Result<Self, Self::Error> {
		if f.is_nan() {
			return Err(Error(Box::new(nan_not_allowed())));
		}
		// -0.0 and 0.0 must land on the same dictionary entry
		let normalized = if f == 0.0 {
			0.0
		} else {
			f
		};
		Ok(OrderedF64(normalized))
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn test_sorting() {
		let mut values = vec![
			OrderedF64::try_from(10.0).unwrap(),
			OrderedF64::try_from(f64::NEG_INFINITY).unwrap(),
			OrderedF64::try_from(5.0).unwrap(),
		];
		values.sort();
		let sorted: Vec<f64> = values.into_iter().map(f64::from).collect();
		assert_eq!(sorted, vec![f64::NEG_INFINITY, 5.0, 10.0]);
	}

	#[test]
	fn test_normalizes_zero() {
		let pos_zero = OrderedF64::try_from(0.0).unwrap();
		let neg_zero = OrderedF64::try_from(-0.0).unwrap();
		assert_eq!(pos_zero, neg_zero);

		let mut set = HashSet::new();
		set.insert(pos_zero);
		assert!(set.contains(&neg_zero));
	}

	#[test]
	fn test_nan_fails() {
		let err = OrderedF64::try_from(f64::NAN).unwrap_err();
		assert_eq!(err.code(), "VALUE_001");
	}

	#[test]
	fn test_serde_as_plain_number() {
		let value = OrderedF64::try_from(2.5).unwrap();
		let json = serde_json::to_string(&value).unwrap();
		assert_eq!(json, "2.5");
		let back: OrderedF64 = serde_json::from_str(&json).unwrap();
		assert_eq!(back, value);
	}
}
