// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use crate::Value;

/// Provider-specific parameters handed to a column build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Params {
	#[default]
	None,
	Positional(Vec<Value>),
	Named(HashMap<String, Value>),
}

impl Params {
	pub fn get_positional(&self, index: usize) -> Option<&Value> {
		match self {
			Params::Positional(values) => values.get(index),
			_ => None,
		}
	}

	pub fn get_named(&self, name: &str) -> Option<&Value> {
		match self {
			Params::Named(map) => map.get(name),
			_ => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Params::None => true,
			Params::Positional(values) => values.is_empty(),
			Params::Named(map) => map.is_empty(),
		}
	}

	pub fn empty() -> Params {
		Params::None
	}
}

impl From<()> for Params {
	fn from(_: ()) -> Self {
		Params::None
	}
}

impl From<Vec<Value>> for Params {
	fn from(values: Vec<Value>) -> Self {
		Params::Positional(values)
	}
}

impl From<HashMap<String, Value>> for Params {
	fn from(map: HashMap<String, Value>) -> Self {
		Params::Named(map)
	}
}

#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::None
    };

    {} => {
        $crate::Params::None
    };

    { $($key:tt : $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::new();
            $(
                map.insert($crate::params_key!($key), $crate::IntoValue::into_value($value));
            )*
            $crate::Params::Named(map)
        }
    };

    [] => {
        $crate::Params::None
    };

    [ $($value:expr),+ $(,)? ] => {
        {
            let values = vec![
                $($crate::IntoValue::into_value($value)),*
            ];
            $crate::Params::Positional(values)
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! params_key {
	($key:ident) => {
		stringify!($key).to_string()
	};
	($key:literal) => {
		$key.to_string()
	};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_params_macro_positional() {
		let params = params![42, true, "hello"];
		assert_eq!(params.get_positional(0), Some(&Value::Int4(42)));
		assert_eq!(params.get_positional(1), Some(&Value::Boolean(true)));
		assert_eq!(params.get_positional(2), Some(&Value::utf8("hello")));
		assert_eq!(params.get_positional(3), None);
	}

	#[test]
	fn test_params_macro_named() {
		let params = params! {
		    value: "US",
		    "other-key": 7i64,
		};
		assert_eq!(params.get_named("value"), Some(&Value::utf8("US")));
		assert_eq!(params.get_named("other-key"), Some(&Value::Int8(7)));
		assert_eq!(params.get_named("missing"), None);
	}

	#[test]
	fn test_params_macro_empty() {
		assert_eq!(params!(), Params::None);
		assert_eq!(params! {}, Params::None);
		assert_eq!(params![], Params::None);
		assert!(Params::empty().is_empty());
	}
}
