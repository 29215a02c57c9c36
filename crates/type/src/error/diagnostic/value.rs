// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::Diagnostic;

/// VALUE_001: NaN cannot be stored as an ordered float
pub fn nan_not_allowed() -> Diagnostic {
	Diagnostic {
		code: "VALUE_001".to_string(),
		message: "NaN is not a valid FLOAT8 value".to_string(),
		column: None,
		label: Some("NaN not allowed".to_string()),
		help: Some("use undefined to represent a missing float".to_string()),
		notes: vec![],
		cause: None,
	}
}
