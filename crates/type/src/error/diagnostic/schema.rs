// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::Diagnostic;

/// SCHEMA_001: field names must be unique within a schema
pub fn duplicate_field(name: &str) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_001".to_string(),
		message: format!("field `{}` is declared more than once", name),
		column: Some(name.to_string()),
		label: Some("duplicate field".to_string()),
		help: Some("rename or remove one of the declarations".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// SCHEMA_002: schema JSON could not be parsed
pub fn invalid_schema(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_002".to_string(),
		message: format!("invalid schema: {}", reason.into()),
		column: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
