// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_type::{Diagnostic, IntoDiagnostic, Type};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColumnError {
	#[error("invalid virtual column context: {reason}")]
	InvalidContext {
		reason: String,
	},

	#[error("column `{column}` requires parameter `{parameter}`")]
	MissingParameter {
		column: String,
		parameter: String,
	},

	#[error("column `{column}` declares {expected} but got a {actual} value")]
	TypeMismatch {
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("the {provider} provider cannot serve column `{column}` of type {data_type}")]
	UnsupportedType {
		column: String,
		provider: String,
		data_type: Type,
	},

	#[error("column `{column}` depends on `{dependency}` which is not available")]
	DependencyUnavailable {
		column: String,
		dependency: String,
	},

	#[error("dependency cycle between columns {}", .columns.join(", "))]
	DependencyCycle {
		columns: Vec<String>,
	},

	#[error("no virtual column provider registered as `{kind}` (column `{column}`)")]
	UnknownProvider {
		column: String,
		kind: String,
	},

	#[error("column `{column}` is defined more than once")]
	DuplicateColumn {
		column: String,
	},

	#[error("failed to build column `{column}`: {reason}")]
	BuildFailure {
		column: String,
		reason: String,
	},

	#[error("invalid segment load configuration: {reason}")]
	InvalidConfig {
		reason: String,
	},
}

impl ColumnError {
	/// The column this failure belongs to, when it is about a single column.
	pub fn column(&self) -> Option<&str> {
		match self {
			ColumnError::MissingParameter {
				column,
				..
			}
			| ColumnError::TypeMismatch {
				column,
				..
			}
			| ColumnError::UnsupportedType {
				column,
				..
			}
			| ColumnError::DependencyUnavailable {
				column,
				..
			}
			| ColumnError::UnknownProvider {
				column,
				..
			}
			| ColumnError::DuplicateColumn {
				column,
			}
			| ColumnError::BuildFailure {
				column,
				..
			} => Some(column),
			ColumnError::InvalidContext {
				..
			}
			| ColumnError::DependencyCycle {
				..
			}
			| ColumnError::InvalidConfig {
				..
			} => None,
		}
	}
}

impl IntoDiagnostic for ColumnError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let column = self.column().map(str::to_string);

		let (code, label, help, notes) = match self {
			ColumnError::InvalidContext {
				..
			} => (
				"VCOL_001",
				Some("invalid context".to_string()),
				Some("a context needs a field descriptor and a document count between 0 and u32::MAX"
					.to_string()),
				vec![],
			),
			ColumnError::MissingParameter {
				parameter,
				..
			} => (
				"VCOL_002",
				Some(format!("`{}` not supplied", parameter)),
				Some(format!("pass `{}` in the column parameters or set a default null value", parameter)),
				vec![],
			),
			ColumnError::TypeMismatch {
				expected,
				..
			} => (
				"VCOL_003",
				Some(format!("{} expected", expected)),
				None,
				vec!["virtual columns must produce values of the declared data type".to_string()],
			),
			ColumnError::UnsupportedType {
				..
			} => ("VCOL_004", Some("unsupported data type".to_string()), None, vec![]),
			ColumnError::DependencyUnavailable {
				dependency,
				..
			} => (
				"VCOL_005",
				Some(format!("`{}` not resolved", dependency)),
				Some("make sure the input column exists in the segment and loads successfully".to_string()),
				vec![],
			),
			ColumnError::DependencyCycle {
				..
			} => (
				"VCOL_006",
				Some("cyclic dependency".to_string()),
				Some("derived columns must form an acyclic graph".to_string()),
				vec![],
			),
			ColumnError::UnknownProvider {
				kind,
				..
			} => (
				"VCOL_007",
				Some(format!("unknown provider `{}`", kind)),
				Some("register the provider before loading segments that use it".to_string()),
				vec![],
			),
			ColumnError::DuplicateColumn {
				..
			} => ("VCOL_008", Some("duplicate column".to_string()), None, vec![]),
			ColumnError::BuildFailure {
				..
			} => (
				"VCOL_009",
				Some("build failed".to_string()),
				None,
				vec!["no partial column was published".to_string()],
			),
			ColumnError::InvalidConfig {
				..
			} => ("VCOL_010", Some("invalid configuration".to_string()), None, vec![]),
		};

		Diagnostic {
			code: code.to_string(),
			message,
			column,
			label,
			help,
			notes,
			cause: None,
		}
	}
}

impl From<ColumnError> for segmentdb_type::Error {
	fn from(err: ColumnError) -> Self {
		segmentdb_type::Error(Box::new(err.into_diagnostic()))
	}
}

pub type Result<T> = std::result::Result<T, ColumnError>;
