// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::error::{ColumnError, Result};

/// What a segment load does when one column cannot be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFailurePolicy {
	/// Abort the load and publish nothing.
	#[default]
	Fail,
	/// Leave the column out, record the failure and continue.
	Skip,
}

/// Configuration for loading segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentLoadConfig {
	/// Add `$docId`, `$segmentName` and `$hostName` to every segment
	pub builtin_columns: bool,
	/// Value served by the `$hostName` column
	pub host_name: String,
	/// Serve schema fields that have no stored data as default-null columns
	pub default_missing_columns: bool,
	/// Behaviour when a single column fails to build
	pub on_column_failure: ColumnFailurePolicy,
}

impl Default for SegmentLoadConfig {
	fn default() -> Self {
		Self {
			builtin_columns: true,
			host_name: "localhost".to_string(),
			default_missing_columns: true,
			on_column_failure: ColumnFailurePolicy::Fail,
		}
	}
}

impl SegmentLoadConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|err| ColumnError::InvalidConfig {
			reason: err.to_string(),
		})
	}

	pub fn with_builtin_columns(mut self, enabled: bool) -> Self {
		self.builtin_columns = enabled;
		self
	}

	pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
		self.host_name = host_name.into();
		self
	}

	pub fn with_default_missing_columns(mut self, enabled: bool) -> Self {
		self.default_missing_columns = enabled;
		self
	}

	pub fn with_failure_policy(mut self, policy: ColumnFailurePolicy) -> Self {
		self.on_column_failure = policy;
		self
	}
}
