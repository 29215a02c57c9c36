// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

pub mod diagnostic;

/// A structured, user-facing description of a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	/// The column the failure is about, if any
	pub column: Option<String>,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	/// Renders the diagnostic, followed by its cause chain.
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.render_into(&mut out, 0);
		out
	}

	fn render_into(&self, out: &mut String, depth: usize) {
		let indent = "  ".repeat(depth);
		let _ = write!(out, "{}[{}] {}", indent, self.code, self.message);
		if let Some(column) = &self.column {
			let _ = write!(out, "\n{}  column: {}", indent, column);
		}
		if let Some(label) = &self.label {
			let _ = write!(out, "\n{}  label: {}", indent, label);
		}
		if let Some(help) = &self.help {
			let _ = write!(out, "\n{}  help: {}", indent, help);
		}
		for note in &self.notes {
			let _ = write!(out, "\n{}  note: {}", indent, note);
		}
		if let Some(cause) = &self.cause {
			out.push('\n');
			cause.render_into(out, depth + 1);
		}
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.code)
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Box<Diagnostic>);

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		*self.0
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.render())
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(Box::new(diagnostic))
	}
}

/// Wraps a diagnostic into an [`Error`].
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error(Box::new($diagnostic))
	};
}

/// Returns early with an [`Error`] built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}
