// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::value::Type;

mod diagnostic;

/// A structured error report.
///
/// Every crate in the workspace turns its own error kinds into a
/// `Diagnostic` with a stable `code`, so callers can match on codes
/// without depending on crate-private enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub column: Option<DiagnosticColumn>,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticColumn {
	pub name: String,
	pub r#type: Type,
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl Diagnostic {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			column: None,
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		}
	}

	pub fn with_column(mut self, column: DiagnosticColumn) -> Self {
		self.column = Some(column);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	/// The innermost diagnostic of the cause chain.
	pub fn root_cause(&self) -> &Diagnostic {
		let mut current = self;
		while let Some(cause) = &current.cause {
			current = cause;
		}
		current
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.code, self.message)?;

		if let Some(column) = &self.column {
			write!(f, "\n  column: {} ({})", column.name, column.r#type)?;
		}
		if let Some(label) = &self.label {
			write!(f, "\n  label: {}", label)?;
		}
		if let Some(help) = &self.help {
			write!(f, "\n  help: {}", help)?;
		}
		for note in &self.notes {
			write!(f, "\n  note: {}", note)?;
		}
		if let Some(cause) = &self.cause {
			write!(f, "\ncaused by: {}", cause)?;
		}

		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}
}

impl std::error::Error for Error {}

/// Failures converting between owned values and native Rust types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("expected {expected} value, found {found}")]
	ValueMismatch {
		expected: String,
		found: String,
	},
}

impl From<TypeError> for Error {
	fn from(err: TypeError) -> Self {
		Error(err.into_diagnostic())
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_display_renders_cause_chain() {
		let inner = Diagnostic::new("TUPLE_004", "column 2 is not nullable");
		let outer = Diagnostic::new("MARSHAL_010", "failed to write field [name=score]")
			.with_column(DiagnosticColumn {
				name: "score".to_string(),
				r#type: Type::Float8,
			})
			.with_help("check the field value")
			.with_cause(inner);

		let rendered = Error(outer).to_string();
		assert!(rendered.starts_with("MARSHAL_010: failed to write field [name=score]"));
		assert!(rendered.contains("column: score (Float8)"));
		assert!(rendered.contains("help: check the field value"));
		assert!(rendered.contains("caused by: TUPLE_004: column 2 is not nullable"));
	}

	#[test]
	fn test_root_cause() {
		let diagnostic =
			Diagnostic::new("A", "a").with_cause(Diagnostic::new("B", "b").with_cause(Diagnostic::new("C", "c")));
		assert_eq!(diagnostic.root_cause().code, "C");

		let leaf = Diagnostic::new("X", "x");
		assert_eq!(leaf.root_cause().code, "X");
	}

	#[test]
	fn test_diagnostic_serde() {
		let diagnostic = Diagnostic::new("TUPLE_011", "schema fingerprint mismatch")
			.with_column(DiagnosticColumn {
				name: "mask".to_string(),
				r#type: Type::Bitmask(12),
			})
			.with_note("the tuple was written under another schema");

		let json = serde_json::to_string(&diagnostic).unwrap();
		let back: Diagnostic = serde_json::from_str(&json).unwrap();
		assert_eq!(back, diagnostic);
	}

	#[test]
	fn test_type_error_into_error() {
		let err: Error = TypeError::ValueMismatch {
			expected: "Int4".to_string(),
			found: "Utf8".to_string(),
		}
		.into();
		assert_eq!(err.code, "TYPE_001");
		assert!(err.message.contains("expected Int4 value, found Utf8"));
	}
}
