// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_type::{Diagnostic, Error, IntoDiagnostic, Type};

use crate::schema::fingerprint::SchemaFingerprint;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TupleError {
	#[error("schema must contain at least one key column")]
	EmptyKey,

	#[error("duplicate column `{name}`")]
	DuplicateColumn {
		name: String,
	},

	#[error("column {index} is {expected}, not {actual}")]
	TypeMismatch {
		index: usize,
		expected: Type,
		actual: Type,
	},

	#[error("column {index} is not nullable")]
	NullNotAllowed {
		index: usize,
	},

	#[error("column {index} is null")]
	NullValue {
		index: usize,
	},

	#[error("column index {index} out of range, schema has {length} columns")]
	ColumnOutOfRange {
		index: usize,
		length: usize,
	},

	#[error("column {index} needs the tuple to span {required} bytes, only {capacity} reserved")]
	CapacityExceeded {
		index: usize,
		required: usize,
		capacity: usize,
	},

	#[error("chunk reserved {declared} variable-length entries, column {index} brings the count to {actual}")]
	VarlenCountMismatch {
		index: usize,
		declared: usize,
		actual: usize,
	},

	#[error("bit set of length {length} does not fit column {index} of {bits} bits")]
	BitmaskTooLong {
		index: usize,
		length: usize,
		bits: u32,
	},

	#[error("tuple has {appended} of {expected} columns")]
	Incomplete {
		appended: usize,
		expected: usize,
	},

	#[error("tuple reserved {expected} bytes but wrote {actual}")]
	SizeMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("tuple fingerprint {actual} does not match schema fingerprint {expected}")]
	FingerprintMismatch {
		expected: SchemaFingerprint,
		actual: SchemaFingerprint,
	},

	#[error("tuple of {length} bytes truncated, expected at least {required}")]
	Truncated {
		required: usize,
		length: usize,
	},

	#[error("corrupted tuple: {reason}")]
	Corrupted {
		reason: String,
	},

	#[error("column {index} is not valid UTF-8")]
	InvalidUtf8 {
		index: usize,
	},
}

impl IntoDiagnostic for TupleError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TupleError::EmptyKey => Diagnostic::new("TUPLE_001", message)
				.with_help("declare at least one key column; the key identifies the row"),

			TupleError::DuplicateColumn {
				..
			} => Diagnostic::new("TUPLE_002", message)
				.with_note("column names are unique across key and value columns"),

			TupleError::TypeMismatch {
				..
			} => Diagnostic::new("TUPLE_003", message).with_label("type does not match the schema column"),

			TupleError::NullNotAllowed {
				..
			} => Diagnostic::new("TUPLE_004", message)
				.with_help("provide a value or declare the column nullable"),

			TupleError::NullValue {
				..
			} => Diagnostic::new("TUPLE_005", message)
				.with_help("read the column through its nullable accessor"),

			TupleError::ColumnOutOfRange {
				..
			} => Diagnostic::new("TUPLE_006", message),

			TupleError::CapacityExceeded {
				..
			} => Diagnostic::new("TUPLE_007", message)
				.with_note("the tuple size is computed before any column is written")
				.with_note("a field changed between the size computation and the write"),

			TupleError::VarlenCountMismatch {
				..
			} => Diagnostic::new("TUPLE_008", message)
				.with_note("the number of non-null variable-length values is fixed before any column is written"),

			TupleError::BitmaskTooLong {
				..
			} => Diagnostic::new("TUPLE_009", message).with_help("clear bits beyond the column width"),

			TupleError::Incomplete {
				..
			} => Diagnostic::new("TUPLE_010", message),

			TupleError::SizeMismatch {
				..
			} => Diagnostic::new("TUPLE_011", message)
				.with_note("the computed tuple size must match the written bytes exactly"),

			TupleError::FingerprintMismatch {
				..
			} => Diagnostic::new("TUPLE_012", message)
				.with_help("decode the tuple with the schema version it was written with"),

			TupleError::Truncated {
				..
			} => Diagnostic::new("TUPLE_013", message),

			TupleError::Corrupted {
				..
			} => Diagnostic::new("TUPLE_014", message),

			TupleError::InvalidUtf8 {
				..
			} => Diagnostic::new("TUPLE_015", message),
		}
	}
}

impl From<TupleError> for Error {
	fn from(err: TupleError) -> Self {
		Error(err.into_diagnostic())
	}
}
