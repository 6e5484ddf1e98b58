// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use kvrow_type::{Diagnostic, DiagnosticColumn, Error, IntoDiagnostic, Type};

use crate::mode::{BinaryMode, DeclaredType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Read,
	Write,
}

impl Display for Operation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operation::Read => f.write_str("read"),
			Operation::Write => f.write_str("write"),
		}
	}
}

/// What a serialization error names: the field, or only the absolute
/// column index when sensitive metadata is redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTarget {
	Name(String),
	Index(usize),
}

impl Display for FieldTarget {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldTarget::Name(name) => write!(f, "name={}", name),
			FieldTarget::Index(index) => write!(f, "id={}", index),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
	#[error("no field for column `{column}`")]
	UnknownField {
		column: String,
	},

	#[error("field `{field}` has unsupported type {declared}")]
	UnsupportedType {
		field: String,
		declared: DeclaredType,
	},

	#[error("primitive field `{field}` of type {declared} cannot be bound to nullable column `{column}`")]
	PrimitiveNullableColumn {
		field: String,
		declared: DeclaredType,
		column: String,
	},

	#[error("primitive type {declared} cannot be bound to column `{column}` as a whole key or value")]
	PrimitiveIdentity {
		column: String,
		declared: DeclaredType,
	},

	#[error("field `{field}` of mode {mode} cannot be stored in column `{column}` of type {column_type}")]
	ColumnTypeMismatch {
		field: String,
		mode: BinaryMode,
		column: String,
		column_type: Type,
	},

	#[error("scalar {side} type needs exactly one {side} column, schema has {count}")]
	IdentityColumnCount {
		side: &'static str,
		count: usize,
	},

	#[error("failed to {operation} field [{target}]")]
	Serialization {
		operation: Operation,
		target: FieldTarget,
		column: Option<DiagnosticColumn>,
		cause: Diagnostic,
	},
}

impl IntoDiagnostic for MarshalError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			MarshalError::UnknownField {
				..
			} => Diagnostic::new("MARSHAL_001", message)
				.with_help("add a field named after the column to the record"),

			MarshalError::UnsupportedType {
				..
			} => Diagnostic::new("MARSHAL_002", message)
				.with_help("use one of i8, i16, i32, i64, f32, f64, their Option forms, Option<String>, Option<Uuid>, Option<Vec<u8>> or Option<BitSet>"),

			MarshalError::PrimitiveNullableColumn {
				..
			} => Diagnostic::new("MARSHAL_003", message)
				.with_help("declare the field as an Option so it can hold null"),

			MarshalError::PrimitiveIdentity {
				..
			} => Diagnostic::new("MARSHAL_004", message)
				.with_help("use the Option form of the type")
				.with_note("a whole key or value must be able to report null"),

			MarshalError::ColumnTypeMismatch {
				..
			} => Diagnostic::new("MARSHAL_005", message).with_label("field type does not match the column type"),

			MarshalError::IdentityColumnCount {
				..
			} => Diagnostic::new("MARSHAL_006", message)
				.with_help("bind a record type with one field per column instead"),

			MarshalError::Serialization {
				operation,
				column,
				cause,
				..
			} => {
				let code = match operation {
					Operation::Write => "MARSHAL_010",
					Operation::Read => "MARSHAL_011",
				};
				let mut diagnostic = Diagnostic::new(code, message).with_cause(cause);
				if let Some(column) = column {
					diagnostic = diagnostic.with_column(column);
				}
				diagnostic
			}
		}
	}
}

impl From<MarshalError> for Error {
	fn from(err: MarshalError) -> Self {
		Error(err.into_diagnostic())
	}
}

#[cfg(test)]
pub mod tests {
	use kvrow_type::{Diagnostic, DiagnosticColumn, Error, Type};

	use super::*;

	#[test]
	fn test_serialization_by_name() {
		let err: Error = MarshalError::Serialization {
			operation: Operation::Write,
			target: FieldTarget::Name("score".to_string()),
			column: Some(DiagnosticColumn {
				name: "score".to_string(),
				r#type: Type::Float8,
			}),
			cause: Diagnostic::new("TUPLE_004", "column 1 is not nullable"),
		}
		.into();

		assert_eq!(err.code, "MARSHAL_010");
		assert_eq!(err.message, "failed to write field [name=score]");
		assert_eq!(err.column.as_ref().unwrap().name, "score");
		assert_eq!(err.root_cause().code, "TUPLE_004");
	}

	#[test]
	fn test_serialization_by_index() {
		let err: Error = MarshalError::Serialization {
			operation: Operation::Read,
			target: FieldTarget::Index(2),
			column: None,
			cause: Diagnostic::new("TUPLE_015", "column 2 is not valid UTF-8"),
		}
		.into();

		assert_eq!(err.code, "MARSHAL_011");
		assert_eq!(err.message, "failed to read field [id=2]");
		assert!(err.column.is_none());
	}

	#[test]
	fn test_configuration_codes() {
		let err: Error = MarshalError::IdentityColumnCount {
			side: "value",
			count: 2,
		}
		.into();
		assert_eq!(err.code, "MARSHAL_006");
		assert_eq!(err.message, "scalar value type needs exactly one value column, schema has 2");

		let err: Error = MarshalError::UnsupportedType {
			field: "active".to_string(),
			declared: DeclaredType::Unsupported("bool"),
		}
		.into();
		assert_eq!(err.code, "MARSHAL_002");
		assert_eq!(err.message, "field `active` has unsupported type bool");
	}
}
