// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use kvrow_type::Type;

/// The Rust-side type of a record field or of a whole key/value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
	I8,
	I16,
	I32,
	I64,
	F32,
	F64,
	OptionI8,
	OptionI16,
	OptionI32,
	OptionI64,
	OptionF32,
	OptionF64,
	OptionString,
	OptionUuid,
	OptionBytes,
	OptionBitSet,
	/// A type with no binary encoding, carrying its Rust type name
	Unsupported(&'static str),
}

impl Display for DeclaredType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			DeclaredType::I8 => f.write_str("i8"),
			DeclaredType::I16 => f.write_str("i16"),
			DeclaredType::I32 => f.write_str("i32"),
			DeclaredType::I64 => f.write_str("i64"),
			DeclaredType::F32 => f.write_str("f32"),
			DeclaredType::F64 => f.write_str("f64"),
			DeclaredType::OptionI8 => f.write_str("Option<i8>"),
			DeclaredType::OptionI16 => f.write_str("Option<i16>"),
			DeclaredType::OptionI32 => f.write_str("Option<i32>"),
			DeclaredType::OptionI64 => f.write_str("Option<i64>"),
			DeclaredType::OptionF32 => f.write_str("Option<f32>"),
			DeclaredType::OptionF64 => f.write_str("Option<f64>"),
			DeclaredType::OptionString => f.write_str("Option<String>"),
			DeclaredType::OptionUuid => f.write_str("Option<Uuid>"),
			DeclaredType::OptionBytes => f.write_str("Option<Vec<u8>>"),
			DeclaredType::OptionBitSet => f.write_str("Option<BitSet>"),
			DeclaredType::Unsupported(name) => f.write_str(name),
		}
	}
}

/// Physical encoding family of a field.
///
/// The six primitive modes cannot represent null and are never bound to a
/// nullable column. Their nullable counterparts and the four reference
/// modes can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryMode {
	Int1,
	Int2,
	Int4,
	Int8,
	Float4,
	Float8,
	NullableInt1,
	NullableInt2,
	NullableInt4,
	NullableInt8,
	NullableFloat4,
	NullableFloat8,
	Utf8,
	Uuid,
	Blob,
	Bitmask,
}

impl BinaryMode {
	/// Classifies a declared type, `None` if it has no encoding.
	pub fn of(declared: DeclaredType) -> Option<BinaryMode> {
		match declared {
			DeclaredType::I8 => Some(BinaryMode::Int1),
			DeclaredType::I16 => Some(BinaryMode::Int2),
			DeclaredType::I32 => Some(BinaryMode::Int4),
			DeclaredType::I64 => Some(BinaryMode::Int8),
			DeclaredType::F32 => Some(BinaryMode::Float4),
			DeclaredType::F64 => Some(BinaryMode::Float8),
			DeclaredType::OptionI8 => Some(BinaryMode::NullableInt1),
			DeclaredType::OptionI16 => Some(BinaryMode::NullableInt2),
			DeclaredType::OptionI32 => Some(BinaryMode::NullableInt4),
			DeclaredType::OptionI64 => Some(BinaryMode::NullableInt8),
			DeclaredType::OptionF32 => Some(BinaryMode::NullableFloat4),
			DeclaredType::OptionF64 => Some(BinaryMode::NullableFloat8),
			DeclaredType::OptionString => Some(BinaryMode::Utf8),
			DeclaredType::OptionUuid => Some(BinaryMode::Uuid),
			DeclaredType::OptionBytes => Some(BinaryMode::Blob),
			DeclaredType::OptionBitSet => Some(BinaryMode::Bitmask),
			DeclaredType::Unsupported(_) => None,
		}
	}

	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			BinaryMode::Int1
				| BinaryMode::Int2 | BinaryMode::Int4
				| BinaryMode::Int8 | BinaryMode::Float4
				| BinaryMode::Float8
		)
	}

	/// Whether values of this mode can be stored in a column of type `ty`.
	pub fn accepts(&self, ty: Type) -> bool {
		match self {
			BinaryMode::Int1 | BinaryMode::NullableInt1 => ty == Type::Int1,
			BinaryMode::Int2 | BinaryMode::NullableInt2 => ty == Type::Int2,
			BinaryMode::Int4 | BinaryMode::NullableInt4 => ty == Type::Int4,
			BinaryMode::Int8 | BinaryMode::NullableInt8 => ty == Type::Int8,
			BinaryMode::Float4 | BinaryMode::NullableFloat4 => ty == Type::Float4,
			BinaryMode::Float8 | BinaryMode::NullableFloat8 => ty == Type::Float8,
			BinaryMode::Utf8 => ty == Type::Utf8,
			BinaryMode::Uuid => ty == Type::Uuid,
			BinaryMode::Blob => ty == Type::Blob,
			BinaryMode::Bitmask => matches!(ty, Type::Bitmask(_)),
		}
	}
}

impl Display for BinaryMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			BinaryMode::Int1 => f.write_str("INT1"),
			BinaryMode::Int2 => f.write_str("INT2"),
			BinaryMode::Int4 => f.write_str("INT4"),
			BinaryMode::Int8 => f.write_str("INT8"),
			BinaryMode::Float4 => f.write_str("FLOAT4"),
			BinaryMode::Float8 => f.write_str("FLOAT8"),
			BinaryMode::NullableInt1 => f.write_str("NULLABLE_INT1"),
			BinaryMode::NullableInt2 => f.write_str("NULLABLE_INT2"),
			BinaryMode::NullableInt4 => f.write_str("NULLABLE_INT4"),
			BinaryMode::NullableInt8 => f.write_str("NULLABLE_INT8"),
			BinaryMode::NullableFloat4 => f.write_str("NULLABLE_FLOAT4"),
			BinaryMode::NullableFloat8 => f.write_str("NULLABLE_FLOAT8"),
			BinaryMode::Utf8 => f.write_str("UTF8"),
			BinaryMode::Uuid => f.write_str("UUID"),
			BinaryMode::Blob => f.write_str("BLOB"),
			BinaryMode::Bitmask => f.write_str("BITMASK"),
		}
	}
}
