// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// All native column types a tuple can store
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A UUID, stored as its 16 RFC 4122 bytes
	Uuid,
	/// A fixed-width bit mask holding the given number of bits
	Bitmask(u32),
	/// A UTF-8 encoded text
	Utf8,
	/// A binary large object (BLOB)
	Blob,
}

impl Type {
	pub fn is_fixed_size(&self) -> bool {
		!matches!(self, Type::Utf8 | Type::Blob)
	}

	/// Compares the type family, ignoring the width of a bit mask.
	pub fn same_kind(&self, other: &Type) -> bool {
		std::mem::discriminant(self) == std::mem::discriminant(other)
	}
}

impl Type {
	pub fn to_u8(&self) -> u8 {
		match self {
			Type::Int1 => 0x01,
			Type::Int2 => 0x02,
			Type::Int4 => 0x03,
			Type::Int8 => 0x04,
			Type::Float4 => 0x05,
			Type::Float8 => 0x06,
			Type::Uuid => 0x07,
			Type::Bitmask(_) => 0x08,
			Type::Utf8 => 0x09,
			Type::Blob => 0x0A,
		}
	}
}

impl Type {
	/// Encoded size of a fixed-size type; variable-length types report 0.
	pub fn size(&self) -> usize {
		match self {
			Type::Int1 => 1,
			Type::Int2 => 2,
			Type::Int4 => 4,
			Type::Int8 => 8,
			Type::Float4 => 4,
			Type::Float8 => 8,
			Type::Uuid => 16,
			Type::Bitmask(bits) => (*bits as usize).div_ceil(8),
			Type::Utf8 => 0,
			Type::Blob => 0,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Int1 => f.write_str("Int1"),
			Type::Int2 => f.write_str("Int2"),
			Type::Int4 => f.write_str("Int4"),
			Type::Int8 => f.write_str("Int8"),
			Type::Float4 => f.write_str("Float4"),
			Type::Float8 => f.write_str("Float8"),
			Type::Uuid => f.write_str("Uuid"),
			Type::Bitmask(bits) => write!(f, "Bitmask({})", bits),
			Type::Utf8 => f.write_str("Utf8"),
			Type::Blob => f.write_str("Blob"),
		}
	}
}

#[cfg(test)]
pub mod tests {
	use super::Type;

	#[test]
	fn test_fixed_size() {
		assert!(Type::Int4.is_fixed_size());
		assert!(Type::Uuid.is_fixed_size());
		assert!(Type::Bitmask(12).is_fixed_size());
		assert!(!Type::Utf8.is_fixed_size());
		assert!(!Type::Blob.is_fixed_size());
	}

	#[test]
	fn test_size() {
		assert_eq!(Type::Int1.size(), 1);
		assert_eq!(Type::Int2.size(), 2);
		assert_eq!(Type::Int4.size(), 4);
		assert_eq!(Type::Int8.size(), 8);
		assert_eq!(Type::Float4.size(), 4);
		assert_eq!(Type::Float8.size(), 8);
		assert_eq!(Type::Uuid.size(), 16);
		assert_eq!(Type::Bitmask(1).size(), 1);
		assert_eq!(Type::Bitmask(8).size(), 1);
		assert_eq!(Type::Bitmask(9).size(), 2);
		assert_eq!(Type::Utf8.size(), 0);
		assert_eq!(Type::Blob.size(), 0);
	}

	#[test]
	fn test_same_kind_ignores_bitmask_width() {
		assert!(Type::Bitmask(8).same_kind(&Type::Bitmask(64)));
		assert!(!Type::Int4.same_kind(&Type::Int8));
	}

	#[test]
	fn test_display() {
		assert_eq!(Type::Float8.to_string(), "Float8");
		assert_eq!(Type::Bitmask(16).to_string(), "Bitmask(16)");
	}
}
