// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use uuid::Uuid;

mod bitset;
mod r#type;

pub use bitset::BitSet;
pub use r#type::Type;

/// A column value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A 1-byte signed integer
	Int1(i8),
	/// A 2-byte signed integer
	Int2(i16),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A UUID
	Uuid(Uuid),
	/// A set of bits
	BitSet(BitSet),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A binary large object (BLOB)
	Blob(Vec<u8>),
}

/// A borrowed view of a [`Value`], used on the write path so field
/// contents are never cloned before they reach the tuple builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
	Undefined,
	Int1(i8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Float4(f32),
	Float8(f64),
	Uuid(Uuid),
	BitSet(&'a BitSet),
	Utf8(&'a str),
	Blob(&'a [u8]),
}

impl Value {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	/// The column type this value encodes as, `None` for `Undefined`.
	///
	/// A bit set reports the narrowest mask that holds it.
	pub fn get_type(&self) -> Option<Type> {
		self.as_ref().get_type()
	}

	pub fn as_ref(&self) -> ValueRef<'_> {
		match self {
			Value::Undefined => ValueRef::Undefined,
			Value::Int1(v) => ValueRef::Int1(*v),
			Value::Int2(v) => ValueRef::Int2(*v),
			Value::Int4(v) => ValueRef::Int4(*v),
			Value::Int8(v) => ValueRef::Int8(*v),
			Value::Float4(v) => ValueRef::Float4(*v),
			Value::Float8(v) => ValueRef::Float8(*v),
			Value::Uuid(v) => ValueRef::Uuid(*v),
			Value::BitSet(v) => ValueRef::BitSet(v),
			Value::Utf8(v) => ValueRef::Utf8(v),
			Value::Blob(v) => ValueRef::Blob(v),
		}
	}
}

impl<'a> ValueRef<'a> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, ValueRef::Undefined)
	}

	pub fn get_type(&self) -> Option<Type> {
		match self {
			ValueRef::Undefined => None,
			ValueRef::Int1(_) => Some(Type::Int1),
			ValueRef::Int2(_) => Some(Type::Int2),
			ValueRef::Int4(_) => Some(Type::Int4),
			ValueRef::Int8(_) => Some(Type::Int8),
			ValueRef::Float4(_) => Some(Type::Float4),
			ValueRef::Float8(_) => Some(Type::Float8),
			ValueRef::Uuid(_) => Some(Type::Uuid),
			ValueRef::BitSet(v) => Some(Type::Bitmask(v.length() as u32)),
			ValueRef::Utf8(_) => Some(Type::Utf8),
			ValueRef::Blob(_) => Some(Type::Blob),
		}
	}

	pub fn to_value(&self) -> Value {
		match *self {
			ValueRef::Undefined => Value::Undefined,
			ValueRef::Int1(v) => Value::Int1(v),
			ValueRef::Int2(v) => Value::Int2(v),
			ValueRef::Int4(v) => Value::Int4(v),
			ValueRef::Int8(v) => Value::Int8(v),
			ValueRef::Float4(v) => Value::Float4(v),
			ValueRef::Float8(v) => Value::Float8(v),
			ValueRef::Uuid(v) => Value::Uuid(v),
			ValueRef::BitSet(v) => Value::BitSet(v.clone()),
			ValueRef::Utf8(v) => Value::Utf8(v.to_string()),
			ValueRef::Blob(v) => Value::Blob(v.to_vec()),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.get_type() {
			Some(ty) => write!(f, "{}", ty),
			None => f.write_str("undefined"),
		}
	}
}

#[cfg(test)]
pub mod tests {
	use uuid::Uuid;

	use super::*;

	#[test]
	fn test_get_type() {
		assert_eq!(Value::Undefined.get_type(), None);
		assert_eq!(Value::Int4(1).get_type(), Some(Type::Int4));
		assert_eq!(Value::Utf8("a".to_string()).get_type(), Some(Type::Utf8));
		assert_eq!(Value::Uuid(Uuid::nil()).get_type(), Some(Type::Uuid));

		let mut bits = BitSet::new();
		bits.set(9);
		assert_eq!(Value::BitSet(bits).get_type(), Some(Type::Bitmask(10)));
	}

	#[test]
	fn test_as_ref_to_value() {
		let values = vec![
			Value::Undefined,
			Value::Int1(-1),
			Value::Int8(i64::MAX),
			Value::Float8(2.5),
			Value::Utf8("héllo".to_string()),
			Value::Blob(vec![0, 1, 2]),
		];

		for value in values {
			assert_eq!(value.as_ref().to_value(), value);
		}
	}

	#[test]
	fn test_display() {
		assert_eq!(Value::Undefined.to_string(), "undefined");
		assert_eq!(Value::Int2(7).to_string(), "Int2");
	}
}
