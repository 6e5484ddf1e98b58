// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_type::{BitSet, TypeError, Value, ValueRef};
use uuid::Uuid;

use crate::mode::DeclaredType;

/// A mapped Rust type that converts to and from column values.
pub trait Scalar: Sized + Send + Sync + 'static {
	const DECLARED: DeclaredType;

	fn to_value_ref(&self) -> ValueRef<'_>;

	fn from_value(value: Value) -> Result<Self, TypeError>;
}

fn mismatch(expected: DeclaredType, found: &Value) -> TypeError {
	TypeError::ValueMismatch {
		expected: expected.to_string(),
		found: found.to_string(),
	}
}

macro_rules! impl_primitive_scalar {
	($($ty:ty => $declared:ident, $nullable:ident, $variant:ident);* $(;)?) => {
		$(
			impl Scalar for $ty {
				const DECLARED: DeclaredType = DeclaredType::$declared;

				fn to_value_ref(&self) -> ValueRef<'_> {
					ValueRef::$variant(*self)
				}

				fn from_value(value: Value) -> Result<Self, TypeError> {
					match value {
						Value::$variant(v) => Ok(v),
						other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
					}
				}
			}

			impl Scalar for Option<$ty> {
				const DECLARED: DeclaredType = DeclaredType::$nullable;

				fn to_value_ref(&self) -> ValueRef<'_> {
					match self {
						Some(v) => ValueRef::$variant(*v),
						None => ValueRef::Undefined,
					}
				}

				fn from_value(value: Value) -> Result<Self, TypeError> {
					match value {
						Value::Undefined => Ok(None),
						Value::$variant(v) => Ok(Some(v)),
						other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
					}
				}
			}
		)*
	};
}

impl_primitive_scalar! {
	i8 => I8, OptionI8, Int1;
	i16 => I16, OptionI16, Int2;
	i32 => I32, OptionI32, Int4;
	i64 => I64, OptionI64, Int8;
	f32 => F32, OptionF32, Float4;
	f64 => F64, OptionF64, Float8;
}

impl Scalar for Option<String> {
	const DECLARED: DeclaredType = DeclaredType::OptionString;

	fn to_value_ref(&self) -> ValueRef<'_> {
		match self {
			Some(v) => ValueRef::Utf8(v),
			None => ValueRef::Undefined,
		}
	}

	fn from_value(value: Value) -> Result<Self, TypeError> {
		match value {
			Value::Undefined => Ok(None),
			Value::Utf8(v) => Ok(Some(v)),
			other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
		}
	}
}

impl Scalar for Option<Uuid> {
	const DECLARED: DeclaredType = DeclaredType::OptionUuid;

	fn to_value_ref(&self) -> ValueRef<'_> {
		match self {
			Some(v) => ValueRef::Uuid(*v),
			None => ValueRef::Undefined,
		}
	}

	fn from_value(value: Value) -> Result<Self, TypeError> {
		match value {
			Value::Undefined => Ok(None),
			Value::Uuid(v) => Ok(Some(v)),
			other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
		}
	}
}

impl Scalar for Option<Vec<u8>> {
	const DECLARED: DeclaredType = DeclaredType::OptionBytes;

	fn to_value_ref(&self) -> ValueRef<'_> {
		match self {
			Some(v) => ValueRef::Blob(v),
			None => ValueRef::Undefined,
		}
	}

	fn from_value(value: Value) -> Result<Self, TypeError> {
		match value {
			Value::Undefined => Ok(None),
			Value::Blob(v) => Ok(Some(v)),
			other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
		}
	}
}

impl Scalar for Option<BitSet> {
	const DECLARED: DeclaredType = DeclaredType::OptionBitSet;

	fn to_value_ref(&self) -> ValueRef<'_> {
		match self {
			Some(v) => ValueRef::BitSet(v),
			None => ValueRef::Undefined,
		}
	}

	fn from_value(value: Value) -> Result<Self, TypeError> {
		match value {
			Value::Undefined => Ok(None),
			Value::BitSet(v) => Ok(Some(v)),
			other => Err(mismatch(<Self as Scalar>::DECLARED, &other)),
		}
	}
}

/// Typed getters for one field of `T`, resolved when the binding is built.
pub struct Slot<T, F> {
	get: fn(&T) -> &F,
	get_mut: fn(&mut T) -> &mut F,
}

impl<T, F> Slot<T, F> {
	pub fn new(get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
		Self {
			get,
			get_mut,
		}
	}

	pub fn get<'a>(&self, object: &'a T) -> &'a F {
		(self.get)(object)
	}

	pub fn get_mut<'a>(&self, object: &'a mut T) -> &'a mut F {
		(self.get_mut)(object)
	}
}

impl<T, F> Clone for Slot<T, F> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, F> Copy for Slot<T, F> {}

/// A nullable field, read and written through owned values.
pub trait ReferenceField<T>: Send + Sync {
	fn read<'a>(&self, object: &'a T) -> ValueRef<'a>;

	fn write(&self, object: &mut T, value: Value) -> Result<(), TypeError>;
}

impl<T, F: Scalar> ReferenceField<T> for Slot<T, F> {
	fn read<'a>(&self, object: &'a T) -> ValueRef<'a> {
		self.get(object).to_value_ref()
	}

	fn write(&self, object: &mut T, value: Value) -> Result<(), TypeError> {
		*self.get_mut(object) = F::from_value(value)?;
		Ok(())
	}
}

/// How a field is accessed: one variant per primitive, one shared variant
/// for every nullable type.
pub enum FieldBinding<T> {
	Int1(Slot<T, i8>),
	Int2(Slot<T, i16>),
	Int4(Slot<T, i32>),
	Int8(Slot<T, i64>),
	Float4(Slot<T, f32>),
	Float8(Slot<T, f64>),
	Reference(Box<dyn ReferenceField<T>>),
}

/// A Rust type that may appear as a record field.
///
/// Types without an encoding report [`DeclaredType::Unsupported`] and no
/// binding, so binding a record that uses them fails with a configuration
/// error instead of a compile error.
pub trait FieldType: Sized + 'static {
	const DECLARED: DeclaredType;

	fn binding<T: 'static>(slot: Slot<T, Self>) -> Option<FieldBinding<T>>;
}

macro_rules! impl_primitive_field {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl FieldType for $ty {
				const DECLARED: DeclaredType = <$ty as Scalar>::DECLARED;

				fn binding<T: 'static>(slot: Slot<T, Self>) -> Option<FieldBinding<T>> {
					Some(FieldBinding::$variant(slot))
				}
			}
		)*
	};
}

impl_primitive_field! {
	i8 => Int1,
	i16 => Int2,
	i32 => Int4,
	i64 => Int8,
	f32 => Float4,
	f64 => Float8,
}

macro_rules! impl_reference_field {
	($($ty:ty),* $(,)?) => {
		$(
			impl FieldType for $ty {
				const DECLARED: DeclaredType = <$ty as Scalar>::DECLARED;

				fn binding<T: 'static>(slot: Slot<T, Self>) -> Option<FieldBinding<T>> {
					Some(FieldBinding::Reference(Box::new(slot)))
				}
			}
		)*
	};
}

impl_reference_field! {
	Option<i8>,
	Option<i16>,
	Option<i32>,
	Option<i64>,
	Option<f32>,
	Option<f64>,
	Option<String>,
	Option<Uuid>,
	Option<Vec<u8>>,
	Option<BitSet>,
}

macro_rules! impl_unsupported_field {
	($($ty:ty),* $(,)?) => {
		$(
			impl FieldType for $ty {
				const DECLARED: DeclaredType = DeclaredType::Unsupported(stringify!($ty));

				fn binding<T: 'static>(_slot: Slot<T, Self>) -> Option<FieldBinding<T>> {
					None
				}
			}
		)*
	};
}

impl_unsupported_field! {
	bool,
	u8,
	u16,
	u32,
	u64,
	char,
	String,
	Vec<u8>,
}

/// One named field of a record, with its access binding.
pub struct FieldDef<T> {
	pub name: &'static str,
	pub declared: DeclaredType,
	pub binding: Option<FieldBinding<T>>,
}

impl<T: 'static> FieldDef<T> {
	pub fn new<F: FieldType>(name: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
		Self {
			name,
			declared: F::DECLARED,
			binding: F::binding(Slot::new(get, get_mut)),
		}
	}
}

#[cfg(test)]
pub mod tests {
	use kvrow_type::{BitSet, Value, ValueRef};

	use super::*;

	#[derive(Default)]
	struct Sample {
		count: i32,
		label: Option<String>,
		flags: Option<BitSet>,
		active: bool,
	}

	mod scalar {
		use super::*;

		#[test]
		fn test_primitive() {
			assert_eq!(7i16.to_value_ref(), ValueRef::Int2(7));
			assert_eq!(i16::from_value(Value::Int2(7)), Ok(7));
			assert!(i16::from_value(Value::Undefined).is_err());
			assert!(i16::from_value(Value::Int4(7)).is_err());
		}

		#[test]
		fn test_nullable() {
			assert_eq!(Some(1.5f64).to_value_ref(), ValueRef::Float8(1.5));
			assert_eq!(None::<f64>.to_value_ref(), ValueRef::Undefined);
			assert_eq!(Option::<f64>::from_value(Value::Undefined), Ok(None));
			assert_eq!(Option::<f64>::from_value(Value::Float8(1.5)), Ok(Some(1.5)));
		}

		#[test]
		fn test_mismatch_message() {
			let err = Option::<String>::from_value(Value::Int8(1)).unwrap_err();
			assert_eq!(err.to_string(), "expected Option<String> value, found Int8");
		}

		#[test]
		fn test_mismatch_names_scalar_type() {
			let err = i16::from_value(Value::Float4(1.0)).unwrap_err();
			assert_eq!(err.to_string(), "expected i16 value, found Float4");

			let err = Option::<i64>::from_value(Value::Utf8("x".to_string())).unwrap_err();
			assert_eq!(err.to_string(), "expected Option<i64> value, found Utf8");

			let err = Option::<Uuid>::from_value(Value::Blob(vec![])).unwrap_err();
			assert_eq!(err.to_string(), "expected Option<Uuid> value, found Blob");

			let err = Option::<Vec<u8>>::from_value(Value::Int1(0)).unwrap_err();
			assert_eq!(err.to_string(), "expected Option<Vec<u8>> value, found Int1");

			let err = Option::<BitSet>::from_value(Value::Int2(0)).unwrap_err();
			assert_eq!(err.to_string(), "expected Option<BitSet> value, found Int2");
		}

		#[test]
		fn test_declared_matches_field_type() {
			assert_eq!(<i32 as Scalar>::DECLARED, <i32 as FieldType>::DECLARED);
			assert_eq!(<Option<f32> as Scalar>::DECLARED, <Option<f32> as FieldType>::DECLARED);
			assert_eq!(<Option<String> as Scalar>::DECLARED, <Option<String> as FieldType>::DECLARED);
		}
	}

	mod binding {
		use super::*;

		#[test]
		fn test_primitive_binding() {
			let def = FieldDef::new("count", |s: &Sample| &s.count, |s: &mut Sample| &mut s.count);
			assert_eq!(def.declared, DeclaredType::I32);

			let Some(FieldBinding::Int4(slot)) = def.binding else {
				panic!("expected Int4 binding");
			};
			let mut sample = Sample::default();
			*slot.get_mut(&mut sample) = 5;
			assert_eq!(*slot.get(&sample), 5);
		}

		#[test]
		fn test_reference_binding() {
			let def = FieldDef::new("label", |s: &Sample| &s.label, |s: &mut Sample| &mut s.label);
			assert_eq!(def.declared, DeclaredType::OptionString);

			let Some(FieldBinding::Reference(field)) = def.binding else {
				panic!("expected reference binding");
			};
			let mut sample = Sample::default();
			assert_eq!(field.read(&sample), ValueRef::Undefined);

			field.write(&mut sample, Value::Utf8("abc".to_string())).unwrap();
			assert_eq!(sample.label.as_deref(), Some("abc"));
			assert_eq!(field.read(&sample), ValueRef::Utf8("abc"));

			assert!(field.write(&mut sample, Value::Blob(vec![1])).is_err());
		}

		#[test]
		fn test_bitset_binding() {
			let def = FieldDef::new("flags", |s: &Sample| &s.flags, |s: &mut Sample| &mut s.flags);
			assert_eq!(def.declared, DeclaredType::OptionBitSet);
			assert!(def.binding.is_some());
		}

		#[test]
		fn test_unsupported_binding() {
			let def = FieldDef::new("active", |s: &Sample| &s.active, |s: &mut Sample| &mut s.active);
			assert_eq!(def.declared, DeclaredType::Unsupported("bool"));
			assert!(def.binding.is_none());
		}
	}
}
