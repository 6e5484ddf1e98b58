// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_type::{BitSet, TypeError, Value, ValueRef};
use uuid::Uuid;

use crate::{
	field::{FieldDef, FieldType, Scalar},
	mode::DeclaredType,
};

/// A type that can be bound as the key or the value of a
/// [`Serializer`](crate::Serializer).
pub trait Marshal: Sized + Send + Sync + 'static {
	fn shape() -> Shape<Self>;
}

/// How a key/value type maps onto its column group.
pub enum Shape<T> {
	/// The whole type is one column value
	Scalar(ScalarShape<T>),
	/// The type is a record with one field per column
	Object(RecordShape<T>),
}

pub struct ScalarShape<T> {
	pub declared: DeclaredType,
	pub codec: IdentityCodec<T>,
}

/// Converts a whole key/value object to and from a single column value.
pub struct IdentityCodec<T> {
	read: for<'a> fn(&'a T) -> ValueRef<'a>,
	write: fn(Value) -> Result<T, TypeError>,
}

impl<T> IdentityCodec<T> {
	pub fn new(read: for<'a> fn(&'a T) -> ValueRef<'a>, write: fn(Value) -> Result<T, TypeError>) -> Self {
		Self {
			read,
			write,
		}
	}

	pub fn read<'a>(&self, object: &'a T) -> ValueRef<'a> {
		(self.read)(object)
	}

	pub fn write(&self, value: Value) -> Result<T, TypeError> {
		(self.write)(value)
	}
}

impl<T> Clone for IdentityCodec<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for IdentityCodec<T> {}

/// Field table and factory of a record type.
pub struct RecordShape<T> {
	factory: fn() -> T,
	fields: Vec<FieldDef<T>>,
}

impl<T: 'static> RecordShape<T> {
	pub fn new(factory: fn() -> T) -> Self {
		Self {
			factory,
			fields: Vec::new(),
		}
	}

	pub fn field<F: FieldType>(mut self, name: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
		self.fields.push(FieldDef::new(name, get, get_mut));
		self
	}

	pub fn factory(&self) -> fn() -> T {
		self.factory
	}

	pub fn fields(&self) -> &[FieldDef<T>] {
		&self.fields
	}

	/// Removes and returns the field called `name`.
	pub(crate) fn take(&mut self, name: &str) -> Option<FieldDef<T>> {
		let position = self.fields.iter().position(|field| field.name == name)?;
		Some(self.fields.remove(position))
	}
}

macro_rules! impl_scalar_marshal {
	($($ty:ty),* $(,)?) => {
		$(
			impl Marshal for $ty {
				fn shape() -> Shape<Self> {
					Shape::Scalar(ScalarShape {
						declared: <$ty as Scalar>::DECLARED,
						codec: IdentityCodec::new(<$ty as Scalar>::to_value_ref, <$ty as Scalar>::from_value),
					})
				}
			}
		)*
	};
}

impl_scalar_marshal! {
	i8,
	i16,
	i32,
	i64,
	f32,
	f64,
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

/// Implements [`Marshal`] for a struct with a `Default` impl, binding each
/// listed field to the column of the same name.
///
/// ```ignore
/// #[derive(Default)]
/// struct Person {
///     name: Option<String>,
///     score: f64,
/// }
///
/// record!(Person { name, score });
/// ```
#[macro_export]
macro_rules! record {
	($ty:ty { $($field:ident),* $(,)? }) => {
		impl $crate::Marshal for $ty {
			fn shape() -> $crate::Shape<Self> {
				$crate::Shape::Object(
					$crate::RecordShape::new(<$ty as ::std::default::Default>::default)
						$(.field(
							stringify!($field),
							|record: &$ty| &record.$field,
							|record: &mut $ty| &mut record.$field,
						))*
				)
			}
		}
	};
}
