// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_tuple::{Tuple, TupleBuilder};
use kvrow_type::ValueRef;

use crate::{Result, accessor::FieldAccessor};

/// The accessors of one column group, in ascending column order.
pub enum Marshaller<T> {
	/// The whole object is the single column value
	Identity(FieldAccessor<T>),
	/// One accessor per column, populating a fresh instance on read
	Object {
		factory: fn() -> T,
		accessors: Vec<FieldAccessor<T>>,
	},
}

impl<T> Marshaller<T> {
	pub fn write_object(&self, object: &T, builder: &mut TupleBuilder<'_>) -> Result<()> {
		for accessor in self.accessors() {
			accessor.write(object, builder)?;
		}
		Ok(())
	}

	pub fn read_object(&self, tuple: &Tuple<'_>) -> Result<T> {
		match self {
			Marshaller::Identity(accessor) => accessor.read_identity(tuple),
			Marshaller::Object {
				factory,
				accessors,
			} => {
				let mut object = factory();
				for accessor in accessors {
					accessor.read(&mut object, tuple)?;
				}
				Ok(object)
			}
		}
	}

	/// Current value of the column at `index` within the group.
	pub fn value<'a>(&self, object: &'a T, index: usize) -> ValueRef<'a> {
		self.accessors()[index].value(object)
	}

	pub fn accessors(&self) -> &[FieldAccessor<T>] {
		match self {
			Marshaller::Identity(accessor) => std::slice::from_ref(accessor),
			Marshaller::Object {
				accessors,
				..
			} => accessors,
		}
	}

	pub fn is_identity(&self) -> bool {
		matches!(self, Marshaller::Identity(_))
	}

	/// Whether an identity-bound object holds no value.
	pub fn is_null(&self, object: &T) -> bool {
		match self {
			Marshaller::Identity(accessor) => accessor.value(object).is_undefined(),
			Marshaller::Object {
				..
			} => false,
		}
	}
}
