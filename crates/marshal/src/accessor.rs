// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_tuple::{Column, Tuple, TupleBuilder};
use kvrow_type::{DiagnosticColumn, Error, Value, ValueRef};

use crate::{
	Result,
	error::{FieldTarget, MarshalError, Operation},
	field::{FieldBinding, FieldDef},
	mode::{BinaryMode, DeclaredType},
	shape::IdentityCodec,
};

/// Binds one absolute column index to one field of `T`, or to `T` itself.
pub struct FieldAccessor<T> {
	index: usize,
	name: String,
	column: DiagnosticColumn,
	mode: BinaryMode,
	redact: bool,
	kind: AccessorKind<T>,
}

enum AccessorKind<T> {
	Field(FieldBinding<T>),
	Identity(IdentityCodec<T>),
}

impl<T: 'static> FieldAccessor<T> {
	/// Binds a record field to the column at `index`.
	pub fn create(def: FieldDef<T>, column: &Column, index: usize, redact: bool) -> Result<Self> {
		let (mode, binding) = match (BinaryMode::of(def.declared), def.binding) {
			(Some(mode), Some(binding)) => (mode, binding),
			_ => {
				return Err(MarshalError::UnsupportedType {
					field: def.name.to_string(),
					declared: def.declared,
				}
				.into());
			}
		};

		if mode.is_primitive() && column.is_nullable() {
			return Err(MarshalError::PrimitiveNullableColumn {
				field: def.name.to_string(),
				declared: def.declared,
				column: column.name().to_string(),
			}
			.into());
		}

		check_column_type(def.name, mode, column)?;

		Ok(Self {
			index,
			name: def.name.to_string(),
			column: describe(column),
			mode,
			redact,
			kind: AccessorKind::Field(binding),
		})
	}

	/// Binds a whole key or value object to the single column at `index`.
	pub fn identity(
		column: &Column,
		index: usize,
		declared: DeclaredType,
		codec: IdentityCodec<T>,
		redact: bool,
	) -> Result<Self> {
		let Some(mode) = BinaryMode::of(declared) else {
			return Err(MarshalError::UnsupportedType {
				field: column.name().to_string(),
				declared,
			}
			.into());
		};

		if mode.is_primitive() {
			return Err(MarshalError::PrimitiveIdentity {
				column: column.name().to_string(),
				declared,
			}
			.into());
		}

		check_column_type(column.name(), mode, column)?;

		Ok(Self {
			index,
			name: column.name().to_string(),
			column: describe(column),
			mode,
			redact,
			kind: AccessorKind::Identity(codec),
		})
	}
}

impl<T> FieldAccessor<T> {
	/// Absolute column index
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn mode(&self) -> BinaryMode {
		self.mode
	}

	pub fn is_identity(&self) -> bool {
		matches!(self.kind, AccessorKind::Identity(_))
	}

	/// Appends the bound value to `builder`, or a null marker if it is
	/// absent.
	///
	/// Panics if an identity-bound object is null.
	pub fn write(&self, object: &T, builder: &mut TupleBuilder<'_>) -> Result<()> {
		let result = match &self.kind {
			AccessorKind::Field(FieldBinding::Int1(slot)) => builder.append_i8(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int2(slot)) => builder.append_i16(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int4(slot)) => builder.append_i32(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int8(slot)) => builder.append_i64(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Float4(slot)) => builder.append_f32(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Float8(slot)) => builder.append_f64(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Reference(field)) => builder.append_value(field.read(object)),
			AccessorKind::Identity(codec) => {
				let value = codec.read(object);
				assert!(!value.is_undefined(), "null values are not supported");
				builder.append_value(value)
			}
		};

		result.map_err(|err| self.failure(Operation::Write, err))
	}

	/// Reads the column into the bound field of `object`.
	///
	/// Panics on an identity accessor, which has no field to populate; use
	/// [`FieldAccessor::read_identity`] instead.
	pub fn read(&self, object: &mut T, tuple: &Tuple<'_>) -> Result<()> {
		let index = self.index;
		let result = match &self.kind {
			AccessorKind::Field(FieldBinding::Int1(slot)) => tuple.get_i8(index).map(|v| *slot.get_mut(object) = v),
			AccessorKind::Field(FieldBinding::Int2(slot)) => tuple.get_i16(index).map(|v| *slot.get_mut(object) = v),
			AccessorKind::Field(FieldBinding::Int4(slot)) => tuple.get_i32(index).map(|v| *slot.get_mut(object) = v),
			AccessorKind::Field(FieldBinding::Int8(slot)) => tuple.get_i64(index).map(|v| *slot.get_mut(object) = v),
			AccessorKind::Field(FieldBinding::Float4(slot)) => {
				tuple.get_f32(index).map(|v| *slot.get_mut(object) = v)
			}
			AccessorKind::Field(FieldBinding::Float8(slot)) => {
				tuple.get_f64(index).map(|v| *slot.get_mut(object) = v)
			}
			AccessorKind::Field(FieldBinding::Reference(field)) => read_value(tuple, index, self.mode)
				.and_then(|value| field.write(object, value).map_err(Error::from)),
			AccessorKind::Identity(_) => {
				panic!("identity accessor for column {} has no field to populate", index)
			}
		};

		result.map_err(|err| self.failure(Operation::Read, err))
	}

	/// Reads the column as a whole key or value object.
	///
	/// Panics on a field accessor.
	pub fn read_identity(&self, tuple: &Tuple<'_>) -> Result<T> {
		let AccessorKind::Identity(codec) = &self.kind else {
			panic!("field accessor for column {} cannot produce a whole object", self.index)
		};

		read_value(tuple, self.index, self.mode)
			.and_then(|value| codec.write(value).map_err(Error::from))
			.map_err(|err| self.failure(Operation::Read, err))
	}

	/// The current value of the bound field, without touching a tuple.
	pub fn value<'a>(&self, object: &'a T) -> ValueRef<'a> {
		match &self.kind {
			AccessorKind::Field(FieldBinding::Int1(slot)) => ValueRef::Int1(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int2(slot)) => ValueRef::Int2(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int4(slot)) => ValueRef::Int4(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Int8(slot)) => ValueRef::Int8(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Float4(slot)) => ValueRef::Float4(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Float8(slot)) => ValueRef::Float8(*slot.get(object)),
			AccessorKind::Field(FieldBinding::Reference(field)) => field.read(object),
			AccessorKind::Identity(codec) => codec.read(object),
		}
	}

	fn failure(&self, operation: Operation, err: Error) -> Error {
		let (target, column) = if self.redact {
			(FieldTarget::Index(self.index), None)
		} else {
			(FieldTarget::Name(self.name.clone()), Some(self.column.clone()))
		};

		MarshalError::Serialization {
			operation,
			target,
			column,
			cause: err.diagnostic(),
		}
		.into()
	}
}

fn check_column_type(field: &str, mode: BinaryMode, column: &Column) -> Result<()> {
	if !mode.accepts(column.get_type()) {
		return Err(MarshalError::ColumnTypeMismatch {
			field: field.to_string(),
			mode,
			column: column.name().to_string(),
			column_type: column.get_type(),
		}
		.into());
	}
	Ok(())
}

fn describe(column: &Column) -> DiagnosticColumn {
	DiagnosticColumn {
		name: column.name().to_string(),
		r#type: column.get_type(),
	}
}

fn read_value(tuple: &Tuple<'_>, index: usize, mode: BinaryMode) -> Result<Value> {
	let value = match mode {
		BinaryMode::Int1 | BinaryMode::NullableInt1 => tuple.try_get_i8(index)?.map(Value::Int1),
		BinaryMode::Int2 | BinaryMode::NullableInt2 => tuple.try_get_i16(index)?.map(Value::Int2),
		BinaryMode::Int4 | BinaryMode::NullableInt4 => tuple.try_get_i32(index)?.map(Value::Int4),
		BinaryMode::Int8 | BinaryMode::NullableInt8 => tuple.try_get_i64(index)?.map(Value::Int8),
		BinaryMode::Float4 | BinaryMode::NullableFloat4 => tuple.try_get_f32(index)?.map(Value::Float4),
		BinaryMode::Float8 | BinaryMode::NullableFloat8 => tuple.try_get_f64(index)?.map(Value::Float8),
		BinaryMode::Utf8 => tuple.try_get_utf8(index)?.map(|v| Value::Utf8(v.to_string())),
		BinaryMode::Uuid => tuple.try_get_uuid(index)?.map(Value::Uuid),
		BinaryMode::Blob => tuple.try_get_blob(index)?.map(|v| Value::Blob(v.to_vec())),
		BinaryMode::Bitmask => tuple.try_get_bitmask(index)?.map(Value::BitSet),
	};
	Ok(value.unwrap_or(Value::Undefined))
}
