// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_type::{BitSet, Type, ValueRef};
use uuid::Uuid;

use crate::{
	CHUNK_HEADER_SIZE, FINGERPRINT_SIZE, Result, VARLEN_ENTRY_SIZE,
	encoded::EncodedTuple,
	error::TupleError,
	schema::{Column, Columns, SchemaDescriptor},
};

/// Writes one tuple column by column, in absolute column order.
///
/// The buffer is allocated once with the exact size computed up front;
/// every write is bounds-checked against it instead of growing it.
pub struct TupleBuilder<'a> {
	schema: &'a SchemaDescriptor,
	buf: Vec<u8>,
	index: usize,
	chunk: Chunk,
	value_non_null: usize,
}

#[derive(Debug, Clone, Copy)]
struct Chunk {
	start: usize,
	table: usize,
	fixed: usize,
	varlen: usize,
	declared: usize,
	written: usize,
}

impl Chunk {
	fn new(start: usize, columns: &Columns, declared: usize) -> Self {
		let table = start + CHUNK_HEADER_SIZE + columns.null_map_size();
		let fixed = table + declared * VARLEN_ENTRY_SIZE;
		Self {
			start,
			table,
			fixed,
			varlen: fixed + columns.fixed_size(),
			declared,
			written: 0,
		}
	}
}

impl<'a> TupleBuilder<'a> {
	pub fn new(schema: &'a SchemaDescriptor, size: usize, key_non_null: usize, value_non_null: usize) -> Result<Self> {
		let chunk = Chunk::new(FINGERPRINT_SIZE, schema.key_columns(), key_non_null);
		if chunk.varlen > size {
			return Err(TupleError::CapacityExceeded {
				index: 0,
				required: chunk.varlen,
				capacity: size,
			}
			.into());
		}

		let mut buf = vec![0u8; size];
		buf[..FINGERPRINT_SIZE].copy_from_slice(&schema.fingerprint().to_le_bytes());

		Ok(Self {
			schema,
			buf,
			index: 0,
			chunk,
			value_non_null,
		})
	}

	/// Absolute index of the next column to append
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn append_null(&mut self) -> Result<()> {
		let (_, _, column) = self.column()?;
		if !column.is_nullable() {
			return Err(TupleError::NullNotAllowed {
				index: self.index,
			}
			.into());
		}
		self.advance()
	}

	pub fn append_i8(&mut self, value: i8) -> Result<()> {
		self.append_fixed(Type::Int1, &value.to_le_bytes())
	}

	pub fn append_i16(&mut self, value: i16) -> Result<()> {
		self.append_fixed(Type::Int2, &value.to_le_bytes())
	}

	pub fn append_i32(&mut self, value: i32) -> Result<()> {
		self.append_fixed(Type::Int4, &value.to_le_bytes())
	}

	pub fn append_i64(&mut self, value: i64) -> Result<()> {
		self.append_fixed(Type::Int8, &value.to_le_bytes())
	}

	pub fn append_f32(&mut self, value: f32) -> Result<()> {
		self.append_fixed(Type::Float4, &value.to_le_bytes())
	}

	pub fn append_f64(&mut self, value: f64) -> Result<()> {
		self.append_fixed(Type::Float8, &value.to_le_bytes())
	}

	pub fn append_uuid(&mut self, value: Uuid) -> Result<()> {
		self.append_fixed(Type::Uuid, value.as_bytes())
	}

	pub fn append_bitmask(&mut self, value: &BitSet) -> Result<()> {
		let (_, _, column) = self.column()?;
		if let Type::Bitmask(bits) = column.get_type() {
			if value.length() > bits as usize {
				return Err(TupleError::BitmaskTooLong {
					index: self.index,
					length: value.length(),
					bits,
				}
				.into());
			}
		}
		self.append_fixed(Type::Bitmask(value.length() as u32), value.as_bytes())
	}

	pub fn append_utf8(&mut self, value: &str) -> Result<()> {
		self.append_varlen(Type::Utf8, value.as_bytes())
	}

	pub fn append_blob(&mut self, value: &[u8]) -> Result<()> {
		self.append_varlen(Type::Blob, value)
	}

	/// Appends a borrowed value, `Undefined` appends null.
	pub fn append_value(&mut self, value: ValueRef<'_>) -> Result<()> {
		match value {
			ValueRef::Undefined => self.append_null(),
			ValueRef::Int1(v) => self.append_i8(v),
			ValueRef::Int2(v) => self.append_i16(v),
			ValueRef::Int4(v) => self.append_i32(v),
			ValueRef::Int8(v) => self.append_i64(v),
			ValueRef::Float4(v) => self.append_f32(v),
			ValueRef::Float8(v) => self.append_f64(v),
			ValueRef::Uuid(v) => self.append_uuid(v),
			ValueRef::BitSet(v) => self.append_bitmask(v),
			ValueRef::Utf8(v) => self.append_utf8(v),
			ValueRef::Blob(v) => self.append_blob(v),
		}
	}

	pub fn build(self) -> Result<EncodedTuple> {
		let expected = self.schema.length();
		if self.index != expected {
			return Err(TupleError::Incomplete {
				appended: self.index,
				expected,
			}
			.into());
		}

		if self.chunk.varlen != self.buf.len() {
			return Err(TupleError::SizeMismatch {
				expected: self.buf.len(),
				actual: self.chunk.varlen,
			}
			.into());
		}

		Ok(EncodedTuple(self.buf))
	}

	fn append_fixed(&mut self, actual: Type, bytes: &[u8]) -> Result<()> {
		let (columns, local, _) = self.check(actual)?;
		let offset = self.chunk.fixed + columns.fixed_offset(local);
		self.write(offset, bytes)?;
		self.set_defined(local);
		self.advance()
	}

	fn append_varlen(&mut self, actual: Type, bytes: &[u8]) -> Result<()> {
		let (_, local, _) = self.check(actual)?;

		if self.chunk.written >= self.chunk.declared {
			return Err(TupleError::VarlenCountMismatch {
				index: self.index,
				declared: self.chunk.declared,
				actual: self.chunk.written + 1,
			}
			.into());
		}

		let entry = self.chunk.table + self.chunk.written * VARLEN_ENTRY_SIZE;
		let relative = chunk_offset(self.index, self.chunk.varlen - self.chunk.start)?;
		self.write(entry, &relative.to_le_bytes())?;
		self.write(self.chunk.varlen, bytes)?;

		self.chunk.varlen += bytes.len();
		self.chunk.written += 1;
		self.set_defined(local);
		self.advance()
	}

	fn column(&self) -> Result<(&'a Columns, usize, &'a Column)> {
		let schema = self.schema;
		let key_len = schema.key_columns().length();

		let (columns, local) = if self.index < key_len {
			(schema.key_columns(), self.index)
		} else {
			(schema.value_columns(), self.index - key_len)
		};

		match columns.column(local) {
			Some(column) => Ok((columns, local, column)),
			None => Err(TupleError::ColumnOutOfRange {
				index: self.index,
				length: schema.length(),
			}
			.into()),
		}
	}

	fn check(&self, actual: Type) -> Result<(&'a Columns, usize, &'a Column)> {
		let (columns, local, column) = self.column()?;
		if !column.get_type().same_kind(&actual) {
			return Err(TupleError::TypeMismatch {
				index: self.index,
				expected: column.get_type(),
				actual,
			}
			.into());
		}
		Ok((columns, local, column))
	}

	fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
		let end = offset + bytes.len();
		if end > self.buf.len() {
			return Err(TupleError::CapacityExceeded {
				index: self.index,
				required: end,
				capacity: self.buf.len(),
			}
			.into());
		}
		self.buf[offset..end].copy_from_slice(bytes);
		Ok(())
	}

	fn set_defined(&mut self, local: usize) {
		let byte = self.chunk.start + CHUNK_HEADER_SIZE + local / 8;
		self.buf[byte] |= 1 << (local % 8);
	}

	fn advance(&mut self) -> Result<()> {
		self.index += 1;

		if self.index == self.schema.key_columns().length() {
			self.finish_chunk()?;
			self.chunk = Chunk::new(self.chunk.varlen, self.schema.value_columns(), self.value_non_null);
			if self.chunk.varlen > self.buf.len() {
				return Err(TupleError::CapacityExceeded {
					index: self.index,
					required: self.chunk.varlen,
					capacity: self.buf.len(),
				}
				.into());
			}
		}

		if self.index == self.schema.length() {
			self.finish_chunk()?;
		}

		Ok(())
	}

	fn finish_chunk(&mut self) -> Result<()> {
		if self.chunk.written != self.chunk.declared {
			return Err(TupleError::VarlenCountMismatch {
				index: self.index - 1,
				declared: self.chunk.declared,
				actual: self.chunk.written,
			}
			.into());
		}

		let len = chunk_offset(self.index - 1, self.chunk.varlen - self.chunk.start)?;
		self.write(self.chunk.start, &len.to_le_bytes())
	}
}

/// Chunk offsets and lengths are stored as u32.
fn chunk_offset(index: usize, relative: usize) -> Result<u32> {
	u32::try_from(relative).map_err(|_| {
		TupleError::CapacityExceeded {
			index,
			required: relative,
			capacity: u32::MAX as usize,
		}
		.into()
	})
}
