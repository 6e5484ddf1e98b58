// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_type::{BitSet, Type, Value};
use uuid::Uuid;

use crate::{
	CHUNK_HEADER_SIZE, FINGERPRINT_SIZE, Result, VARLEN_ENTRY_SIZE,
	error::TupleError,
	schema::{Column, Columns, SchemaDescriptor, fingerprint::SchemaFingerprint},
};

/// A read-only view of an encoded tuple.
///
/// Construction validates the header and both chunk bounds; column reads
/// borrow from the underlying bytes.
#[derive(Debug, Clone, Copy)]
pub struct Tuple<'a> {
	schema: &'a SchemaDescriptor,
	bytes: &'a [u8],
	key: ChunkView,
	value: ChunkView,
}

#[derive(Debug, Clone, Copy)]
struct ChunkView {
	start: usize,
	len: usize,
	table: usize,
	fixed: usize,
	/// Number of entries in the varlen table
	entries: usize,
}

macro_rules! fixed_getters {
	($($get:ident, $try_get:ident, $ty:ty, $type:expr);* $(;)?) => {
		$(
			pub fn $try_get(&self, index: usize) -> Result<Option<$ty>> {
				match self.fixed_bytes(index, $type)? {
					Some(bytes) => {
						let mut raw = [0u8; std::mem::size_of::<$ty>()];
						raw.copy_from_slice(bytes);
						Ok(Some(<$ty>::from_le_bytes(raw)))
					}
					None => Ok(None),
				}
			}

			pub fn $get(&self, index: usize) -> Result<$ty> {
				self.$try_get(index)?.ok_or_else(|| TupleError::NullValue { index }.into())
			}
		)*
	};
}

impl<'a> Tuple<'a> {
	pub fn new(schema: &'a SchemaDescriptor, bytes: &'a [u8]) -> Result<Self> {
		if bytes.len() < FINGERPRINT_SIZE {
			return Err(TupleError::Truncated {
				required: FINGERPRINT_SIZE,
				length: bytes.len(),
			}
			.into());
		}

		let mut header = [0u8; FINGERPRINT_SIZE];
		header.copy_from_slice(&bytes[..FINGERPRINT_SIZE]);
		let actual = SchemaFingerprint::from_le_bytes(header);
		if actual != schema.fingerprint() {
			return Err(TupleError::FingerprintMismatch {
				expected: schema.fingerprint(),
				actual,
			}
			.into());
		}

		let key = ChunkView::read(bytes, FINGERPRINT_SIZE, schema.key_columns())?;
		let value = ChunkView::read(bytes, key.start + key.len, schema.value_columns())?;

		let end = value.start + value.len;
		if end != bytes.len() {
			return Err(TupleError::Corrupted {
				reason: format!("{} trailing bytes after value chunk", bytes.len() - end),
			}
			.into());
		}

		Ok(Self {
			schema,
			bytes,
			key,
			value,
		})
	}

	pub fn schema(&self) -> &'a SchemaDescriptor {
		self.schema
	}

	pub fn is_null(&self, index: usize) -> Result<bool> {
		let (chunk, _, local, _) = self.locate(index)?;
		Ok(!self.is_defined(chunk, local))
	}

	fixed_getters! {
		get_i8, try_get_i8, i8, Type::Int1;
		get_i16, try_get_i16, i16, Type::Int2;
		get_i32, try_get_i32, i32, Type::Int4;
		get_i64, try_get_i64, i64, Type::Int8;
		get_f32, try_get_f32, f32, Type::Float4;
		get_f64, try_get_f64, f64, Type::Float8;
	}

	pub fn try_get_uuid(&self, index: usize) -> Result<Option<Uuid>> {
		match self.fixed_bytes(index, Type::Uuid)? {
			Some(bytes) => {
				let mut raw = [0u8; 16];
				raw.copy_from_slice(bytes);
				Ok(Some(Uuid::from_bytes(raw)))
			}
			None => Ok(None),
		}
	}

	pub fn try_get_bitmask(&self, index: usize) -> Result<Option<BitSet>> {
		Ok(self.fixed_bytes(index, Type::Bitmask(0))?.map(BitSet::from_bytes))
	}

	pub fn try_get_utf8(&self, index: usize) -> Result<Option<&'a str>> {
		match self.varlen_bytes(index, Type::Utf8)? {
			Some(bytes) => match std::str::from_utf8(bytes) {
				Ok(text) => Ok(Some(text)),
				Err(_) => Err(TupleError::InvalidUtf8 {
					index,
				}
				.into()),
			},
			None => Ok(None),
		}
	}

	pub fn try_get_blob(&self, index: usize) -> Result<Option<&'a [u8]>> {
		self.varlen_bytes(index, Type::Blob)
	}

	/// Reads any column as an owned value, `Undefined` for null.
	pub fn try_get_value(&self, index: usize) -> Result<Value> {
		let (_, _, _, column) = self.locate(index)?;
		let value = match column.get_type() {
			Type::Int1 => self.try_get_i8(index)?.map(Value::Int1),
			Type::Int2 => self.try_get_i16(index)?.map(Value::Int2),
			Type::Int4 => self.try_get_i32(index)?.map(Value::Int4),
			Type::Int8 => self.try_get_i64(index)?.map(Value::Int8),
			Type::Float4 => self.try_get_f32(index)?.map(Value::Float4),
			Type::Float8 => self.try_get_f64(index)?.map(Value::Float8),
			Type::Uuid => self.try_get_uuid(index)?.map(Value::Uuid),
			Type::Bitmask(_) => self.try_get_bitmask(index)?.map(Value::BitSet),
			Type::Utf8 => self.try_get_utf8(index)?.map(|v| Value::Utf8(v.to_string())),
			Type::Blob => self.try_get_blob(index)?.map(|v| Value::Blob(v.to_vec())),
		};
		Ok(value.unwrap_or(Value::Undefined))
	}

	fn locate(&self, index: usize) -> Result<(&ChunkView, &'a Columns, usize, &'a Column)> {
		let schema = self.schema;
		let key_len = schema.key_columns().length();

		let (chunk, columns, local) = if index < key_len {
			(&self.key, schema.key_columns(), index)
		} else {
			(&self.value, schema.value_columns(), index - key_len)
		};

		match columns.column(local) {
			Some(column) => Ok((chunk, columns, local, column)),
			None => Err(TupleError::ColumnOutOfRange {
				index,
				length: schema.length(),
			}
			.into()),
		}
	}

	fn typed(&self, index: usize, requested: Type) -> Result<(&ChunkView, &'a Columns, usize, &'a Column)> {
		let located = self.locate(index)?;
		let column = located.3;
		if !column.get_type().same_kind(&requested) {
			return Err(TupleError::TypeMismatch {
				index,
				expected: column.get_type(),
				actual: requested,
			}
			.into());
		}
		Ok(located)
	}

	fn is_defined(&self, chunk: &ChunkView, local: usize) -> bool {
		self.bytes[chunk.start + CHUNK_HEADER_SIZE + local / 8] & (1 << (local % 8)) != 0
	}

	fn fixed_bytes(&self, index: usize, requested: Type) -> Result<Option<&'a [u8]>> {
		let (chunk, columns, local, column) = self.typed(index, requested)?;
		if !self.is_defined(chunk, local) {
			return Ok(None);
		}

		let offset = chunk.fixed + columns.fixed_offset(local);
		Ok(Some(&self.bytes[offset..offset + column.get_type().size()]))
	}

	fn varlen_bytes(&self, index: usize, requested: Type) -> Result<Option<&'a [u8]>> {
		let (chunk, columns, local, _) = self.typed(index, requested)?;
		if !self.is_defined(chunk, local) {
			return Ok(None);
		}

		let first = columns.first_varlen_column().unwrap_or(local);
		let slot = (first..local).filter(|&i| self.is_defined(chunk, i)).count();

		let begin = self.entry(chunk, slot);
		let end = if slot + 1 < chunk.entries {
			self.entry(chunk, slot + 1)
		} else {
			chunk.len
		};

		let data_start = chunk.fixed - chunk.start + columns.fixed_size();
		if begin < data_start || begin > end || end > chunk.len {
			return Err(TupleError::Corrupted {
				reason: format!("invalid varlen offsets {}..{} for column {}", begin, end, index),
			}
			.into());
		}

		Ok(Some(&self.bytes[chunk.start + begin..chunk.start + end]))
	}

	fn entry(&self, chunk: &ChunkView, slot: usize) -> usize {
		let offset = chunk.table + slot * VARLEN_ENTRY_SIZE;
		let mut raw = [0u8; VARLEN_ENTRY_SIZE];
		raw.copy_from_slice(&self.bytes[offset..offset + VARLEN_ENTRY_SIZE]);
		u32::from_le_bytes(raw) as usize
	}
}

impl ChunkView {
	fn read(bytes: &[u8], start: usize, columns: &Columns) -> Result<Self> {
		let header_end = start + CHUNK_HEADER_SIZE + columns.null_map_size();
		if header_end > bytes.len() {
			return Err(TupleError::Truncated {
				required: header_end,
				length: bytes.len(),
			}
			.into());
		}

		let mut raw = [0u8; CHUNK_HEADER_SIZE];
		raw.copy_from_slice(&bytes[start..start + CHUNK_HEADER_SIZE]);
		let len = u32::from_le_bytes(raw) as usize;

		if start + len > bytes.len() {
			return Err(TupleError::Truncated {
				required: start + len,
				length: bytes.len(),
			}
			.into());
		}

		let null_map = &bytes[start + CHUNK_HEADER_SIZE..header_end];
		let entries = (columns.first_varlen_column().unwrap_or(columns.length())..columns.length())
			.filter(|&i| null_map[i / 8] & (1 << (i % 8)) != 0)
			.count();

		let table = header_end;
		let fixed = table + entries * VARLEN_ENTRY_SIZE;
		let required = fixed - start + columns.fixed_size();
		if len < required {
			return Err(TupleError::Corrupted {
				reason: format!("chunk at {} is {} bytes, its static section needs {}", start, len, required),
			}
			.into());
		}

		Ok(Self {
			start,
			len,
			table,
			fixed,
			entries,
		})
	}
}
