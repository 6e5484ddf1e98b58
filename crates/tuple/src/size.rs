// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{CHUNK_HEADER_SIZE, FINGERPRINT_SIZE, VARLEN_ENTRY_SIZE, schema::Columns, schema::SchemaDescriptor};

/// Non-null variable-length values of one chunk and their payload size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarlenStatistic {
	pub non_null: usize,
	pub size: usize,
}

impl VarlenStatistic {
	pub fn new(non_null: usize, size: usize) -> Self {
		Self {
			non_null,
			size,
		}
	}

	/// Accounts for one non-null variable-length value of `len` bytes.
	pub fn record(&mut self, len: usize) {
		self.non_null += 1;
		self.size += len;
	}
}

/// Exact encoded size of one chunk.
pub fn chunk_size(columns: &Columns, stat: VarlenStatistic) -> usize {
	CHUNK_HEADER_SIZE
		+ columns.null_map_size()
		+ stat.non_null * VARLEN_ENTRY_SIZE
		+ columns.fixed_size()
		+ stat.size
}

/// Exact encoded size of a whole tuple.
pub fn tuple_size(schema: &SchemaDescriptor, key: VarlenStatistic, value: VarlenStatistic) -> usize {
	FINGERPRINT_SIZE + chunk_size(schema.key_columns(), key) + chunk_size(schema.value_columns(), value)
}
