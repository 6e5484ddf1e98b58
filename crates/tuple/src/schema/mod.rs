// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schema descriptors for key/value tuples.
//!
//! A `SchemaDescriptor` describes one schema version of a table:
//! - Key and value column groups, each laid out as its own chunk
//! - Per-group fixed-size offsets, with all fixed-size columns placed
//!   before the variable-length ones
//! - A fingerprint stamped into every tuple written under the schema

pub mod fingerprint;

use std::{collections::HashSet, fmt::Debug, ops::Deref, slice::Iter, sync::Arc};

use kvrow_type::Type;
use serde::{Deserialize, Serialize};

use crate::{
	Result,
	error::TupleError,
	schema::fingerprint::{SchemaFingerprint, compute_fingerprint},
};

/// A single column of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
	name: String,
	r#type: Type,
	nullable: bool,
}

impl Column {
	pub fn new(name: impl Into<String>, r#type: Type, nullable: bool) -> Self {
		Self {
			name: name.into(),
			r#type,
			nullable,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn get_type(&self) -> Type {
		self.r#type
	}

	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	pub fn is_fixed_size(&self) -> bool {
		self.r#type.is_fixed_size()
	}
}

/// An ordered column group with its computed chunk layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
	columns: Vec<Column>,
	/// Offset of each fixed-size column within the fixed section
	fixed_offsets: Vec<usize>,
	fixed_size: usize,
	first_varlen: Option<usize>,
}

impl Columns {
	/// Lays out a column group. Fixed-size columns keep their relative
	/// order and move in front of all variable-length columns.
	pub fn new(columns: Vec<Column>) -> Self {
		let (mut ordered, varlen): (Vec<Column>, Vec<Column>) =
			columns.into_iter().partition(|column| column.is_fixed_size());

		let fixed_count = ordered.len();
		let first_varlen = if varlen.is_empty() {
			None
		} else {
			Some(fixed_count)
		};
		ordered.extend(varlen);

		let mut fixed_offsets = Vec::with_capacity(fixed_count);
		let mut offset = 0;
		for column in &ordered[..fixed_count] {
			fixed_offsets.push(offset);
			offset += column.get_type().size();
		}

		Self {
			columns: ordered,
			fixed_offsets,
			fixed_size: offset,
			first_varlen,
		}
	}

	pub fn length(&self) -> usize {
		self.columns.len()
	}

	pub fn column(&self, index: usize) -> Option<&Column> {
		self.columns.get(index)
	}

	pub fn iter(&self) -> Iter<'_, Column> {
		self.columns.iter()
	}

	/// Find a column index by name
	pub fn find(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name == name)
	}

	/// Index of the first variable-length column, if the group has one.
	/// Every column from here on is variable-length.
	pub fn first_varlen_column(&self) -> Option<usize> {
		self.first_varlen
	}

	pub fn null_map_size(&self) -> usize {
		self.columns.len().div_ceil(8)
	}

	/// Total size of the fixed section
	pub fn fixed_size(&self) -> usize {
		self.fixed_size
	}

	/// Offset of a fixed-size column within the fixed section
	pub fn fixed_offset(&self, index: usize) -> usize {
		debug_assert!(self.columns[index].is_fixed_size(), "column {} is variable-length", index);
		self.fixed_offsets[index]
	}

	pub fn varlen_count(&self) -> usize {
		self.columns.len() - self.fixed_offsets.len()
	}
}

impl<'a> IntoIterator for &'a Columns {
	type Item = &'a Column;
	type IntoIter = Iter<'a, Column>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.iter()
	}
}

/// A versioned key/value schema.
///
/// Columns are addressed by absolute index: key columns come first,
/// followed by value columns, each group in its laid out order.
pub struct SchemaDescriptor(Arc<Inner>);

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inner {
	pub version: u32,
	pub fingerprint: SchemaFingerprint,
	pub key: Columns,
	pub value: Columns,
}

impl Deref for SchemaDescriptor {
	type Target = Inner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Clone for SchemaDescriptor {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl Debug for SchemaDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl PartialEq for SchemaDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_ref() == other.0.as_ref()
	}
}

impl Eq for SchemaDescriptor {}

impl SchemaDescriptor {
	pub fn new(version: u32, key: Vec<Column>, value: Vec<Column>) -> Result<Self> {
		if key.is_empty() {
			return Err(TupleError::EmptyKey.into());
		}

		let mut names = HashSet::new();
		for column in key.iter().chain(value.iter()) {
			if !names.insert(column.name()) {
				return Err(TupleError::DuplicateColumn {
					name: column.name().to_string(),
				}
				.into());
			}
		}

		let key = Columns::new(key);
		let value = Columns::new(value);
		let fingerprint = compute_fingerprint(&key, &value);

		Ok(Self(Arc::new(Inner {
			version,
			fingerprint,
			key,
			value,
		})))
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn fingerprint(&self) -> SchemaFingerprint {
		self.fingerprint
	}

	pub fn key_columns(&self) -> &Columns {
		&self.key
	}

	pub fn value_columns(&self) -> &Columns {
		&self.value
	}

	/// Total number of columns, key and value
	pub fn length(&self) -> usize {
		self.key.length() + self.value.length()
	}

	/// Column by absolute index
	pub fn column(&self, index: usize) -> Option<&Column> {
		if index < self.key.length() {
			self.key.column(index)
		} else {
			self.value.column(index - self.key.length())
		}
	}

	pub fn is_key_column(&self, index: usize) -> bool {
		index < self.key.length()
	}
}
