// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use kvrow_type::Type;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::schema::Columns;

/// Content hash of a schema's column layout.
///
/// Equal layouts always hash equal, whatever the schema version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaFingerprint(pub u64);

impl SchemaFingerprint {
	pub fn to_le_bytes(&self) -> [u8; 8] {
		self.0.to_le_bytes()
	}

	pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
		Self(u64::from_le_bytes(bytes))
	}
}

impl Display for SchemaFingerprint {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:016x}", self.0)
	}
}

pub(crate) fn compute_fingerprint(key: &Columns, value: &Columns) -> SchemaFingerprint {
	let mut buf = Vec::new();

	for (group, columns) in [(0u8, key), (1u8, value)] {
		for column in columns {
			buf.push(group);
			buf.extend_from_slice(&(column.name().len() as u32).to_le_bytes());
			buf.extend_from_slice(column.name().as_bytes());
			buf.push(column.get_type().to_u8());
			if let Type::Bitmask(bits) = column.get_type() {
				buf.extend_from_slice(&bits.to_le_bytes());
			}
			buf.push(column.is_nullable() as u8);
		}
	}

	SchemaFingerprint(xxh3_64(&buf))
}

#[cfg(test)]
pub mod tests {
	use kvrow_type::Type;

	use crate::schema::{Column, SchemaDescriptor};

	fn schema(version: u32, value: Vec<Column>) -> SchemaDescriptor {
		SchemaDescriptor::new(version, vec![Column::new("id", Type::Int8, false)], value).unwrap()
	}

	#[test]
	fn test_same_layout_same_fingerprint() {
		let a = schema(1, vec![Column::new("name", Type::Utf8, true)]);
		let b = schema(7, vec![Column::new("name", Type::Utf8, true)]);
		assert_eq!(a.fingerprint(), b.fingerprint());
	}

	#[test]
	fn test_layout_changes_fingerprint() {
		let base = schema(1, vec![Column::new("name", Type::Utf8, true)]);

		let renamed = schema(1, vec![Column::new("title", Type::Utf8, true)]);
		let retyped = schema(1, vec![Column::new("name", Type::Blob, true)]);
		let required = schema(1, vec![Column::new("name", Type::Utf8, false)]);

		assert_ne!(base.fingerprint(), renamed.fingerprint());
		assert_ne!(base.fingerprint(), retyped.fingerprint());
		assert_ne!(base.fingerprint(), required.fingerprint());
	}

	#[test]
	fn test_bitmask_width_changes_fingerprint() {
		let narrow = schema(1, vec![Column::new("flags", Type::Bitmask(8), true)]);
		let wide = schema(1, vec![Column::new("flags", Type::Bitmask(16), true)]);
		assert_ne!(narrow.fingerprint(), wide.fingerprint());
	}

	#[test]
	fn test_le_bytes() {
		let fingerprint = schema(1, vec![]).fingerprint();
		assert_eq!(super::SchemaFingerprint::from_le_bytes(fingerprint.to_le_bytes()), fingerprint);
		assert_eq!(fingerprint.to_string().len(), 16);
	}
}
