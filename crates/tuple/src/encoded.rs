// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{FINGERPRINT_SIZE, schema::fingerprint::SchemaFingerprint};

/// An encoded key/value tuple.
// [fingerprint]:[key chunk]:[value chunk]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedTuple(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl Deref for EncodedTuple {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl AsRef<[u8]> for EncodedTuple {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl EncodedTuple {
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Read the schema fingerprint from the header, `None` if the tuple is
	/// shorter than the header.
	pub fn fingerprint(&self) -> Option<SchemaFingerprint> {
		let bytes: [u8; FINGERPRINT_SIZE] = self.0.get(..FINGERPRINT_SIZE)?.try_into().ok()?;
		Some(SchemaFingerprint::from_le_bytes(bytes))
	}
}

#[cfg(test)]
pub mod tests {
	use super::EncodedTuple;

	#[test]
	fn test_fingerprint() {
		let mut bytes = 0xDEAD_BEEFu64.to_le_bytes().to_vec();
		bytes.extend_from_slice(&[1, 2, 3]);
		let tuple = EncodedTuple(bytes);

		assert_eq!(tuple.fingerprint().unwrap().0, 0xDEAD_BEEF);
		assert_eq!(tuple.len(), 11);
	}

	#[test]
	fn test_fingerprint_truncated() {
		assert_eq!(EncodedTuple(vec![1, 2, 3]).fingerprint(), None);
	}

	#[test]
	fn test_serde_as_bytes() {
		let tuple = EncodedTuple(vec![1, 2, 3]);
		let json = serde_json::to_string(&tuple).unwrap();
		assert_eq!(json, "[1,2,3]");
		let back: EncodedTuple = serde_json::from_str(&json).unwrap();
		assert_eq!(back, tuple);
	}
}
