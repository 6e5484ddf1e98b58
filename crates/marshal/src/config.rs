// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Configuration of a [`Serializer`](crate::Serializer) binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
	/// Keep field names and column metadata out of serialization errors;
	/// failures then report only the column index.
	///
	/// Default: false
	pub redact_sensitive: bool,
}

impl SerializerConfig {
	/// Create a new config with default values.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn redact_sensitive(mut self, redact: bool) -> Self {
		self.redact_sensitive = redact;
		self
	}
}
