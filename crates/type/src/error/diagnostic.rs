// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, IntoDiagnostic};
use crate::error::TypeError;

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			TypeError::ValueMismatch {
				expected,
				found,
			} => Diagnostic::new("TYPE_001", format!("expected {} value, found {}", expected, found))
				.with_label("value of unexpected type")
				.with_help(format!("bind a field whose declared type reads {} values", expected)),
		}
	}
}
