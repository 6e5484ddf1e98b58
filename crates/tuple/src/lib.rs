// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binary tuple codec.
//!
//! A tuple is one key/value pair laid out against a [`SchemaDescriptor`]:
//!
//! ```text
//! tuple := [fingerprint: u64][key chunk][value chunk]
//! chunk := [len: u32][null map][varlen table][fixed section][varlen data]
//! ```
//!
//! The null map has one bit per column (set = defined). The varlen table
//! holds one `u32` offset, relative to the chunk start, per non-null
//! variable-length column. Null fixed-size columns keep their zeroed slot.
//! All integers are little endian.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod builder;
mod encoded;
mod error;
mod reader;
pub mod schema;
mod size;

pub use builder::TupleBuilder;
pub use encoded::EncodedTuple;
pub use error::TupleError;
pub use kvrow_type::Error;
pub use reader::Tuple;
pub use schema::{Column, Columns, SchemaDescriptor, fingerprint::SchemaFingerprint};
pub use size::{VarlenStatistic, chunk_size, tuple_size};

/// Size of the schema fingerprint header in bytes
pub const FINGERPRINT_SIZE: usize = 8;

/// Size of the chunk length prefix in bytes
pub const CHUNK_HEADER_SIZE: usize = 4;

/// Size of one varlen table entry in bytes
pub const VARLEN_ENTRY_SIZE: usize = 4;

pub type Result<T> = std::result::Result<T, Error>;
