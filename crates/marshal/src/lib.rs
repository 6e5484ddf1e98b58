// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schema-driven marshalling of typed key/value objects.
//!
//! A [`Serializer`] binds a key type and a value type to the key and value
//! column groups of a [`SchemaDescriptor`](kvrow_tuple::SchemaDescriptor).
//! Binding happens once; afterwards the serializer is immutable and can be
//! shared freely between threads.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Person {
//!     name: Option<String>,
//!     score: f64,
//! }
//!
//! record!(Person { name, score });
//!
//! let serializer = Serializer::<Option<i32>, Person>::new(schema, SerializerConfig::default())?;
//! let bytes = serializer.serialize(&Some(42), Some(&person))?;
//! let person = serializer.deserialize_value(&bytes)?;
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod accessor;
mod config;
mod error;
mod field;
mod marshaller;
mod mode;
mod serializer;
mod shape;

pub use accessor::FieldAccessor;
pub use config::SerializerConfig;
pub use error::{FieldTarget, MarshalError, Operation};
pub use field::{FieldBinding, FieldDef, FieldType, ReferenceField, Scalar, Slot};
pub use kvrow_type::Error;
pub use marshaller::Marshaller;
pub use mode::{BinaryMode, DeclaredType};
pub use serializer::Serializer;
pub use shape::{IdentityCodec, Marshal, RecordShape, ScalarShape, Shape};

pub type Result<T> = std::result::Result<T, Error>;
