// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Configuration errors raised while binding key/value types to a schema

use kvrow_marshal::{Error, Marshal, Result, Serializer, SerializerConfig, record};
use kvrow_tuple::{Column, SchemaDescriptor};
use kvrow_type::Type;

fn bind<K: Marshal, V: Marshal>(key: Vec<Column>, value: Vec<Column>) -> Result<Serializer<K, V>> {
	let schema = SchemaDescriptor::new(1, key, value)?;
	Serializer::new(schema, SerializerConfig::default())
}

fn bind_err<K: Marshal, V: Marshal>(key: Vec<Column>, value: Vec<Column>) -> Error {
	match bind::<K, V>(key, value) {
		Ok(_) => panic!("binding should fail"),
		Err(err) => err,
	}
}

fn id() -> Vec<Column> {
	vec![Column::new("id", Type::Int4, false)]
}

#[derive(Default)]
struct Scored {
	score: f64,
}

record!(Scored { score });

#[derive(Default)]
struct Flagged {
	score: Option<f64>,
	active: bool,
}

record!(Flagged { score, active });

#[test]
fn test_unknown_field() {
	let err = bind_err::<Option<i32>, Scored>(id(), vec![Column::new("rating", Type::Float8, false)]);
	assert_eq!(err.code, "MARSHAL_001");
	assert!(err.message.contains("`rating`"));
}

#[test]
fn test_unsupported_field_type() {
	let err = bind_err::<Option<i32>, Flagged>(
		id(),
		vec![Column::new("score", Type::Float8, true), Column::new("active", Type::Int1, false)],
	);
	assert_eq!(err.code, "MARSHAL_002");
	assert!(err.message.contains("`active`"));
	assert!(err.message.contains("bool"));
}

#[test]
fn test_primitive_field_on_nullable_column() {
	let err = bind_err::<Option<i32>, Scored>(id(), vec![Column::new("score", Type::Float8, true)]);
	assert_eq!(err.code, "MARSHAL_003");
	assert!(err.help.is_some());
}

#[test]
fn test_primitive_identity_key() {
	let err = bind_err::<i32, Scored>(id(), vec![Column::new("score", Type::Float8, false)]);
	assert_eq!(err.code, "MARSHAL_004");
}

#[test]
fn test_primitive_identity_value() {
	let err = bind_err::<Option<i32>, f64>(id(), vec![Column::new("score", Type::Float8, false)]);
	assert_eq!(err.code, "MARSHAL_004");
}

#[test]
fn test_column_type_mismatch() {
	let err = bind_err::<Option<i64>, Scored>(id(), vec![Column::new("score", Type::Float8, false)]);
	assert_eq!(err.code, "MARSHAL_005");

	let err = bind_err::<Option<i32>, Scored>(id(), vec![Column::new("score", Type::Float4, false)]);
	assert_eq!(err.code, "MARSHAL_005");
}

#[test]
fn test_scalar_needs_single_column() {
	let err = bind_err::<Option<i32>, Option<String>>(
		id(),
		vec![Column::new("a", Type::Utf8, true), Column::new("b", Type::Utf8, true)],
	);
	assert_eq!(err.code, "MARSHAL_006");

	let err = bind_err::<Option<i32>, Option<String>>(id(), vec![]);
	assert_eq!(err.code, "MARSHAL_006");
}

#[test]
fn test_primitive_field_on_non_nullable_column() -> Result<()> {
	bind::<Option<i32>, Scored>(id(), vec![Column::new("score", Type::Float8, false)])?;
	Ok(())
}

#[test]
fn test_nullable_field_on_non_nullable_column() -> Result<()> {
	#[derive(Default)]
	struct Loose {
		score: Option<f64>,
	}
	record!(Loose { score });

	bind::<Option<i32>, Loose>(id(), vec![Column::new("score", Type::Float8, false)])?;
	Ok(())
}

#[test]
fn test_extra_fields_are_ignored() -> Result<()> {
	#[derive(Default)]
	struct Wide {
		score: f64,
		note: Option<String>,
	}
	record!(Wide { score, note });

	bind::<Option<i32>, Wide>(id(), vec![Column::new("score", Type::Float8, false)])?;
	Ok(())
}

#[test]
fn test_record_without_value_columns() -> Result<()> {
	#[derive(Debug, Default, PartialEq)]
	struct Nothing {}
	record!(Nothing {});

	let serializer = bind::<Option<i32>, Nothing>(id(), vec![])?;
	let bytes = serializer.serialize(&Some(5), Some(&Nothing {}))?;
	assert_eq!(serializer.deserialize_key(&bytes)?, Some(5));
	assert_eq!(serializer.deserialize_value(&bytes)?, Nothing {});
	Ok(())
}

#[test]
#[should_panic(expected = "null values are not supported")]
fn test_null_identity_value_panics() {
	let serializer = bind::<Option<i32>, Option<String>>(id(), vec![Column::new("v", Type::Utf8, true)]).unwrap();
	let _ = serializer.serialize(&Some(1), Some(&None));
}
