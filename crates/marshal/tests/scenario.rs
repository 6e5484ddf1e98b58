// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! End-to-end encode/decode of a small key/value table

use kvrow_marshal::{Result, Serializer, SerializerConfig, record};
use kvrow_tuple::{Column, SchemaDescriptor, Tuple};
use kvrow_type::Type;

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
	name: Option<String>,
	score: f64,
}

record!(Person { name, score });

fn setup_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
		)
		.with_test_writer()
		.try_init();
}

fn person_schema() -> SchemaDescriptor {
	SchemaDescriptor::new(
		1,
		vec![Column::new("id", Type::Int4, false)],
		vec![Column::new("name", Type::Utf8, true), Column::new("score", Type::Float8, false)],
	)
	.unwrap()
}

fn serializer() -> Serializer<Option<i32>, Person> {
	setup_logging();
	Serializer::new(person_schema(), SerializerConfig::default()).unwrap()
}

#[test]
fn test_encode_decode_with_name() -> Result<()> {
	let serializer = serializer();
	let person = Person {
		name: Some("abc".to_string()),
		score: 3.5,
	};

	let bytes = serializer.serialize(&Some(42), Some(&person))?;
	assert_eq!(bytes.len(), 37);

	assert_eq!(serializer.deserialize_key(&bytes)?, Some(42));
	assert_eq!(serializer.deserialize_value(&bytes)?, person);
	Ok(())
}

#[test]
fn test_encode_decode_with_null_name() -> Result<()> {
	let serializer = serializer();
	let person = Person {
		name: None,
		score: 1.0,
	};

	let bytes = serializer.serialize(&Some(42), Some(&person))?;
	assert_eq!(bytes.len(), 30);

	assert_eq!(serializer.deserialize_key(&bytes)?, Some(42));
	assert_eq!(serializer.deserialize_value(&bytes)?, person);
	Ok(())
}

#[test]
#[should_panic(expected = "null values are not supported")]
fn test_encode_without_value_panics() {
	let serializer = serializer();
	let _ = serializer.serialize(&Some(42), None);
}

#[test]
fn test_columns_readable_through_tuple() -> Result<()> {
	let serializer = serializer();
	let person = Person {
		name: Some("abc".to_string()),
		score: 3.5,
	};

	let bytes = serializer.serialize(&Some(42), Some(&person))?;
	let tuple = Tuple::new(serializer.schema(), &bytes)?;

	// value columns are laid out as score, name
	assert_eq!(tuple.get_i32(0)?, 42);
	assert_eq!(tuple.get_f64(1)?, 3.5);
	assert_eq!(tuple.try_get_utf8(2)?, Some("abc"));
	Ok(())
}

#[test]
fn test_decode_under_other_schema_fails() -> Result<()> {
	let serializer = serializer();
	let bytes = serializer.serialize(
		&Some(1),
		Some(&Person {
			name: None,
			score: 0.0,
		}),
	)?;

	let evolved = SchemaDescriptor::new(
		2,
		vec![Column::new("id", Type::Int4, false)],
		vec![
			Column::new("name", Type::Utf8, true),
			Column::new("score", Type::Float8, false),
			Column::new("nickname", Type::Utf8, true),
		],
	)?;

	#[derive(Debug, Default, PartialEq)]
	struct Evolved {
		name: Option<String>,
		score: f64,
		nickname: Option<String>,
	}
	record!(Evolved { name, score, nickname });

	let other = Serializer::<Option<i32>, Evolved>::new(evolved, SerializerConfig::default())?;
	let err = other.deserialize_value(&bytes).unwrap_err();
	assert_eq!(err.code, "TUPLE_012");
	Ok(())
}

#[test]
fn test_decode_truncated_fails() -> Result<()> {
	let serializer = serializer();
	let bytes = serializer.serialize(
		&Some(1),
		Some(&Person {
			name: Some("abc".to_string()),
			score: 0.0,
		}),
	)?;

	let err = serializer.deserialize_key(&bytes[..bytes.len() - 1]).unwrap_err();
	assert_eq!(err.code, "TUPLE_013");
	Ok(())
}
