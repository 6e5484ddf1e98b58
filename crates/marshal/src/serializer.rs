// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvrow_tuple::{Columns, EncodedTuple, SchemaDescriptor, Tuple, TupleBuilder, VarlenStatistic, tuple_size};
use kvrow_type::ValueRef;
use tracing::{debug, instrument, trace, warn};

use crate::{
	Result,
	accessor::FieldAccessor,
	config::SerializerConfig,
	error::MarshalError,
	marshaller::Marshaller,
	shape::{Marshal, Shape},
};

/// Encodes key/value objects of types `K` and `V` as tuples of one schema,
/// and decodes them back.
///
/// All accessors are resolved once, in [`Serializer::new`]. The binding is
/// immutable afterwards; share it across threads behind an `Arc`.
pub struct Serializer<K: Marshal, V: Marshal> {
	schema: SchemaDescriptor,
	config: SerializerConfig,
	key: Marshaller<K>,
	value: Marshaller<V>,
}

impl<K: Marshal, V: Marshal> Serializer<K, V> {
	#[instrument(
		name = "marshal::serializer::new",
		level = "debug",
		skip_all,
		fields(version = schema.version(), fingerprint = %schema.fingerprint())
	)]
	pub fn new(schema: SchemaDescriptor, config: SerializerConfig) -> Result<Self> {
		let redact = config.redact_sensitive;

		let key = create_marshaller::<K>(schema.key_columns(), 0, "key", redact)
			.inspect_err(|err| warn!(code = %err.code, "failed to bind key type: {}", err.message))?;

		let value = create_marshaller::<V>(schema.value_columns(), schema.key_columns().length(), "value", redact)
			.inspect_err(|err| warn!(code = %err.code, "failed to bind value type: {}", err.message))?;

		debug!(
			key_identity = key.is_identity(),
			value_identity = value.is_identity(),
			columns = schema.length(),
			"bound serializer"
		);

		Ok(Self {
			schema,
			config,
			key,
			value,
		})
	}

	pub fn schema(&self) -> &SchemaDescriptor {
		&self.schema
	}

	pub fn config(&self) -> &SerializerConfig {
		&self.config
	}

	/// Non-null variable-length values and their byte size, per group.
	/// An absent value contributes nothing.
	pub fn statistics(&self, key: &K, value: Option<&V>) -> (VarlenStatistic, VarlenStatistic) {
		let key_stat = statistic(&self.key, self.schema.key_columns(), key);
		let value_stat = match value {
			Some(value) => statistic(&self.value, self.schema.value_columns(), value),
			None => VarlenStatistic::default(),
		};
		(key_stat, value_stat)
	}

	/// Exact encoded size of the tuple for `key` and `value`.
	pub fn tuple_size(&self, key: &K, value: Option<&V>) -> usize {
		let (key_stat, value_stat) = self.statistics(key, value);
		tuple_size(&self.schema, key_stat, value_stat)
	}

	/// Encodes `key` and `value` into one tuple.
	///
	/// Panics if `value` is `None` or an identity-bound key holds no value;
	/// tuples without a value are not supported.
	#[instrument(name = "marshal::serializer::serialize", level = "trace", skip_all)]
	pub fn serialize(&self, key: &K, value: Option<&V>) -> Result<EncodedTuple> {
		assert!(!self.key.is_null(key), "null keys are not supported");
		let Some(value) = value else {
			panic!("null values are not supported");
		};

		let (key_stat, value_stat) = self.statistics(key, Some(value));
		let size = tuple_size(&self.schema, key_stat, value_stat);
		trace!(size, key_varlen = key_stat.non_null, value_varlen = value_stat.non_null, "computed tuple size");

		let mut builder = TupleBuilder::new(&self.schema, size, key_stat.non_null, value_stat.non_null)?;
		self.key.write_object(key, &mut builder)?;
		self.value.write_object(value, &mut builder)?;

		builder.build()
	}

	#[instrument(name = "marshal::serializer::deserialize_key", level = "trace", skip_all, fields(len = bytes.len()))]
	pub fn deserialize_key(&self, bytes: &[u8]) -> Result<K> {
		let tuple = Tuple::new(&self.schema, bytes)?;
		self.key.read_object(&tuple)
	}

	#[instrument(name = "marshal::serializer::deserialize_value", level = "trace", skip_all, fields(len = bytes.len()))]
	pub fn deserialize_value(&self, bytes: &[u8]) -> Result<V> {
		let tuple = Tuple::new(&self.schema, bytes)?;
		self.value.read_object(&tuple)
	}
}

fn create_marshaller<T: Marshal>(
	columns: &Columns,
	offset: usize,
	side: &'static str,
	redact: bool,
) -> Result<Marshaller<T>> {
	match T::shape() {
		Shape::Scalar(scalar) => {
			let column = match columns.column(0) {
				Some(column) if columns.length() == 1 => column,
				_ => {
					return Err(MarshalError::IdentityColumnCount {
						side,
						count: columns.length(),
					}
					.into());
				}
			};

			let accessor = FieldAccessor::identity(column, offset, scalar.declared, scalar.codec, redact)?;
			Ok(Marshaller::Identity(accessor))
		}
		Shape::Object(mut record) => {
			let mut accessors = Vec::with_capacity(columns.length());
			for (local, column) in columns.iter().enumerate() {
				let Some(def) = record.take(column.name()) else {
					return Err(MarshalError::UnknownField {
						column: column.name().to_string(),
					}
					.into());
				};
				accessors.push(FieldAccessor::create(def, column, offset + local, redact)?);
			}

			Ok(Marshaller::Object {
				factory: record.factory(),
				accessors,
			})
		}
	}
}

fn statistic<T>(marshaller: &Marshaller<T>, columns: &Columns, object: &T) -> VarlenStatistic {
	let mut stat = VarlenStatistic::default();
	let Some(first) = columns.first_varlen_column() else {
		return stat;
	};

	for index in first..columns.length() {
		match marshaller.value(object, index) {
			ValueRef::Undefined => {}
			ValueRef::Utf8(v) => stat.record(v.len()),
			ValueRef::Blob(v) => stat.record(v.len()),
			other => unreachable!("fixed-size value {:?} in variable-length column {}", other.get_type(), index),
		}
	}

	stat
}
