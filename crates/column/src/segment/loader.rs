// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{HashMap, HashSet},
	sync::Arc,
};

use segmentdb_type::{FieldSpec, Params, Schema, Value};
use tracing::{debug, instrument, warn};

use crate::{
	config::{ColumnFailurePolicy, SegmentLoadConfig},
	context::VirtualColumnContext,
	error::{ColumnError, Result},
	index::ColumnIndexContainer,
	metadata::ColumnMetadata,
	physical::PhysicalColumnIndexContainer,
	provider::{ConstantProvider, VirtualColumnProvider, constant_params},
	registry::{BuiltColumn, VirtualColumnRegistry, build_with},
	segment::{ColumnEntry, ColumnId, Segment, SegmentData, builtin::builtin_columns, order::build_order},
};

/// Turns [`SegmentData`] into a published [`Segment`].
///
/// Stored columns are encoded first, then schema fields without data are
/// served as default-null columns, then virtual columns are built in
/// dependency order. The segment becomes visible only after every column
/// has been handled.
pub struct SegmentLoader {
	registry: Arc<VirtualColumnRegistry>,
	config: SegmentLoadConfig,
}

struct PendingColumn {
	field: FieldSpec,
	params: Params,
	provider: Arc<dyn VirtualColumnProvider>,
}

#[derive(Default)]
struct Staging {
	columns: Vec<ColumnEntry>,
	containers: HashMap<String, Arc<dyn ColumnIndexContainer>>,
	failures: Vec<ColumnError>,
}

impl Staging {
	fn push(&mut self, entry: ColumnEntry) {
		self.containers.insert(entry.metadata.name.clone(), entry.container.clone());
		self.columns.push(entry);
	}
}

impl From<BuiltColumn> for ColumnEntry {
	fn from(built: BuiltColumn) -> Self {
		ColumnEntry {
			metadata: built.metadata,
			container: built.container,
		}
	}
}

impl SegmentLoader {
	pub fn new(registry: Arc<VirtualColumnRegistry>, config: SegmentLoadConfig) -> Self {
		Self {
			registry,
			config,
		}
	}

	pub fn registry(&self) -> &Arc<VirtualColumnRegistry> {
		&self.registry
	}

	pub fn config(&self) -> &SegmentLoadConfig {
		&self.config
	}

	#[instrument(name = "column::segment::load", level = "debug", skip(self, data), fields(segment = %data.name, docs = data.total_docs))]
	pub fn load(&self, data: SegmentData) -> Result<Segment> {
		let SegmentData {
			name,
			schema,
			total_docs,
			mut columns,
			mut params,
		} = data;

		let schema = self.served_schema(&name, schema, &mut params)?;
		let mut staging = Staging::default();

		let mut undeclared: Vec<String> = columns
			.keys()
			.filter(|column| schema.find(column).is_none_or(FieldSpec::is_virtual))
			.cloned()
			.collect();
		undeclared.sort();

		// Virtual fields that were also given stored values are left out entirely.
		let mut rejected = HashSet::new();
		for column in undeclared {
			columns.remove(&column);
			let err = if schema.contains(&column) {
				rejected.insert(column.clone());
				ColumnError::DuplicateColumn {
					column,
				}
			} else {
				ColumnError::BuildFailure {
					column,
					reason: "stored values for a column the schema does not declare".to_string(),
				}
			};
			self.on_failure(&mut staging, err)?;
		}

		let mut pending = Vec::new();
		for field in schema.fields() {
			if rejected.contains(&field.name) {
				continue;
			}
			if let Some(values) = columns.remove(&field.name) {
				let result = build_physical(field, values, total_docs);
				self.stage(&mut staging, result)?;
			} else if field.is_virtual() {
				match self.registry.resolve(field) {
					Ok(provider) => pending.push(PendingColumn {
						field: field.clone(),
						params: params.remove(&field.name).unwrap_or_else(|| default_params(field)),
						provider,
					}),
					Err(err) => self.on_failure(&mut staging, err)?,
				}
			} else if self.config.default_missing_columns {
				let result = build_default(field, total_docs);
				self.stage(&mut staging, result)?;
			} else {
				let err = ColumnError::BuildFailure {
					column: field.name.clone(),
					reason: "no stored values and default columns are disabled".to_string(),
				};
				self.on_failure(&mut staging, err)?;
			}
		}

		self.build_virtual(&mut staging, pending, total_docs)?;

		let Staging {
			columns,
			failures,
			..
		} = staging;
		let by_name =
			columns.iter().enumerate().map(|(idx, entry)| (entry.metadata.name.clone(), ColumnId(idx))).collect();

		debug!(columns = columns.len(), skipped = failures.len(), "segment loaded");

		Ok(Segment {
			name,
			schema,
			total_docs,
			columns,
			by_name,
			failures,
		})
	}

	/// Adds the built-in columns the segment's own schema does not define.
	fn served_schema(
		&self,
		segment_name: &str,
		schema: Schema,
		params: &mut HashMap<String, Params>,
	) -> Result<Schema> {
		if !self.config.builtin_columns {
			return Ok(schema);
		}

		let mut schema = schema;
		for builtin in builtin_columns(segment_name, &self.config.host_name) {
			if schema.contains(&builtin.field.name) {
				continue;
			}
			params.insert(builtin.field.name.clone(), builtin.params);
			let column = builtin.field.name.clone();
			schema.add_field(builtin.field).map_err(|_| ColumnError::DuplicateColumn {
				column,
			})?;
		}
		Ok(schema)
	}

	fn build_virtual(&self, staging: &mut Staging, pending: Vec<PendingColumn>, total_docs: u32) -> Result<()> {
		let nodes: Vec<(String, Vec<String>)> = pending
			.iter()
			.map(|column| (column.field.name.clone(), column.provider.dependencies(&column.field)))
			.collect();

		let order = build_order(&nodes);
		if !order.unordered.is_empty() {
			let columns = order.unordered.iter().map(|&idx| nodes[idx].0.clone()).collect();
			self.on_failure(
				staging,
				ColumnError::DependencyCycle {
					columns,
				},
			)?;
		}

		let mut slots: Vec<Option<PendingColumn>> = pending.into_iter().map(Some).collect();
		for idx in order.ordered {
			let Some(column) = slots[idx].take() else {
				continue;
			};
			let result = build_pending(&staging.containers, column, total_docs);
			self.stage(staging, result)?;
		}
		Ok(())
	}

	fn stage(&self, staging: &mut Staging, result: Result<ColumnEntry>) -> Result<()> {
		match result {
			Ok(entry) => {
				debug!(
					column = %entry.metadata.name,
					is_virtual = entry.metadata.is_virtual,
					cardinality = entry.metadata.cardinality,
					"column built"
				);
				staging.push(entry);
				Ok(())
			}
			Err(err) => self.on_failure(staging, err),
		}
	}

	fn on_failure(&self, staging: &mut Staging, err: ColumnError) -> Result<()> {
		match self.config.on_column_failure {
			ColumnFailurePolicy::Fail => Err(err),
			ColumnFailurePolicy::Skip => {
				warn!(column = err.column().unwrap_or("-"), error = %err, "skipping column");
				staging.failures.push(err);
				Ok(())
			}
		}
	}
}

fn build_physical(field: &FieldSpec, values: Vec<Value>, total_docs: u32) -> Result<ColumnEntry> {
	if values.len() != total_docs as usize {
		return Err(ColumnError::BuildFailure {
			column: field.name.clone(),
			reason: format!("{} stored values for a segment of {} documents", values.len(), total_docs),
		});
	}

	let container = PhysicalColumnIndexContainer::encode(field, values)?;
	let metadata = ColumnMetadata::physical(field, total_docs).with_dictionary(container.dictionary());
	Ok(ColumnEntry {
		metadata,
		container: Arc::new(container),
	})
}

fn build_default(field: &FieldSpec, total_docs: u32) -> Result<ColumnEntry> {
	let ctx = VirtualColumnContext::new(field.clone(), total_docs)
		.with_params(constant_params(field.default_null_value()));
	Ok(build_with(&ConstantProvider, &ctx)?.into())
}

fn build_pending(
	containers: &HashMap<String, Arc<dyn ColumnIndexContainer>>,
	column: PendingColumn,
	total_docs: u32,
) -> Result<ColumnEntry> {
	let ctx = VirtualColumnContext::builder()
		.field(column.field)
		.total_docs(total_docs)
		.params(column.params)
		.columns(containers)
		.build()?;
	Ok(build_with(column.provider.as_ref(), &ctx)?.into())
}

fn default_params(field: &FieldSpec) -> Params {
	match &field.default_null_value {
		Some(value) => constant_params(value.clone()),
		None => Params::None,
	}
}

#[cfg(test)]
mod tests {
	use segmentdb_type::{Type, params};

	use super::*;
	use crate::{
		index::DictId,
		provider::DerivedProvider,
		registry::{CONSTANT, ROW_INDEX},
		segment::{DOC_ID, HOST_NAME, SEGMENT_NAME},
	};

	fn loader(config: SegmentLoadConfig) -> SegmentLoader {
		SegmentLoader::new(Arc::new(VirtualColumnRegistry::new()), config)
	}

	fn schema(fields: impl IntoIterator<Item = FieldSpec>) -> Schema {
		Schema::new(fields).unwrap()
	}

	#[test]
	fn test_builtin_columns() {
		let data = SegmentData::new("events_0", schema([]), 3);
		let segment = loader(SegmentLoadConfig::default().with_host_name("node-1")).load(data).unwrap();

		assert_eq!(segment.column_names(), vec![DOC_ID, SEGMENT_NAME, HOST_NAME]);
		assert_eq!(segment.container(DOC_ID).unwrap().reader().value(2), Some(Value::Int4(2)));
		assert_eq!(segment.container(SEGMENT_NAME).unwrap().reader().value(0), Some(Value::utf8("events_0")));
		assert_eq!(segment.container(HOST_NAME).unwrap().reader().value(1), Some(Value::utf8("node-1")));
		assert!(segment.metadata(DOC_ID).unwrap().is_virtual);

		let id = segment.column_id(SEGMENT_NAME).unwrap();
		assert_eq!(id, ColumnId(1));
		assert_eq!(segment.column_by_id(id).unwrap().metadata.name, SEGMENT_NAME);
		assert!(segment.column_by_id(ColumnId(3)).is_none());
	}

	#[test]
	fn test_builtin_params_ignore_caller_params() {
		let data = SegmentData::new("events_0", schema([]), 2)
			.with_params(SEGMENT_NAME, params! { value: "spoofed" })
			.with_params(HOST_NAME, params!["other-host"]);
		let segment = loader(SegmentLoadConfig::default().with_host_name("node-1")).load(data).unwrap();
		assert_eq!(segment.container(SEGMENT_NAME).unwrap().reader().value(0), Some(Value::utf8("events_0")));
		assert_eq!(segment.container(HOST_NAME).unwrap().reader().value(1), Some(Value::utf8("node-1")));
	}

	#[test]
	fn test_builtins_disabled() {
		let data = SegmentData::new("events_0", schema([]), 3);
		let segment = loader(SegmentLoadConfig::default().with_builtin_columns(false)).load(data).unwrap();
		assert!(segment.column_names().is_empty());
	}

	#[test]
	fn test_physical_then_default() {
		let data = SegmentData::new(
			"events_0",
			schema([FieldSpec::dimension("country", Type::Utf8), FieldSpec::metric("clicks", Type::Int8)]),
			2,
		)
		.with_column("country", vec![Value::utf8("US"), Value::utf8("DE")]);

		let segment = loader(SegmentLoadConfig::default().with_builtin_columns(false)).load(data).unwrap();
		assert_eq!(segment.column_names(), vec!["country", "clicks"]);
		assert!(!segment.metadata("country").unwrap().is_virtual);

		let clicks = segment.container("clicks").unwrap();
		assert_eq!(clicks.reader().value(1), Some(Value::Int8(0)));
		assert_eq!(clicks.dictionary().len(), 1);
		assert!(segment.metadata("clicks").unwrap().is_virtual);
	}

	#[test]
	fn test_missing_column_without_defaults() {
		let data = SegmentData::new("events_0", schema([FieldSpec::metric("clicks", Type::Int8)]), 2);
		let err = loader(SegmentLoadConfig::default().with_default_missing_columns(false)).load(data).err().unwrap();
		assert!(matches!(err, ColumnError::BuildFailure { column, .. } if column == "clicks"));
	}

	#[test]
	fn test_stored_length_mismatch() {
		let data = SegmentData::new("events_0", schema([FieldSpec::metric("clicks", Type::Int8)]), 3)
			.with_column("clicks", vec![Value::int8(1)]);
		let err = loader(SegmentLoadConfig::default()).load(data).err().unwrap();
		assert!(matches!(err, ColumnError::BuildFailure { .. }));
	}

	#[test]
	fn test_stored_values_for_virtual_column() {
		let data = SegmentData::new(
			"events_0",
			schema([FieldSpec::dimension("row", Type::Int4).with_virtual_provider(ROW_INDEX)]),
			1,
		)
		.with_column("row", vec![Value::int4(0)]);
		let err = loader(SegmentLoadConfig::default()).load(data).err().unwrap();
		assert_eq!(
			err,
			ColumnError::DuplicateColumn {
				column: "row".to_string()
			}
		);
	}

	#[test]
	fn test_stored_values_for_virtual_column_skipped() {
		let registry = Arc::new(VirtualColumnRegistry::new());
		registry.register(
			"next_row",
			DerivedProvider::new(["row"], |v| Ok(Value::int8(v[0].as_i64().unwrap_or(0) + 1))),
		);

		let data = SegmentData::new(
			"events_0",
			schema([
				FieldSpec::dimension("row", Type::Int4).with_virtual_provider(ROW_INDEX),
				FieldSpec::metric("next", Type::Int8).with_virtual_provider("next_row"),
				FieldSpec::metric("clicks", Type::Int8),
			]),
			1,
		)
		.with_column("row", vec![Value::int4(0)])
		.with_column("clicks", vec![Value::int8(7)]);

		let config = SegmentLoadConfig::default()
			.with_builtin_columns(false)
			.with_failure_policy(ColumnFailurePolicy::Skip);
		let segment = SegmentLoader::new(registry, config).load(data).unwrap();

		assert_eq!(segment.column_names(), vec!["clicks"]);
		assert!(!segment.contains("row"));
		assert!(!segment.contains("next"));
		assert_eq!(
			segment.failures(),
			&[
				ColumnError::DuplicateColumn {
					column: "row".to_string()
				},
				ColumnError::DependencyUnavailable {
					column: "next".to_string(),
					dependency: "row".to_string(),
				},
			]
		);
		for failure in segment.failures() {
			assert!(!segment.contains(failure.column().unwrap()));
		}
	}

	#[test]
	fn test_constant_from_params() {
		let data = SegmentData::new(
			"events_0",
			schema([FieldSpec::dimension("region", Type::Utf8).with_virtual_provider(CONSTANT)]),
			2,
		)
		.with_params("region", params! { value: "eu-west" });
		let segment = loader(SegmentLoadConfig::default()).load(data).unwrap();
		let region = segment.container("region").unwrap();
		assert_eq!(region.dictionary().value_of(DictId(0)), Some(Value::utf8("eu-west")));
	}

	#[test]
	fn test_constant_from_default_null_value() {
		let field = FieldSpec::dimension("region", Type::Utf8)
			.with_virtual_provider(CONSTANT)
			.with_default_null_value(Value::utf8("unknown"));
		let data = SegmentData::new("events_0", schema([field]), 2);
		let segment = loader(SegmentLoadConfig::default()).load(data).unwrap();
		assert_eq!(segment.container("region").unwrap().reader().value(0), Some(Value::utf8("unknown")));
	}

	#[test]
	fn test_derived_chain_builds_in_dependency_order() {
		let registry = Arc::new(VirtualColumnRegistry::new());
		registry.register(
			"double",
			DerivedProvider::new(["clicks"], |v| Ok(Value::int8(v[0].as_i64().unwrap_or(0) * 2))),
		);
		registry.register(
			"quadruple",
			DerivedProvider::new(["doubled"], |v| Ok(Value::int8(v[0].as_i64().unwrap_or(0) * 2))),
		);

		let data = SegmentData::new(
			"events_0",
			schema([
				FieldSpec::metric("quadrupled", Type::Int8).with_virtual_provider("quadruple"),
				FieldSpec::metric("doubled", Type::Int8).with_virtual_provider("double"),
				FieldSpec::metric("clicks", Type::Int8),
			]),
			2,
		)
		.with_column("clicks", vec![Value::int8(1), Value::int8(5)]);

		let segment = SegmentLoader::new(registry, SegmentLoadConfig::default().with_builtin_columns(false))
			.load(data)
			.unwrap();
		assert_eq!(segment.column_names(), vec!["clicks", "doubled", "quadrupled"]);
		assert_eq!(segment.container("quadrupled").unwrap().reader().value(1), Some(Value::Int8(20)));
	}

	#[test]
	fn test_cycle_fails_load() {
		let registry = Arc::new(VirtualColumnRegistry::new());
		registry.register("from_b", DerivedProvider::new(["b"], |v| Ok(v[0].clone())));
		registry.register("from_a", DerivedProvider::new(["a"], |v| Ok(v[0].clone())));

		let data = SegmentData::new(
			"events_0",
			schema([
				FieldSpec::metric("a", Type::Int8).with_virtual_provider("from_b"),
				FieldSpec::metric("b", Type::Int8).with_virtual_provider("from_a"),
			]),
			1,
		);
		let err = SegmentLoader::new(registry, SegmentLoadConfig::default()).load(data).err().unwrap();
		assert_eq!(
			err,
			ColumnError::DependencyCycle {
				columns: vec!["a".to_string(), "b".to_string()]
			}
		);
	}

	#[test]
	fn test_skip_policy_keeps_other_columns() {
		let data = SegmentData::new(
			"events_0",
			schema([
				FieldSpec::dimension("region", Type::Utf8).with_virtual_provider(CONSTANT),
				FieldSpec::metric("clicks", Type::Int8),
			]),
			2,
		)
		.with_column("clicks", vec![Value::int8(1), Value::int8(2)]);

		let config = SegmentLoadConfig::default()
			.with_builtin_columns(false)
			.with_failure_policy(ColumnFailurePolicy::Skip);
		let segment = loader(config).load(data).unwrap();

		assert_eq!(segment.column_names(), vec!["clicks"]);
		assert!(!segment.contains("region"));
		assert_eq!(
			segment.failures(),
			&[ColumnError::MissingParameter {
				column: "region".to_string(),
				parameter: "value".to_string(),
			}]
		);
	}

	#[test]
	fn test_unknown_provider() {
		let data = SegmentData::new(
			"events_0",
			schema([FieldSpec::metric("score", Type::Float8).with_virtual_provider("ml_score")]),
			1,
		);
		let err = loader(SegmentLoadConfig::default()).load(data).err().unwrap();
		assert!(matches!(err, ColumnError::UnknownProvider { kind, .. } if kind == "ml_score"));
	}

	#[test]
	fn test_user_schema_overrides_builtin() {
		let data = SegmentData::new("events_0", schema([FieldSpec::dimension(DOC_ID, Type::Int8)]), 2)
			.with_column(DOC_ID, vec![Value::int8(10), Value::int8(11)]);
		let segment = loader(SegmentLoadConfig::default()).load(data).unwrap();
		assert!(!segment.metadata(DOC_ID).unwrap().is_virtual);
		assert_eq!(segment.container(DOC_ID).unwrap().reader().value(0), Some(Value::Int8(10)));
	}
}
