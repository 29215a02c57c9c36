// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use segmentdb_type::{FieldSpec, Params, Type, Value};

use crate::{
	provider::constant_params,
	registry::{CONSTANT, ROW_INDEX},
};

pub const DOC_ID: &str = "$docId";
pub const SEGMENT_NAME: &str = "$segmentName";
pub const HOST_NAME: &str = "$hostName";

pub(crate) struct BuiltinColumn {
	pub field: FieldSpec,
	pub params: Params,
}

/// Columns every segment serves in addition to its own schema.
pub(crate) fn builtin_columns(segment_name: &str, host_name: &str) -> Vec<BuiltinColumn> {
	vec![
		BuiltinColumn {
			field: FieldSpec::dimension(DOC_ID, Type::Int4).with_virtual_provider(ROW_INDEX),
			params: Params::None,
		},
		BuiltinColumn {
			field: FieldSpec::dimension(SEGMENT_NAME, Type::Utf8).with_virtual_provider(CONSTANT),
			params: constant_params(Value::utf8(segment_name)),
		},
		BuiltinColumn {
			field: FieldSpec::dimension(HOST_NAME, Type::Utf8).with_virtual_provider(CONSTANT),
			params: constant_params(Value::utf8(host_name)),
		},
	]
}
