// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{
	Record,
	format::{FormatError, Formatter},
};

/// One JSON object per record, for machine consumption.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct Line<'a> {
	time: String,
	level: String,
	#[serde(skip_serializing_if = "is_blank")]
	name: &'a str,
	message: &'a str,
	#[serde(skip_serializing_if = "has_no_fields")]
	fields: &'a IndexMap<String, Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	file: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	line: Option<u32>,
	thread: &'a str,
}

fn is_blank(name: &&str) -> bool {
	name.is_empty()
}

fn has_no_fields(fields: &&IndexMap<String, Value>) -> bool {
	fields.is_empty()
}

impl Formatter for JsonFormatter {
	fn format(&self, record: &Record) -> Result<String, FormatError> {
		let line = Line {
			time: record.time.to_rfc3339(),
			level: record.level.to_string(),
			name: &record.name,
			message: &record.message,
			fields: &record.fields,
			file: record.file.as_deref(),
			line: record.line,
			thread: &record.thread,
		};
		serde_json::to_string(&line).map_err(|err| FormatError::new(err.to_string(), String::new()))
	}
}
