// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::thread;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Level;

/// A single log event, immutable once handed to a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	/// Name of the logger that produced the record (may be empty)
	pub name: String,
	pub level: Level,
	pub message: String,
	/// Structured fields in insertion order
	pub fields: IndexMap<String, Value>,
	pub time: DateTime<Utc>,
	pub file: Option<String>,
	pub line: Option<u32>,
	/// Producing thread, by name when it has one
	pub thread: String,
}

impl Record {
	pub fn new(level: Level, name: impl Into<String>, message: impl Into<String>) -> Self {
		let current = thread::current();
		let thread = match current.name() {
			Some(name) => name.to_string(),
			None => format!("{:?}", current.id()),
		};

		Self {
			name: name.into(),
			level,
			message: message.into(),
			fields: IndexMap::new(),
			time: Utc::now(),
			file: None,
			line: None,
			thread,
		}
	}

	/// Attach a structured field. Values that fail to serialize are skipped.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
		if let Ok(value) = serde_json::to_value(value) {
			self.fields.insert(key.into(), value);
		}
		self
	}

	pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
		self.file = Some(file.into());
		self.line = Some(line);
		self
	}

	pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
		self.time = time;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fields_keep_insertion_order() {
		let record = Record::new(Level::INFO, "app", "hello").with_field("b", 2).with_field("a", "one");
		let keys: Vec<_> = record.fields.keys().cloned().collect();
		assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
		assert_eq!(record.fields["b"], Value::from(2));
	}

	#[test]
	fn test_location() {
		let record = Record::new(Level::DEBUG, "", "x").with_location("src/main.rs", 42);
		assert_eq!(record.file.as_deref(), Some("src/main.rs"));
		assert_eq!(record.line, Some(42));
	}

	#[test]
	fn test_named_thread() {
		let record = thread::Builder::new()
			.name("worker-1".to_string())
			.spawn(|| Record::new(Level::INFO, "", "x"))
			.unwrap()
			.join()
			.unwrap();
		assert_eq!(record.thread, "worker-1");
	}
}
