// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed access to an untyped configuration object.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Read-only view over one JSON object of a configuration document.
///
/// [`ConfigDict::must_get_string`] never fails: a missing key or a value of the
/// wrong type yields the supplied default.
#[derive(Debug, Clone, Copy)]
pub struct ConfigDict<'a> {
	map: &'a Map<String, Value>,
}

impl<'a> ConfigDict<'a> {
	pub fn new(map: &'a Map<String, Value>) -> Self {
		Self {
			map,
		}
	}

	/// View a value as a dictionary, failing unless it is a JSON object.
	pub fn from_value(value: &'a Value) -> Result<Self> {
		match value {
			Value::Object(map) => Ok(Self::new(map)),
			other => Err(Error::InvalidConfig(format!("expected an object, found {}", kind(other)))),
		}
	}

	pub fn as_map(&self) -> &'a Map<String, Value> {
		self.map
	}

	pub fn get_str(&self, key: &str) -> Option<&'a str> {
		self.map.get(key).and_then(Value::as_str)
	}

	pub fn must_get_string(&self, key: &str, default: &str) -> String {
		self.get_str(key).unwrap_or(default).to_string()
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_must_get_string_defaults() {
		let value = json!({"name": "console", "level": 20});
		let dict = ConfigDict::from_value(&value).unwrap();

		assert_eq!(dict.must_get_string("name", ""), "console");
		// wrong type falls back to the default
		assert_eq!(dict.must_get_string("level", "NOTHING"), "NOTHING");
		assert_eq!(dict.must_get_string("formatter", "terminal"), "terminal");
	}

	#[test]
	fn test_non_object_is_rejected() {
		let value = json!(["StreamHandler"]);
		let err = ConfigDict::from_value(&value).unwrap_err();
		assert_eq!(err.to_string(), "invalid logging configuration: expected an object, found an array");
	}
}
