// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::any::Any;

use crate::{
	ConfigDict, Level, Record, Registry, Result,
	handler::{Configurable, Handler},
};

/// Discards everything. Useful as a placeholder destination and as a
/// side-effect free fixture.
#[derive(Debug, Default)]
pub struct NullHandler;

impl NullHandler {
	pub fn new() -> Self {
		Self
	}
}

impl Configurable for NullHandler {
	fn load_config(&mut self, _config: &ConfigDict<'_>, _registry: &Registry) -> Result<()> {
		Ok(())
	}
}

impl Handler for NullHandler {
	fn name(&self) -> &str {
		""
	}

	fn level(&self) -> Level {
		Level::NOTHING
	}

	fn filter(&self, _record: &Record) -> bool {
		true
	}

	fn emit(&self, _record: &Record) {}

	fn handle(&self, _record: &Record) {}

	fn close(&self) -> Result<()> {
		Ok(())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_filters_every_level() {
		let handler = NullHandler::new();
		for level in [Level::DEBUG, Level::INFO, Level::CRITICAL, Level::NOTHING, Level(i32::MIN)] {
			assert!(handler.filter(&Record::new(level, "", "x")));
		}
	}

	#[test]
	fn test_accepts_any_config() {
		let mut handler = NullHandler::new();
		let value = json!({"level": "DEBUG", "formatter": "does-not-exist", "filename": 42});
		let config = ConfigDict::from_value(&value).unwrap();

		handler.load_config(&config, &Registry::new()).unwrap();
		assert_eq!(handler.level(), Level::NOTHING);
	}

	#[test]
	fn test_close_twice() {
		let handler = NullHandler::new();
		handler.handle(&Record::new(Level::CRITICAL, "", "x"));
		assert!(handler.close().is_ok());
		assert!(handler.close().is_ok());
	}
}
