// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Building a [`Topology`] from a configuration document.
//!
//! ```json
//! {
//!     "handlers": {
//!         "console": { "class": "StreamHandler", "level": "INFO", "formatter": "default" },
//!         "audit":   { "class": "FileHandler", "filename": "/var/log/app.log" }
//!     }
//! }
//! ```
//!
//! Loading is all-or-nothing: the first failing handler aborts the load and
//! every handler built before it is closed again.

use std::{fs, path::Path, sync::Arc};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{ConfigDict, Error, Handler, Registry, Result, Topology};

/// Shape of a configuration document. Sections other than `handlers` are
/// accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	pub handlers: IndexMap<String, Value>,
}

pub struct Loader<'a> {
	registry: &'a Registry,
}

impl<'a> Loader<'a> {
	pub fn new(registry: &'a Registry) -> Self {
		Self {
			registry,
		}
	}

	pub fn load_json(&self, json: &[u8]) -> Result<Topology> {
		let config: LoggingConfig = serde_json::from_slice(json)?;
		self.load(&config)
	}

	pub fn load_str(&self, json: &str) -> Result<Topology> {
		self.load_json(json.as_bytes())
	}

	pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Topology> {
		let json = fs::read(path)?;
		self.load_json(&json)
	}

	#[instrument(name = "log::config::load", level = "debug", skip_all, fields(handlers = config.handlers.len()))]
	pub fn load(&self, config: &LoggingConfig) -> Result<Topology> {
		let mut topology = Topology::new();

		for (name, section) in &config.handlers {
			match self.build(name, section) {
				Ok(handler) => {
					topology.insert(name.clone(), handler);
				}
				Err(err) => {
					if let Err(close) = topology.close() {
						warn!("closing handlers after a failed load: {}", close);
					}
					return Err(err.in_handler(name.as_str()));
				}
			}
		}

		Ok(topology)
	}

	fn build(&self, name: &str, section: &Value) -> Result<Arc<dyn Handler>> {
		let dict = ConfigDict::from_value(section)?;

		let class = dict.get_str("class").ok_or(Error::MissingField("class"))?;
		let constructor = self
			.registry
			.handlers()
			.get_constructor(class)
			.ok_or_else(|| Error::UnknownHandlerClass(class.to_string()))?;

		let mut section = dict.as_map().clone();
		if dict.get_str("name").is_none() {
			section.insert("name".to_string(), Value::from(name));
		}

		let mut handler = constructor();
		handler.load_config(&ConfigDict::new(&section), self.registry)?;
		debug!("configured handler {} ({})", name, class);

		Ok(Arc::from(handler.into_handler()))
	}
}

/// Load a JSON document against the process-wide registry.
pub fn load_json_config(json: &[u8]) -> Result<Topology> {
	Loader::new(Registry::global()).load_json(json)
}

pub fn load_json_config_file(path: impl AsRef<Path>) -> Result<Topology> {
	Loader::new(Registry::global()).load_file(path)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::{Level, NullHandler, Record, StreamHandler};

	#[test]
	fn test_empty_document() {
		let topology = Loader::new(&Registry::new()).load_str("{}").unwrap();
		assert!(topology.is_empty());
	}

	#[test]
	fn test_other_sections_are_ignored() {
		let topology = Loader::new(&Registry::new())
			.load_str(
				r#"{
					"disableExistingLoggers": true,
					"handlers": { "null": { "class": "NullHandler", "level": "DEBUG" } },
					"loggers": { "app": { "level": "DEBUG", "handlers": ["null"] } }
				}"#,
			)
			.unwrap();

		let null = topology.get_handler("null").unwrap();
		assert!(null.as_any().is::<NullHandler>());
	}

	#[test]
	fn test_name_defaults_to_instance_key() {
		let registry = Registry::new();
		let config: LoggingConfig = serde_json::from_value(json!({
			"handlers": {
				"console": {"class": "StreamHandler", "level": "INFO"},
				"named": {"class": "StreamHandler", "name": "explicit"},
				"numbered": {"class": "StreamHandler", "name": 42}
			}
		}))
		.unwrap();

		let topology = Loader::new(&registry).load(&config).unwrap();
		assert_eq!(topology.get_handler("console").unwrap().name(), "console");
		assert_eq!(topology.get_handler("named").unwrap().name(), "explicit");
		assert_eq!(topology.get_handler("numbered").unwrap().name(), "numbered");
	}

	#[test]
	fn test_handlers_keep_document_order() {
		let topology = Loader::new(&Registry::new())
			.load_str(r#"{"handlers": {"z": {"class": "NullHandler"}, "a": {"class": "NullHandler"}}}"#)
			.unwrap();
		assert_eq!(topology.names().collect::<Vec<_>>(), vec!["z", "a"]);
	}

	#[test]
	fn test_unknown_class() {
		let err = Loader::new(&Registry::new())
			.load_str(r#"{"handlers": {"sys": {"class": "SyslogHandler"}}}"#)
			.err()
			.unwrap();
		assert_eq!(err.to_string(), "handler `sys`: unknown handler class: SyslogHandler");
	}

	#[test]
	fn test_missing_class() {
		let err = Loader::new(&Registry::new()).load_str(r#"{"handlers": {"x": {"level": "INFO"}}}"#).err().unwrap();
		assert!(matches!(err.root(), Error::MissingField("class")));
	}

	#[test]
	fn test_section_must_be_object() {
		let err = Loader::new(&Registry::new()).load_str(r#"{"handlers": {"x": "StreamHandler"}}"#).err().unwrap();
		assert!(matches!(err.root(), Error::InvalidConfig(_)));
	}

	#[test]
	fn test_malformed_json() {
		let err = Loader::new(&Registry::new()).load_str(r#"{"handlers": "#).err().unwrap();
		assert!(matches!(err, Error::Parse(_)));
	}

	#[test]
	fn test_custom_registry() {
		let registry = Registry::empty();
		registry.handlers().register_constructor("Console", || Box::new(StreamHandler::new().discard()));
		registry.formatters().register("plain", Arc::new(crate::TextFormatter::default()));

		let topology = Loader::new(&registry)
			.load_str(r#"{"handlers": {"c": {"class": "Console", "formatter": "plain", "level": "WARN"}}}"#)
			.unwrap();
		let handler = topology.get_handler("c").unwrap();
		assert_eq!(handler.level(), Level::WARNING);
		assert!(handler.filter(&Record::new(Level::INFO, "", "x")));

		// the built-in classes are not part of an empty registry
		let err = Loader::new(&registry).load_str(r#"{"handlers": {"n": {"class": "NullHandler"}}}"#).err().unwrap();
		assert!(matches!(err.root(), Error::UnknownHandlerClass(_)));
	}
}
