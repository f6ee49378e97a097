// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Handlers take a record, decide whether to keep it and write a formatted
//! line to their destination.
//!
//! Every handler has two capabilities that are used at different times:
//! [`Configurable`] while the handler is built from a configuration document,
//! [`Handler`] for the rest of its life. Lifecycle:
//!
//! ```text
//! constructor() → load_config() → handle()* → close()
//! ```
//!
//! Each handler instance serialises its own writes. Two instances sharing a
//! destination (two file handlers on one path, or a stream handler and a file
//! handler both on stderr) are not coordinated with each other.

use std::{
	any::Any,
	io::{self, Write},
	sync::Arc,
};

use crate::{ConfigDict, Error, Formatter, Level, Record, Registry, Result};

mod file;
mod null;
mod stream;

pub use file::FileHandler;
pub use null::NullHandler;
pub use stream::StreamHandler;

pub trait Handler: Send + Sync {
	fn name(&self) -> &str;

	/// Threshold below which records are suppressed
	fn level(&self) -> Level;

	/// Returns `true` when the record must be suppressed.
	fn filter(&self, record: &Record) -> bool;

	/// Format and write the record, holding the handler's write lock for the
	/// duration of the write.
	fn emit(&self, record: &Record);

	/// Filter, then emit. Never fails: formatting and write errors are
	/// reported on stderr.
	fn handle(&self, record: &Record) {
		if !self.filter(record) {
			self.emit(record);
		}
	}

	/// Release the destination. Calling it again is a no-op.
	fn close(&self) -> Result<()>;

	fn as_any(&self) -> &dyn Any;
}

pub trait Configurable {
	/// Populate the handler from its section of the configuration document.
	/// Formatter and level names are resolved through `registry`.
	fn load_config(&mut self, config: &ConfigDict<'_>, registry: &Registry) -> Result<()>;
}

/// What a registered constructor produces: a handler that still has to be
/// configured.
pub trait ConfigurableHandler: Handler + Configurable {
	fn into_handler(self: Box<Self>) -> Box<dyn Handler>;
}

impl<T: Handler + Configurable + 'static> ConfigurableHandler for T {
	fn into_handler(self: Box<Self>) -> Box<dyn Handler> {
		self
	}
}

/// Shared threshold test: strictly below the handler level is suppressed.
#[inline]
pub(crate) fn below(record: &Record, level: Level) -> bool {
	record.level < level
}

pub(crate) fn resolve_level(config: &ConfigDict<'_>, registry: &Registry) -> Level {
	registry.levels().get_level_by_name(&config.must_get_string("level", "NOTHING"))
}

pub(crate) fn resolve_formatter(
	config: &ConfigDict<'_>,
	registry: &Registry,
	default: &str,
) -> Result<Arc<dyn Formatter>> {
	let name = config.must_get_string("formatter", default);
	registry.formatters().get_formatter(&name).ok_or(Error::UnknownFormatter(name))
}

/// Format a record. On failure the partial output is used and the reason goes
/// to stderr, never to the handler's own destination.
pub(crate) fn render(formatter: &dyn Formatter, record: &Record) -> String {
	match formatter.format(record) {
		Ok(line) => line,
		Err(err) => {
			eprintln!("Format record failed, [{}]", err);
			err.partial
		}
	}
}

/// Write one line with a single `write_all` so that a line is never split
/// across two lock acquisitions.
pub(crate) fn write_line(out: &mut dyn Write, mut line: String) -> io::Result<()> {
	line.push('\n');
	out.write_all(line.as_bytes())?;
	out.flush()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FormatError;

	struct Broken;

	impl Formatter for Broken {
		fn format(&self, _record: &Record) -> std::result::Result<String, FormatError> {
			Err(FormatError::new("broken", "half"))
		}
	}

	#[test]
	fn test_below_is_strict() {
		let record = Record::new(Level::INFO, "", "x");
		assert!(below(&record, Level::WARNING));
		assert!(!below(&record, Level::INFO));
		assert!(!below(&record, Level::DEBUG));
	}

	#[test]
	fn test_render_falls_back_to_partial() {
		let record = Record::new(Level::INFO, "", "x");
		assert_eq!(render(&Broken, &record), "half");
	}

	#[test]
	fn test_write_line_terminates() {
		let mut out = Vec::new();
		write_line(&mut out, "hello".to_string()).unwrap();
		assert_eq!(out, b"hello\n");
	}

	#[test]
	fn test_resolve_formatter_unknown() {
		let registry = Registry::new();
		let value = serde_json::json!({"formatter": "fancy"});
		let config = ConfigDict::from_value(&value).unwrap();

		let err = resolve_formatter(&config, &registry, "default").err().unwrap();
		assert!(matches!(err, Error::UnknownFormatter(name) if name == "fancy"));
	}
}
