// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	io::{self, Write},
	sync::Arc,
};

use parking_lot::Mutex;

use crate::{
	ConfigDict, Error, Formatter, Level, Record, Registry, Result, TerminalFormatter,
	handler::{Configurable, Handler, below, render, resolve_formatter, resolve_level, write_line},
};

/// Writes formatted records to a stream, stderr by default.
///
/// The stream is not closed by this handler: its lifetime belongs to the
/// caller, since stdout and stderr must outlive any handler using them.
pub struct StreamHandler {
	name: String,
	level: Level,
	formatter: Arc<dyn Formatter>,
	out: Mutex<Box<dyn Write + Send>>,
}

impl StreamHandler {
	pub fn new() -> Self {
		Self {
			name: String::new(),
			level: Level::NOTHING,
			formatter: Arc::new(TerminalFormatter::default()),
			out: Mutex::new(Box::new(io::stderr())),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
		self.formatter = formatter;
		self
	}

	pub fn with_output<W: Write + Send + 'static>(mut self, out: W) -> Self {
		self.out = Mutex::new(Box::new(out));
		self
	}

	/// Drop all output; for benchmarks.
	pub fn discard(self) -> Self {
		self.with_output(io::sink())
	}

	pub fn formatter(&self) -> &Arc<dyn Formatter> {
		&self.formatter
	}
}

impl Default for StreamHandler {
	fn default() -> Self {
		Self::new()
	}
}

impl Configurable for StreamHandler {
	fn load_config(&mut self, config: &ConfigDict<'_>, registry: &Registry) -> Result<()> {
		self.name = config.must_get_string("name", "");
		self.level = resolve_level(config, registry);
		self.formatter = resolve_formatter(config, registry, "terminal")?;

		match config.get_str("stream") {
			None => {}
			Some("stderr") => *self.out.get_mut() = Box::new(io::stderr()),
			Some("stdout") => *self.out.get_mut() = Box::new(io::stdout()),
			Some(other) => {
				return Err(Error::InvalidValue {
					field: "stream",
					value: other.to_string(),
				});
			}
		}

		Ok(())
	}
}

impl Handler for StreamHandler {
	fn name(&self) -> &str {
		&self.name
	}

	fn level(&self) -> Level {
		self.level
	}

	fn filter(&self, record: &Record) -> bool {
		below(record, self.level)
	}

	fn emit(&self, record: &Record) {
		let line = render(self.formatter.as_ref(), record);
		let mut out = self.out.lock();
		if let Err(err) = write_line(&mut **out, line) {
			eprintln!("Write record to stream failed, [{}]", err);
		}
	}

	fn close(&self) -> Result<()> {
		self.out.lock().flush()?;
		Ok(())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use reifydb_testing::SharedBuffer;
	use serde_json::json;

	use super::*;
	use crate::{FormatError, TextFormatter};

	fn configured(value: serde_json::Value, buffer: &SharedBuffer) -> StreamHandler {
		let mut handler = StreamHandler::new().with_output(buffer.clone());
		let config = ConfigDict::from_value(&value).unwrap();
		handler.load_config(&config, &Registry::new()).unwrap();
		handler
	}

	#[test]
	fn test_empty_config_defaults() {
		let registry = Registry::new();
		let mut handler = StreamHandler::new().discard();
		let value = json!({});
		handler.load_config(&ConfigDict::from_value(&value).unwrap(), &registry).unwrap();

		assert_eq!(handler.name(), "");
		assert_eq!(handler.level(), Level::NOTHING);
		let terminal = registry.formatters().get_formatter("terminal").unwrap();
		assert!(Arc::ptr_eq(handler.formatter(), &terminal));
		assert!(handler.filter(&Record::new(Level::CRITICAL, "", "x")));
	}

	#[test]
	fn test_debug_level_keeps_debug_records() {
		let buffer = SharedBuffer::new();
		let handler = configured(json!({"level": "DEBUG", "formatter": "default"}), &buffer);

		assert!(!handler.filter(&Record::new(Level::DEBUG, "", "x")));
		handler.handle(&Record::new(Level::DEBUG, "", "visible"));
		assert!(buffer.contents().contains("DEBUG visible"));
	}

	#[test]
	fn test_record_at_threshold_is_kept() {
		let handler = StreamHandler::new().discard().with_level(Level::WARNING);
		assert!(handler.filter(&Record::new(Level::INFO, "", "x")));
		assert!(!handler.filter(&Record::new(Level::WARNING, "", "x")));
		assert!(!handler.filter(&Record::new(Level::ERROR, "", "x")));
	}

	#[test]
	fn test_filtered_record_writes_nothing() {
		let buffer = SharedBuffer::new();
		let handler = configured(json!({"level": "ERROR", "formatter": "default"}), &buffer);
		handler.handle(&Record::new(Level::WARNING, "", "hidden"));
		assert!(buffer.contents().is_empty());
	}

	#[test]
	fn test_unknown_formatter() {
		let mut handler = StreamHandler::new().discard();
		let value = json!({"formatter": "fancy"});
		let err = handler.load_config(&ConfigDict::from_value(&value).unwrap(), &Registry::new()).unwrap_err();
		assert_eq!(err.to_string(), "unknown formatter: fancy");
	}

	#[test]
	fn test_invalid_stream() {
		let mut handler = StreamHandler::new();
		let value = json!({"stream": "stdlog"});
		let err = handler.load_config(&ConfigDict::from_value(&value).unwrap(), &Registry::new()).unwrap_err();
		assert_eq!(err.to_string(), "invalid value `stdlog` for field `stream`");
	}

	#[test]
	fn test_format_failure_still_emits_partial_line() {
		struct Broken;

		impl Formatter for Broken {
			fn format(&self, _record: &Record) -> std::result::Result<String, FormatError> {
				Err(FormatError::new("broken", ""))
			}
		}

		let buffer = SharedBuffer::new();
		let handler = StreamHandler::new()
			.with_output(buffer.clone())
			.with_level(Level::DEBUG)
			.with_formatter(Arc::new(Broken));

		handler.handle(&Record::new(Level::INFO, "", "first"));
		handler.handle(&Record::new(Level::INFO, "", "second"));
		assert_eq!(buffer.contents(), "\n\n");
	}

	#[test]
	fn test_each_emit_is_one_line() {
		let buffer = SharedBuffer::new();
		let formatter = Arc::new(TextFormatter::with_template("{level} {message}").unwrap());
		let handler =
			StreamHandler::new().with_output(buffer.clone()).with_level(Level::INFO).with_formatter(formatter);

		handler.emit(&Record::new(Level::INFO, "", "one"));
		handler.emit(&Record::new(Level::ERROR, "", "two"));
		assert_eq!(buffer.contents(), "INFO one\nERROR two\n");
	}

	#[test]
	fn test_close_is_repeatable() {
		let handler = StreamHandler::new().discard();
		assert!(handler.close().is_ok());
		assert!(handler.close().is_ok());
	}
}
