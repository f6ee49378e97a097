// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Rendering records into display strings.
//!
//! Formatters are process-wide and shared: handlers hold an `Arc` to the
//! formatter they resolved by name and never own it.

use std::{collections::HashMap, fmt::Write, sync::Arc};

use parking_lot::RwLock;
use serde_json::Value;

use crate::Record;

mod json;
mod template;
mod terminal;
mod text;

pub use json::JsonFormatter;
pub use terminal::TerminalFormatter;
pub use text::TextFormatter;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub trait Formatter: Send + Sync {
	fn format(&self, record: &Record) -> Result<String, FormatError>;
}

/// A record could not be rendered completely. `partial` holds whatever was
/// produced and is still emitted by the handler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason}")]
pub struct FormatError {
	pub reason: String,
	pub partial: String,
}

impl FormatError {
	pub fn new(reason: impl Into<String>, partial: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
			partial: partial.into(),
		}
	}
}

/// Formatters by name.
pub struct FormatterRegistry {
	formatters: RwLock<HashMap<String, Arc<dyn Formatter>>>,
}

impl FormatterRegistry {
	/// A registry holding the built-in `default`, `terminal` and `json` formatters.
	pub fn new() -> Self {
		let registry = Self::empty();
		registry.register("default", Arc::new(TextFormatter::default()));
		registry.register("terminal", Arc::new(TerminalFormatter::default()));
		registry.register("json", Arc::new(JsonFormatter::default()));
		registry
	}

	pub fn empty() -> Self {
		Self {
			formatters: RwLock::new(HashMap::new()),
		}
	}

	/// Last registration for a name wins.
	pub fn register(&self, name: impl Into<String>, formatter: Arc<dyn Formatter>) {
		self.formatters.write().insert(name.into(), formatter);
	}

	pub fn get_formatter(&self, name: &str) -> Option<Arc<dyn Formatter>> {
		self.formatters.read().get(name).cloned()
	}
}

impl Default for FormatterRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Appends ` key=value` for every field; strings are written unquoted.
pub(crate) fn write_fields(out: &mut String, record: &Record) {
	for (key, value) in &record.fields {
		out.push(' ');
		out.push_str(key);
		out.push('=');
		write_value(out, value);
	}
}

/// Append the record time. An invalid strftime pattern writes nothing and is
/// reported as the error.
pub(crate) fn write_time(out: &mut String, record: &Record, time_format: &str) -> Result<(), String> {
	let mut time = String::new();
	match write!(time, "{}", record.time.format(time_format)) {
		Ok(()) => {
			out.push_str(&time);
			Ok(())
		}
		Err(_) => Err(format!("invalid time format `{}`", time_format)),
	}
}

pub(crate) fn write_value(out: &mut String, value: &Value) {
	match value {
		Value::String(s) => out.push_str(s),
		other => {
			let _ = write!(out, "{}", other);
		}
	}
}
