// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	Record, Result,
	format::{DEFAULT_TIME_FORMAT, FormatError, Formatter, template::Template, write_fields},
};

pub const DEFAULT_TEMPLATE: &str = "{time} {level} {message}";

/// Plain-text formatter driven by a `{placeholder}` template.
///
/// Record fields are appended as ` key=value` unless the template places them
/// itself through `{fields}` or `{fields.<key>}`.
#[derive(Debug, Clone)]
pub struct TextFormatter {
	template: Template,
	time_format: String,
}

impl TextFormatter {
	pub fn with_template(template: &str) -> Result<Self> {
		Ok(Self {
			template: Template::parse(template)?,
			time_format: DEFAULT_TIME_FORMAT.to_string(),
		})
	}

	/// strftime-style pattern used for `{time}`
	pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
		self.time_format = time_format.into();
		self
	}
}

impl Default for TextFormatter {
	fn default() -> Self {
		Self {
			template: Template::parse(DEFAULT_TEMPLATE).expect("default template is valid"),
			time_format: DEFAULT_TIME_FORMAT.to_string(),
		}
	}
}

impl Formatter for TextFormatter {
	fn format(&self, record: &Record) -> std::result::Result<String, FormatError> {
		let appends_fields = !self.template.renders_fields();
		match self.template.render(record, &self.time_format) {
			Ok(mut line) => {
				if appends_fields {
					write_fields(&mut line, record);
				}
				Ok(line)
			}
			Err(mut err) => {
				if appends_fields {
					write_fields(&mut err.partial, record);
				}
				Err(err)
			}
		}
	}
}
