// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, IsTerminal};

use colored::Colorize;

use crate::{
	Level, Record,
	format::{DEFAULT_TIME_FORMAT, FormatError, Formatter, write_fields, write_time},
};

/// Human-oriented formatter with the level coloured by severity.
///
/// `colored` only looks at stdout when deciding whether to colour, while this
/// formatter usually feeds stderr. [`TerminalFormatter::new`] therefore enables
/// colour only when stderr is a terminal; `colored`'s `NO_COLOR` and
/// `CLICOLOR` handling still applies on top. Use
/// [`TerminalFormatter::with_color`] when the handler writes elsewhere.
#[derive(Debug, Clone)]
pub struct TerminalFormatter {
	time_format: String,
	color: bool,
}

impl TerminalFormatter {
	pub fn new() -> Self {
		Self {
			time_format: DEFAULT_TIME_FORMAT.to_string(),
			color: io::stderr().is_terminal(),
		}
	}

	pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
		self.time_format = time_format.into();
		self
	}

	pub fn with_color(mut self, color: bool) -> Self {
		self.color = color;
		self
	}

	fn paint_level(&self, level: Level) -> String {
		let padded = format!("{:<8}", level);
		if !self.color {
			return padded;
		}
		let painted = match level {
			l if l >= Level::CRITICAL => padded.red().bold(),
			l if l >= Level::ERROR => padded.red(),
			l if l >= Level::WARNING => padded.yellow(),
			l if l >= Level::INFO => padded.green(),
			_ => padded.blue(),
		};
		painted.to_string()
	}
}

impl Default for TerminalFormatter {
	fn default() -> Self {
		Self::new()
	}
}

impl Formatter for TerminalFormatter {
	fn format(&self, record: &Record) -> Result<String, FormatError> {
		let mut time = String::new();
		let time_error = write_time(&mut time, record, &self.time_format).err();
		if self.color {
			time = time.dimmed().to_string();
		}

		let mut line = format!("{} {}", time, self.paint_level(record.level));
		if !record.name.is_empty() {
			let name = format!("{}:", record.name);
			line.push(' ');
			line.push_str(&if self.color { name.bold().to_string() } else { name });
		}
		line.push(' ');
		line.push_str(&record.message);
		write_fields(&mut line, record);

		match time_error {
			None => Ok(line),
			Some(reason) => Err(FormatError::new(reason, line)),
		}
	}
}
