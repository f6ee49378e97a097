// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `{placeholder}` templates for the text formatter.

use std::fmt::Write;

use crate::{
	Error, Record, Result,
	format::{FormatError, write_fields, write_time, write_value},
};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
	Literal(String),
	Time,
	Level,
	Name,
	Message,
	Fields,
	File,
	Line,
	Thread,
	Field(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Template {
	segments: Vec<Segment>,
}

impl Template {
	/// Parse a template. `{{` and `}}` escape literal braces.
	pub(crate) fn parse(source: &str) -> Result<Self> {
		let mut segments = Vec::new();
		let mut literal = String::new();
		let mut chars = source.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'{' if chars.peek() == Some(&'{') => {
					chars.next();
					literal.push('{');
				}
				'}' if chars.peek() == Some(&'}') => {
					chars.next();
					literal.push('}');
				}
				'{' => {
					let mut name = String::new();
					loop {
						match chars.next() {
							Some('}') => break,
							Some(c) => name.push(c),
							None => {
								return Err(Error::InvalidTemplate(format!(
									"unterminated placeholder `{{{}`",
									name
								)));
							}
						}
					}
					if !literal.is_empty() {
						segments.push(Segment::Literal(std::mem::take(&mut literal)));
					}
					segments.push(placeholder(&name)?);
				}
				'}' => return Err(Error::InvalidTemplate("unmatched `}`".to_string())),
				c => literal.push(c),
			}
		}

		if !literal.is_empty() {
			segments.push(Segment::Literal(literal));
		}

		Ok(Self {
			segments,
		})
	}

	/// Whether the template places record fields itself.
	pub(crate) fn renders_fields(&self) -> bool {
		self.segments.iter().any(|s| matches!(s, Segment::Fields | Segment::Field(_)))
	}

	/// Render a record. A `{fields.<key>}` placeholder whose key is missing,
	/// or a `{time}` that cannot be rendered with `time_format`, renders empty
	/// and turns the result into an error carrying the line.
	pub(crate) fn render(&self, record: &Record, time_format: &str) -> std::result::Result<String, FormatError> {
		let mut out = String::new();
		let mut missing = Vec::new();
		let mut problems = Vec::new();

		for segment in &self.segments {
			match segment {
				Segment::Literal(s) => out.push_str(s),
				Segment::Time => {
					if let Err(reason) = write_time(&mut out, record, time_format) {
						problems.push(reason);
					}
				}
				Segment::Level => {
					let _ = write!(out, "{}", record.level);
				}
				Segment::Name => out.push_str(&record.name),
				Segment::Message => out.push_str(&record.message),
				Segment::Fields => write_fields(&mut out, record),
				Segment::File => out.push_str(record.file.as_deref().unwrap_or("")),
				Segment::Line => {
					if let Some(line) = record.line {
						let _ = write!(out, "{}", line);
					}
				}
				Segment::Thread => out.push_str(&record.thread),
				Segment::Field(key) => match record.fields.get(key) {
					Some(value) => write_value(&mut out, value),
					None => missing.push(key.as_str()),
				},
			}
		}

		if !missing.is_empty() {
			problems.push(format!("record has no field `{}`", missing.join("`, `")));
		}

		if problems.is_empty() {
			Ok(out)
		} else {
			Err(FormatError::new(problems.join("; "), out))
		}
	}
}

fn placeholder(name: &str) -> Result<Segment> {
	let segment = match name {
		"time" => Segment::Time,
		"level" => Segment::Level,
		"name" => Segment::Name,
		"message" => Segment::Message,
		"fields" => Segment::Fields,
		"file" => Segment::File,
		"line" => Segment::Line,
		"thread" => Segment::Thread,
		other => match other.strip_prefix("fields.") {
			Some(key) if !key.is_empty() => Segment::Field(key.to_string()),
			_ => return Err(Error::InvalidTemplate(format!("unknown placeholder `{{{}}}`", other))),
		},
	};
	Ok(segment)
}
