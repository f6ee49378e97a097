// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("malformed logging configuration: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("invalid logging configuration: {0}")]
	InvalidConfig(String),

	#[error("unknown handler class: {0}")]
	UnknownHandlerClass(String),

	#[error("unknown formatter: {0}")]
	UnknownFormatter(String),

	#[error("missing required field `{0}`")]
	MissingField(&'static str),

	#[error("invalid value `{value}` for field `{field}`")]
	InvalidValue {
		field: &'static str,
		value: String,
	},

	#[error("invalid format template: {0}")]
	InvalidTemplate(String),

	#[error("can not open log file {}: {source}", path.display())]
	OpenFile {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("handler `{name}`: {source}")]
	Handler {
		name: String,
		#[source]
		source: Box<Error>,
	},
}

impl Error {
	/// Attach the handler instance name to an error raised while building it.
	pub fn in_handler(self, name: impl Into<String>) -> Self {
		Error::Handler {
			name: name.into(),
			source: Box::new(self),
		}
	}

	/// The innermost error, skipping handler context wrappers.
	pub fn root(&self) -> &Error {
		match self {
			Error::Handler {
				source,
				..
			} => source.root(),
			other => other,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_handler_context_message() {
		let err = Error::MissingField("filename").in_handler("audit");
		assert_eq!(err.to_string(), "handler `audit`: missing required field `filename`");
	}

	#[test]
	fn test_root_skips_context() {
		let err = Error::UnknownFormatter("fancy".to_string()).in_handler("inner").in_handler("outer");
		assert!(matches!(err.root(), Error::UnknownFormatter(name) if name == "fancy"));
	}

	#[test]
	fn test_unknown_class_message() {
		let err = Error::UnknownHandlerClass("SyslogHandler".to_string());
		assert_eq!(err.to_string(), "unknown handler class: SyslogHandler");
	}
}
