// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builder pattern for assembling handlers without a configuration document

use std::{path::PathBuf, sync::Arc};

use tracing::warn;

use crate::{FileHandler, Handler, Level, Registry, Result, StreamHandler, Topology};

enum Pending {
	Ready(Arc<dyn Handler>),
	File {
		path: PathBuf,
		level: Level,
	},
}

pub struct LoggingBuilder {
	handlers: Vec<(String, Pending)>,
}

impl LoggingBuilder {
	pub fn new() -> Self {
		Self {
			handlers: Vec::new(),
		}
	}

	/// Add an already configured handler
	pub fn with_handler(mut self, name: impl Into<String>, handler: impl Handler + 'static) -> Self {
		self.handlers.push((name.into(), Pending::Ready(Arc::new(handler))));
		self
	}

	/// Add a stderr handler with the terminal formatter
	pub fn with_console(self, level: Level) -> Self {
		self.with_handler("console", StreamHandler::new().with_name("console").with_level(level))
	}

	/// Add a file handler; the file is opened by [`LoggingBuilder::build`]
	pub fn with_file(mut self, name: impl Into<String>, path: impl Into<PathBuf>, level: Level) -> Self {
		self.handlers.push((
			name.into(),
			Pending::File {
				path: path.into(),
				level,
			},
		));
		self
	}

	/// Open pending files and assemble the topology. Fails, closing anything
	/// already opened, if a file cannot be opened.
	pub fn build(self) -> Result<Topology> {
		let formatter = Registry::global().formatters().get_formatter("default");
		let mut topology = Topology::new();

		for (name, pending) in self.handlers {
			let handler: Arc<dyn Handler> = match pending {
				Pending::Ready(handler) => handler,
				Pending::File {
					path,
					level,
				} => match FileHandler::open(&path) {
					Ok(handler) => {
						let handler = handler.with_name(name.as_str()).with_level(level);
						match &formatter {
							Some(formatter) => Arc::new(handler.with_formatter(formatter.clone())),
							None => Arc::new(handler),
						}
					}
					Err(err) => {
						if let Err(close) = topology.close() {
							warn!("closing handlers after a failed build: {}", close);
						}
						return Err(err.in_handler(name));
					}
				},
			};
			topology.insert(name, handler);
		}

		Ok(topology)
	}
}

impl Default for LoggingBuilder {
	fn default() -> Self {
		Self::new()
	}
}
