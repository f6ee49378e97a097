// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::{Handler, Record, Result};

/// The configured handlers of one load, by instance name.
#[derive(Default, Clone)]
pub struct Topology {
	handlers: IndexMap<String, Arc<dyn Handler>>,
}

impl Topology {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a handler, replacing and returning any handler of the same name.
	pub fn insert(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> Option<Arc<dyn Handler>> {
		self.handlers.insert(name.into(), handler)
	}

	pub fn get_handler(&self, name: &str) -> Option<Arc<dyn Handler>> {
		self.handlers.get(name).cloned()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.handlers.keys().map(String::as_str)
	}

	pub fn handlers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Handler>)> {
		self.handlers.iter().map(|(name, handler)| (name.as_str(), handler))
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Pass a record to every handler; each one filters independently.
	pub fn handle(&self, record: &Record) {
		for handler in self.handlers.values() {
			handler.handle(record);
		}
	}

	/// Close every handler, even when one of them fails. Returns the first
	/// error.
	pub fn close(&self) -> Result<()> {
		let mut result = Ok(());
		for (name, handler) in &self.handlers {
			debug!("closing handler {}", name);
			if let Err(err) = handler.close() {
				if result.is_ok() {
					result = Err(err.in_handler(name.as_str()));
				}
			}
		}
		result
	}
}
