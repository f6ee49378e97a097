// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Name-keyed construction of handlers.
//!
//! Registration happens during start-up; afterwards the registries are only
//! read, from any number of threads. Keys form one flat namespace and the
//! last registration for a key wins.

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::{
	FileHandler, FormatterRegistry, LevelRegistry, NullHandler, StreamHandler, handler::ConfigurableHandler,
};

/// Produces a fresh, unconfigured handler.
pub type Constructor = Arc<dyn Fn() -> Box<dyn ConfigurableHandler> + Send + Sync>;

pub struct HandlerRegistry {
	constructors: RwLock<HashMap<String, Constructor>>,
}

impl HandlerRegistry {
	/// A registry with `NullHandler`, `StreamHandler` and `FileHandler`.
	pub fn new() -> Self {
		let registry = Self::empty();
		registry.register_constructor("NullHandler", || Box::new(NullHandler::new()));
		registry.register_constructor("StreamHandler", || Box::new(StreamHandler::new()));
		registry.register_constructor("FileHandler", || Box::new(FileHandler::new()));
		registry
	}

	pub fn empty() -> Self {
		Self {
			constructors: RwLock::new(HashMap::new()),
		}
	}

	pub fn register_constructor<F>(&self, name: impl Into<String>, constructor: F)
	where
		F: Fn() -> Box<dyn ConfigurableHandler> + Send + Sync + 'static,
	{
		self.constructors.write().insert(name.into(), Arc::new(constructor));
	}

	/// `None` when nothing is registered under `name`; reporting that is up to
	/// the caller.
	pub fn get_constructor(&self, name: &str) -> Option<Constructor> {
		self.constructors.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.constructors.read().contains_key(name)
	}
}

impl Default for HandlerRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Everything a handler may look up while it is configured.
pub struct Registry {
	handlers: HandlerRegistry,
	formatters: FormatterRegistry,
	levels: LevelRegistry,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

impl Registry {
	/// A registry with the built-in handler classes, formatters and levels.
	pub fn new() -> Self {
		Self {
			handlers: HandlerRegistry::new(),
			formatters: FormatterRegistry::new(),
			levels: LevelRegistry::new(),
		}
	}

	/// Built-in levels only; no handler classes, no formatters.
	pub fn empty() -> Self {
		Self {
			handlers: HandlerRegistry::empty(),
			formatters: FormatterRegistry::empty(),
			levels: LevelRegistry::new(),
		}
	}

	/// The process-wide registry, created with the built-ins on first use.
	pub fn global() -> &'static Registry {
		&GLOBAL
	}

	pub fn handlers(&self) -> &HandlerRegistry {
		&self.handlers
	}

	pub fn formatters(&self) -> &FormatterRegistry {
		&self.formatters
	}

	pub fn levels(&self) -> &LevelRegistry {
		&self.levels
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}
