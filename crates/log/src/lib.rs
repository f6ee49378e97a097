// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Configurable log handlers for ReifyDB.
//!
//! A handler receives [`Record`]s, decides whether to keep them and writes a
//! formatted line to its destination. Handlers are built from a declarative
//! document by class name:
//!
//! ```text
//! JSON document
//!     → Loader (one instance per "handlers" entry)
//!     → HandlerRegistry (class name → constructor)
//!     → Configurable::load_config (formatter / level lookup via Registry)
//!     → Topology (named, configured handlers)
//! ```
//!
//! New handler classes are added with [`HandlerRegistry::register_constructor`]
//! before the first document is loaded.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use builder::LoggingBuilder;
pub use config::ConfigDict;
pub use error::{Error, Result};
pub use format::{
	FormatError, Formatter, FormatterRegistry, JsonFormatter, TerminalFormatter, TextFormatter,
};
pub use handler::{
	Configurable, ConfigurableHandler, FileHandler, Handler, NullHandler, StreamHandler,
};
pub use level::{Level, LevelRegistry};
pub use loader::{Loader, LoggingConfig, load_json_config, load_json_config_file};
pub use record::Record;
pub use registry::{Constructor, HandlerRegistry, Registry};
pub use topology::Topology;

mod builder;
pub mod config;
mod error;
pub mod format;
pub mod handler;
pub mod level;
pub mod loader;
mod record;
pub mod registry;
mod topology;
