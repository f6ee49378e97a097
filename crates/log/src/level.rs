// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Severity levels and name lookup.

use std::{collections::HashMap, fmt};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Ordered severity. Lower values are more verbose; [`Level::NOTHING`] is the
/// maximal threshold and suppresses every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub i32);

impl Level {
	pub const DEBUG: Level = Level(10);
	pub const INFO: Level = Level(20);
	pub const WARNING: Level = Level(30);
	pub const ERROR: Level = Level(40);
	pub const CRITICAL: Level = Level(50);
	pub const NOTHING: Level = Level(i32::MAX);

	/// Name of a built-in level, `None` for any other value.
	pub const fn as_str(self) -> Option<&'static str> {
		match self.0 {
			10 => Some("DEBUG"),
			20 => Some("INFO"),
			30 => Some("WARNING"),
			40 => Some("ERROR"),
			50 => Some("CRITICAL"),
			i32::MAX => Some("NOTHING"),
			_ => None,
		}
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.as_str() {
			Some(name) => f.pad(name),
			None => f.pad(&format!("LEVEL({})", self.0)),
		}
	}
}

const BUILTIN: &[(&str, Level)] = &[
	("DEBUG", Level::DEBUG),
	("INFO", Level::INFO),
	("WARNING", Level::WARNING),
	("WARN", Level::WARNING),
	("ERROR", Level::ERROR),
	("CRITICAL", Level::CRITICAL),
	("FATAL", Level::CRITICAL),
	("NOTHING", Level::NOTHING),
];

/// Symbolic level names. Lookups are case-insensitive.
pub struct LevelRegistry {
	levels: RwLock<HashMap<String, Level>>,
}

impl LevelRegistry {
	pub fn new() -> Self {
		let levels = BUILTIN.iter().map(|(name, level)| (name.to_string(), *level)).collect();
		Self {
			levels: RwLock::new(levels),
		}
	}

	/// Register a custom level name, replacing any previous mapping.
	pub fn add_level(&self, name: &str, level: Level) {
		self.levels.write().insert(name.to_ascii_uppercase(), level);
	}

	pub fn find(&self, name: &str) -> Option<Level> {
		self.levels.read().get(&name.to_ascii_uppercase()).copied()
	}

	/// Resolve a level name. Unknown names fall back to [`Level::NOTHING`], so a
	/// misspelt level silences the handler instead of failing the load.
	pub fn get_level_by_name(&self, name: &str) -> Level {
		match self.find(name) {
			Some(level) => level,
			None => {
				warn!("unknown level name `{}`, defaulting to NOTHING", name);
				Level::NOTHING
			}
		}
	}
}

impl Default for LevelRegistry {
	fn default() -> Self {
		Self::new()
	}
}
