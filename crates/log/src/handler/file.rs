// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	fs::{File, OpenOptions},
	io::Write,
	mem,
	path::{Path, PathBuf},
	sync::Arc,
};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
	ConfigDict, Error, Formatter, Level, Record, Registry, Result, TextFormatter,
	handler::{Configurable, Handler, below, render, resolve_formatter, resolve_level, write_line},
};

enum Output {
	Unconfigured,
	Open(File),
	Closed,
}

/// Appends formatted records to a file it owns.
///
/// The file is opened while the handler is configured, so
/// [`Configurable::load_config`] performs I/O for this handler.
///
/// # Panics
///
/// [`Handler::handle`] and [`Handler::emit`] panic when called before a file
/// was configured. Records handled after [`Handler::close`] are dropped.
pub struct FileHandler {
	name: String,
	level: Level,
	formatter: Arc<dyn Formatter>,
	path: Option<PathBuf>,
	out: Mutex<Output>,
}

impl FileHandler {
	pub fn new() -> Self {
		Self {
			name: String::new(),
			level: Level::NOTHING,
			formatter: Arc::new(TextFormatter::default()),
			path: None,
			out: Mutex::new(Output::Unconfigured),
		}
	}

	/// A handler appending to `path`, creating the file if needed.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let mut handler = Self::new();
		handler.open_file(path.as_ref())?;
		Ok(handler)
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
		self.formatter = formatter;
		self
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn formatter(&self) -> &Arc<dyn Formatter> {
		&self.formatter
	}

	pub fn is_closed(&self) -> bool {
		matches!(*self.out.lock(), Output::Closed)
	}

	fn open_file(&mut self, path: &Path) -> Result<()> {
		let file = open_append(path).map_err(|source| Error::OpenFile {
			path: path.to_path_buf(),
			source,
		})?;
		debug!("opened log file {}", path.display());

		self.path = Some(path.to_path_buf());
		*self.out.get_mut() = Output::Open(file);
		Ok(())
	}

	fn ensure_configured(&self) {
		if self.path.is_none() {
			panic!("FileHandler `{}` used before an output file was configured", self.name);
		}
	}
}

impl Default for FileHandler {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(unix)]
fn open_append(path: &Path) -> std::io::Result<File> {
	use std::os::unix::fs::OpenOptionsExt;

	OpenOptions::new().append(true).create(true).mode(0o660).open(path)
}

#[cfg(not(unix))]
fn open_append(path: &Path) -> std::io::Result<File> {
	OpenOptions::new().append(true).create(true).open(path)
}

impl Configurable for FileHandler {
	fn load_config(&mut self, config: &ConfigDict<'_>, registry: &Registry) -> Result<()> {
		self.name = config.must_get_string("name", "");

		let path = config.must_get_string("filename", "");
		if path.is_empty() {
			return Err(Error::MissingField("filename"));
		}

		self.level = resolve_level(config, registry);
		self.formatter = resolve_formatter(config, registry, "default")?;

		self.open_file(Path::new(&path))
	}
}

impl Handler for FileHandler {
	fn name(&self) -> &str {
		&self.name
	}

	fn level(&self) -> Level {
		self.level
	}

	fn filter(&self, record: &Record) -> bool {
		below(record, self.level)
	}

	fn emit(&self, record: &Record) {
		self.ensure_configured();

		let line = render(self.formatter.as_ref(), record);
		let mut out = self.out.lock();
		if let Output::Open(file) = &mut *out {
			if let Err(err) = write_line(file, line) {
				let path = self.path.as_deref().unwrap_or(Path::new(""));
				eprintln!("Write record to {} failed, [{}]", path.display(), err);
			}
		}
	}

	fn handle(&self, record: &Record) {
		self.ensure_configured();

		if !self.filter(record) {
			self.emit(record);
		}
	}

	fn close(&self) -> Result<()> {
		let previous = mem::replace(&mut *self.out.lock(), Output::Closed);
		if let Output::Open(mut file) = previous {
			file.flush()?;
			debug!("closed log file {}", self.path.as_deref().unwrap_or(Path::new("")).display());
		}
		Ok(())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
