// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory sinks for asserting on handler output.

use std::{
	io::{self, Write},
	sync::Arc,
	thread,
};

use parking_lot::Mutex;

/// Cloneable in-memory sink; every clone writes to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
	inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bytes(&self) -> Vec<u8> {
		self.inner.lock().clone()
	}

	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.inner.lock()).into_owned()
	}

	pub fn clear(&self) {
		self.inner.lock().clear();
	}
}

impl Write for SharedBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.inner.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Accepts a single byte per `write` call and yields the thread afterwards,
/// so that unsynchronised writers interleave as much as possible.
#[derive(Debug, Clone)]
pub struct TrickleWriter<W> {
	inner: W,
}

impl<W: Write> TrickleWriter<W> {
	pub fn new(inner: W) -> Self {
		Self {
			inner,
		}
	}
}

impl<W: Write> Write for TrickleWriter<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		if buf.is_empty() {
			return Ok(0);
		}
		let written = self.inner.write(&buf[..1])?;
		thread::yield_now();
		Ok(written)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.inner.flush()
	}
}
