// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub use buffer::{SharedBuffer, TrickleWriter};
pub use tempdir::temp_dir;

mod buffer;
pub mod tempdir;
