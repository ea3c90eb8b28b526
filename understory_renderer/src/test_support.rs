// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::vec::Vec;

use crate::{RecycleBindings, ViewData, ViewHolder};

/// A bare snapshot: a row count plus a tag that makes otherwise equal counts differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Rows {
    pub(crate) count: usize,
    pub(crate) tag: u32,
}

impl Rows {
    pub(crate) fn new(count: usize) -> Self {
        Self { count, tag: 0 }
    }

    pub(crate) fn tagged(count: usize, tag: u32) -> Self {
        Self { count, tag }
    }
}

impl ViewData for Rows {
    fn count(&self) -> usize {
        self.count
    }
}

/// A holder that logs what was bound into it and what was recycled from it.
#[derive(Debug, Default)]
pub(crate) struct TestHolder {
    pub(crate) bindings: RecycleBindings,
    /// `(label, content, index)` per bind.
    pub(crate) bound: Vec<(&'static str, u32, usize)>,
    /// Label per recycle.
    pub(crate) recycled: Vec<&'static str>,
}

impl ViewHolder for TestHolder {
    fn recycle_bindings(&mut self) -> &mut RecycleBindings {
        &mut self.bindings
    }
}
