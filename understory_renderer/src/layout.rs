// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf renderers: a fixed layout bound from content, and an empty placeholder.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::updates::push_replacement;
use crate::{Renderer, UpdateAction, ViewData, ViewHolder};

/// Snapshot of a [`LayoutRenderer`]: the content value and its row count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutViewData<T> {
    count: usize,
    content: T,
}

impl<T> LayoutViewData<T> {
    /// The content this snapshot was built from.
    pub fn content(&self) -> &T {
        &self.content
    }
}

impl<T: PartialEq> ViewData for LayoutViewData<T> {
    fn count(&self) -> usize {
        self.count
    }
}

/// Renders content into one layout, repeated over a fixed number of rows.
///
/// Binding calls the bind closure with the holder, the content, and the row index.
pub struct LayoutRenderer<T, H> {
    layout: u32,
    count: usize,
    stable_id: Option<Box<dyn Fn(&T, usize) -> u64>>,
    binder: Box<dyn Fn(&mut H, &T, usize)>,
    recycler: Option<Box<dyn Fn(&mut H)>>,
}

impl<T, H> LayoutRenderer<T, H> {
    /// Creates a single-row renderer for `layout`.
    pub fn new(layout: u32, binder: impl Fn(&mut H, &T, usize) + 'static) -> Self {
        Self {
            layout,
            count: 1,
            stable_id: None,
            binder: Box::new(binder),
            recycler: None,
        }
    }

    /// Sets how many rows each snapshot occupies.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Derives stable row ids from the content.
    #[must_use]
    pub fn with_stable_id(mut self, stable_id: impl Fn(&T, usize) -> u64 + 'static) -> Self {
        self.stable_id = Some(Box::new(stable_id));
        self
    }

    /// Runs `recycler` when a holder bound by this renderer is recycled.
    #[must_use]
    pub fn with_recycle(mut self, recycler: impl Fn(&mut H) + 'static) -> Self {
        self.recycler = Some(Box::new(recycler));
        self
    }
}

impl<T, H> fmt::Debug for LayoutRenderer<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRenderer")
            .field("layout", &self.layout)
            .field("count", &self.count)
            .field("stable_id", &self.stable_id.is_some())
            .field("recycler", &self.recycler.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq, H: ViewHolder> Renderer<T, H> for LayoutRenderer<T, H> {
    type Data = LayoutViewData<T>;

    fn view_data(&self, content: &T) -> Self::Data {
        LayoutViewData {
            count: self.count,
            content: content.clone(),
        }
    }

    fn item_id(&self, data: &Self::Data, index: usize) -> Option<u64> {
        self.stable_id.as_ref().map(|id| id(&data.content, index))
    }

    fn layout_res_id(&self, _data: &Self::Data, _index: usize) -> u32 {
        self.layout
    }

    fn bind(&self, data: &Self::Data, index: usize, holder: &mut H) {
        debug_assert!(
            index < data.count,
            "row {index} out of range for {} rows",
            data.count
        );
        (self.binder)(holder, &data.content, index);
    }

    fn recycle(&self, holder: &mut H) {
        if let Some(recycler) = &self.recycler {
            recycler(holder);
        }
    }

    fn updates(&self, old: &Self::Data, new: &Self::Data) -> Vec<UpdateAction> {
        let mut actions = Vec::new();
        if old != new {
            push_replacement(&mut actions, old.count, new.count);
        }
        actions
    }
}

/// Snapshot of an [`EmptyRenderer`]; it has no rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmptyViewData;

impl ViewData for EmptyViewData {
    fn count(&self) -> usize {
        0
    }
}

/// Renders any content as zero rows, for example a group without a header.
pub struct EmptyRenderer<T> {
    _content: PhantomData<fn(&T)>,
}

impl<T> EmptyRenderer<T> {
    /// Creates an empty renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _content: PhantomData,
        }
    }
}

impl<T> Default for EmptyRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EmptyRenderer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EmptyRenderer")
    }
}

impl<T, H: ViewHolder> Renderer<T, H> for EmptyRenderer<T> {
    type Data = EmptyViewData;

    fn view_data(&self, _content: &T) -> Self::Data {
        EmptyViewData
    }

    fn layout_res_id(&self, data: &Self::Data, index: usize) -> u32 {
        debug_assert!(index < data.count(), "empty renderer has no row {index}");
        0
    }

    fn bind(&self, data: &Self::Data, index: usize, _holder: &mut H) {
        debug_assert!(index < data.count(), "empty renderer has no row {index}");
    }

    fn recycle(&self, _holder: &mut H) {}

    fn updates(&self, _old: &Self::Data, _new: &Self::Data) -> Vec<UpdateAction> {
        Vec::new()
    }
}
