// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer contract shared by leaves and composites.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{UpdateAction, ViewData, ViewHolder};

/// Turns content of type `T` into a snapshot and serves per-row requests on it.
///
/// Every per-row method takes the snapshot returned by [`Renderer::view_data`] and a
/// row `index` that must be `< data.count()`. Composite renderers route each request
/// to the child owning that row, so a whole tree of renderers behaves like one.
///
/// All methods are synchronous and expected to run on the UI thread.
pub trait Renderer<T, H: ViewHolder> {
    /// Snapshot type produced by this renderer.
    type Data: ViewData;

    /// Builds a fresh snapshot of `content`.
    fn view_data(&self, content: &T) -> Self::Data;

    /// Stable id of the row, if the renderer provides one.
    fn item_id(&self, data: &Self::Data, index: usize) -> Option<u64> {
        let _ = (data, index);
        None
    }

    /// View type of the row. Defaults to its layout.
    fn item_view_type(&self, data: &Self::Data, index: usize) -> u32 {
        self.layout_res_id(data, index)
    }

    /// Layout resource the host inflates for the row.
    fn layout_res_id(&self, data: &Self::Data, index: usize) -> u32;

    /// Binds the row into `holder`.
    fn bind(&self, data: &Self::Data, index: usize, holder: &mut H);

    /// Releases whatever this renderer attached to `holder` when binding it.
    ///
    /// Composite renderers only forward to the child recorded at bind time, so
    /// recycling a holder a composite never bound is a no-op. Leaf renderers act
    /// unconditionally and rely on their parent's record.
    fn recycle(&self, holder: &mut H);

    /// Describes how the rows of `old` turn into the rows of `new`.
    ///
    /// Positions are relative to the first row of `old`.
    fn updates(&self, old: &Self::Data, new: &Self::Data) -> Vec<UpdateAction>;
}

impl<T, H: ViewHolder, R: Renderer<T, H> + ?Sized> Renderer<T, H> for Box<R> {
    type Data = R::Data;

    fn view_data(&self, content: &T) -> Self::Data {
        (**self).view_data(content)
    }

    fn item_id(&self, data: &Self::Data, index: usize) -> Option<u64> {
        (**self).item_id(data, index)
    }

    fn item_view_type(&self, data: &Self::Data, index: usize) -> u32 {
        (**self).item_view_type(data, index)
    }

    fn layout_res_id(&self, data: &Self::Data, index: usize) -> u32 {
        (**self).layout_res_id(data, index)
    }

    fn bind(&self, data: &Self::Data, index: usize, holder: &mut H) {
        (**self).bind(data, index, holder);
    }

    fn recycle(&self, holder: &mut H) {
        (**self).recycle(holder);
    }

    fn updates(&self, old: &Self::Data, new: &Self::Data) -> Vec<UpdateAction> {
        (**self).updates(old, new)
    }
}

/// Identifies "the same logical item" across two snapshots of a list.
///
/// Matching items are diffed recursively; unmatched ones are inserted or removed.
pub enum KeyGetter<D> {
    /// Items match when their snapshots are equal.
    Identity,
    /// Items match when `key(item, index)` is equal on both sides.
    Custom(Box<dyn Fn(&D, usize) -> u64>),
}

impl<D> KeyGetter<D> {
    /// Builds a [`KeyGetter::Custom`] from a closure.
    pub fn custom(key: impl Fn(&D, usize) -> u64 + 'static) -> Self {
        Self::Custom(Box::new(key))
    }
}

impl<D: PartialEq> KeyGetter<D> {
    /// Returns `true` if `old` at `old_index` and `new` at `new_index` are the same item.
    pub fn same_item(&self, old: &D, old_index: usize, new: &D, new_index: usize) -> bool {
        match self {
            Self::Identity => old == new,
            Self::Custom(key) => key(old, old_index) == key(new, new_index),
        }
    }
}

impl<D> Default for KeyGetter<D> {
    fn default() -> Self {
        Self::Identity
    }
}

impl<D> fmt::Debug for KeyGetter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}
