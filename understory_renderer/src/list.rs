// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A flat list of items, each rendered by the same child renderer.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::view_data::{end_point, end_points, resolve_indices};
use crate::{
    BindingSlot, KeyGetter, Renderer, RendererId, UpdateAction, ViewData, ViewHolder,
    check_list_updates,
};

/// Snapshot of a [`ListRenderer`]: the item snapshots and their end points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListViewData<D> {
    items: Vec<D>,
    end_points: Vec<usize>,
}

impl<D: ViewData> ListViewData<D> {
    /// Builds a snapshot and its derived row index.
    pub fn new(items: Vec<D>) -> Self {
        let end_points = end_points(&items);
        Self { items, end_points }
    }
}

impl<D> ListViewData<D> {
    /// The item snapshots, in flattened order.
    pub fn items(&self) -> &[D] {
        &self.items
    }

    /// Cumulative row counts of the items.
    pub fn end_points(&self) -> &[usize] {
        &self.end_points
    }
}

impl<D: ViewData> ViewData for ListViewData<D> {
    fn count(&self) -> usize {
        end_point(&self.end_points)
    }
}

const ITEM_SLOT: BindingSlot = BindingSlot(0);

/// Renders a `Vec<I>` by rendering every item with `item`, one after another.
///
/// Items are matched by key when diffing, so insertions, removals and in-place
/// changes anywhere in the list produce minimal updates.
pub struct ListRenderer<I, H, R>
where
    H: ViewHolder,
    R: Renderer<I, H>,
{
    id: RendererId,
    item: R,
    key_getter: KeyGetter<R::Data>,
    _types: PhantomData<fn(&I, &mut H)>,
}

impl<I, H, R> ListRenderer<I, H, R>
where
    H: ViewHolder,
    R: Renderer<I, H>,
{
    /// Creates a list renderer matching items by snapshot equality.
    pub fn new(item: R) -> Self {
        Self {
            id: RendererId::fresh(),
            item,
            key_getter: KeyGetter::Identity,
            _types: PhantomData,
        }
    }

    /// Sets how items are matched across snapshots when diffing.
    #[must_use]
    pub fn with_key_getter(mut self, key_getter: KeyGetter<R::Data>) -> Self {
        self.key_getter = key_getter;
        self
    }

    /// The item renderer.
    pub fn item(&self) -> &R {
        &self.item
    }
}

impl<I, H, R> fmt::Debug for ListRenderer<I, H, R>
where
    H: ViewHolder,
    R: Renderer<I, H> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRenderer")
            .field("id", &self.id)
            .field("item", &self.item)
            .field("key_getter", &self.key_getter)
            .finish_non_exhaustive()
    }
}

impl<I, H, R> Renderer<Vec<I>, H> for ListRenderer<I, H, R>
where
    H: ViewHolder,
    R: Renderer<I, H>,
{
    type Data = ListViewData<R::Data>;

    fn view_data(&self, content: &Vec<I>) -> Self::Data {
        ListViewData::new(content.iter().map(|i| self.item.view_data(i)).collect())
    }

    fn item_id(&self, data: &Self::Data, index: usize) -> Option<u64> {
        let (k, offset) = resolve_indices(index, &data.end_points);
        self.item.item_id(&data.items[k], offset)
    }

    fn item_view_type(&self, data: &Self::Data, index: usize) -> u32 {
        let (k, offset) = resolve_indices(index, &data.end_points);
        self.item.item_view_type(&data.items[k], offset)
    }

    fn layout_res_id(&self, data: &Self::Data, index: usize) -> u32 {
        let (k, offset) = resolve_indices(index, &data.end_points);
        self.item.layout_res_id(&data.items[k], offset)
    }

    fn bind(&self, data: &Self::Data, index: usize, holder: &mut H) {
        let (k, offset) = resolve_indices(index, &data.end_points);
        self.item.bind(&data.items[k], offset, holder);
        holder.recycle_bindings().record(self.id, ITEM_SLOT);
    }

    fn recycle(&self, holder: &mut H) {
        if holder.recycle_bindings().take(self.id).is_some() {
            self.item.recycle(holder);
        }
    }

    fn updates(&self, old: &Self::Data, new: &Self::Data) -> Vec<UpdateAction> {
        check_list_updates(&old.items, &new.items, &self.key_getter, |o, n| {
            self.item.updates(o, n)
        })
    }
}
