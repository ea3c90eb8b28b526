// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface a list widget talks to: one renderer plus the current snapshot.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use hashbrown::HashMap;

use crate::{Renderer, UpdateAction, ViewData, ViewHolder};

/// Owns a root renderer and the snapshot the list widget is currently showing.
///
/// The host list widget asks the adapter for the row count and per-row data, and
/// hands it holders to bind and recycle. New content goes through
/// [`RendererAdapter::set_content`], which returns the updates the widget should
/// apply (see [`dispatch_updates`](crate::dispatch_updates)).
pub struct RendererAdapter<T, H, R>
where
    H: ViewHolder,
    R: Renderer<T, H>,
{
    renderer: R,
    data: R::Data,
    layouts: HashMap<u32, u32>,
    _types: PhantomData<fn(&T, &mut H)>,
}

impl<T, H, R> RendererAdapter<T, H, R>
where
    H: ViewHolder,
    R: Renderer<T, H>,
{
    /// Creates an adapter showing `content`.
    pub fn new(renderer: R, content: &T) -> Self {
        let data = renderer.view_data(content);
        Self {
            renderer,
            data,
            layouts: HashMap::new(),
            _types: PhantomData,
        }
    }

    /// The root renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The snapshot currently shown.
    pub fn data(&self) -> &R::Data {
        &self.data
    }

    /// Number of rows currently shown.
    pub fn item_count(&self) -> usize {
        self.data.count()
    }

    /// Stable id of row `position`, if the renderer provides one.
    pub fn item_id(&self, position: usize) -> Option<u64> {
        self.check_position(position);
        self.renderer.item_id(&self.data, position)
    }

    /// View type of row `position`.
    ///
    /// The view type's layout is remembered for [`RendererAdapter::layout_for_view_type`].
    pub fn item_view_type(&mut self, position: usize) -> u32 {
        self.check_position(position);
        let view_type = self.renderer.item_view_type(&self.data, position);
        let layout = self.renderer.layout_res_id(&self.data, position);
        self.layouts.insert(view_type, layout);
        view_type
    }

    /// Layout to inflate for a holder of `view_type`, once that view type was seen.
    pub fn layout_for_view_type(&self, view_type: u32) -> Option<u32> {
        self.layouts.get(&view_type).copied()
    }

    /// Binds row `position` into `holder`.
    pub fn bind(&self, position: usize, holder: &mut H) {
        self.check_position(position);
        self.renderer.bind(&self.data, position, holder);
    }

    /// Releases what the renderer tree attached to `holder`.
    pub fn recycle(&self, holder: &mut H) {
        self.renderer.recycle(holder);
    }

    /// Switches to `content` and returns the updates from the previous snapshot.
    pub fn set_content(&mut self, content: &T) -> Vec<UpdateAction> {
        let data = self.renderer.view_data(content);
        let actions = self.renderer.updates(&self.data, &data);
        self.data = data;
        actions
    }

    fn check_position(&self, position: usize) {
        debug_assert!(
            position < self.data.count(),
            "position {position} out of range for {} rows",
            self.data.count()
        );
    }
}

impl<T, H, R> fmt::Debug for RendererAdapter<T, H, R>
where
    H: ViewHolder,
    R: Renderer<T, H> + fmt::Debug,
    R::Data: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererAdapter")
            .field("renderer", &self.renderer)
            .field("data", &self.data)
            .field("layouts", &self.layouts)
            .finish_non_exhaustive()
    }
}
