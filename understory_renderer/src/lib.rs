// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_renderer --heading-base-level=0

//! Understory Renderer: composable list renderers over a single flattened list.
//!
//! List widgets (recyclers) show one linear list of rows. Real screens are made of
//! sections: a header followed by a dynamic list of items, where items may be
//! sections themselves. This crate lets you describe that structure declaratively
//! and flattens it for the widget.
//!
//! The core concepts are:
//!
//! - [`ViewData`]: an immutable snapshot that occupies [`ViewData::count`] rows.
//! - [`Renderer`]: turns content into a snapshot, and answers per-row requests
//!   (id, view type, layout, bind, recycle) as well as diffs between snapshots.
//! - [`GroupItemRenderer`]: composes a header renderer and a sub-item renderer into one
//!   renderer over [`GroupViewData`], routing every row to the child that owns it.
//! - [`UpdateAction`]: a tree of insert/remove/change operations. Nested
//!   [`UpdateAction::Composite`] nodes shift their children by an offset;
//!   [`dispatch_updates`] resolves them into absolute positions.
//! - [`RecycleBindings`] and [`ViewHolder`]: a per-holder side table so that composite
//!   renderers recycle a holder through the same child that bound it.
//! - [`RendererAdapter`]: the surface a list widget talks to.
//!
//! This crate deliberately does **not** draw anything or know about a particular UI
//! toolkit. Hosts own the widget, inflate layouts, and apply updates.
//!
//! ## Minimal example
//!
//! A section with a title row followed by one row per entry:
//!
//! ```rust
//! use understory_renderer::{
//!     GroupItemRenderer, LayoutRenderer, ListUpdate, RecycleBindings, RendererAdapter,
//!     ViewHolder, dispatch_updates,
//! };
//!
//! #[derive(Default)]
//! struct Row {
//!     text: String,
//!     bindings: RecycleBindings,
//! }
//!
//! impl ViewHolder for Row {
//!     fn recycle_bindings(&mut self) -> &mut RecycleBindings {
//!         &mut self.bindings
//!     }
//! }
//!
//! struct Section {
//!     title: String,
//!     entries: Vec<String>,
//! }
//!
//! const TITLE: u32 = 1;
//! const ENTRY: u32 = 2;
//!
//! let renderer = GroupItemRenderer::new(
//!     |s: &Section| s.title.clone(),
//!     |s: &Section| s.entries.clone(),
//!     LayoutRenderer::new(TITLE, |row: &mut Row, title: &String, _| row.text = title.clone()),
//!     LayoutRenderer::new(ENTRY, |row: &mut Row, entry: &String, _| row.text = entry.clone()),
//! );
//!
//! let mut adapter = RendererAdapter::new(
//!     renderer,
//!     &Section { title: "Fruit".into(), entries: vec!["apple".into(), "pear".into()] },
//! );
//! assert_eq!(adapter.item_count(), 3);
//! assert_eq!(adapter.item_view_type(0), TITLE);
//! assert_eq!(adapter.item_view_type(2), ENTRY);
//!
//! let mut row = Row::default();
//! adapter.bind(2, &mut row);
//! assert_eq!(row.text, "pear");
//! adapter.recycle(&mut row);
//!
//! // Append an entry and resolve the updates the widget should apply.
//! let actions = adapter.set_content(&Section {
//!     title: "Fruit".into(),
//!     entries: vec!["apple".into(), "pear".into(), "plum".into()],
//! });
//! let mut updates: Vec<ListUpdate> = Vec::new();
//! dispatch_updates(&actions, &mut updates);
//! assert_eq!(updates.len(), 1);
//! assert_eq!((updates[0].position, updates[0].count), (3, 1));
//! ```
//!
//! ## Diffing
//!
//! [`GroupItemRenderer`] reports a header change first (an in-place change when the
//! header keeps its row count, otherwise a removal plus an insertion), then wraps all
//! sub-item changes in a composite at the *old* header size. Sub-items are matched by
//! [`KeyGetter`] when every sub-item of both snapshots is a single row; otherwise they
//! are paired by position and any length difference is reported at the tail.
//!
//! ## Threading
//!
//! Everything is synchronous and meant to run on the UI thread. Renderers hold no
//! per-row state; the only mutable state is each holder's [`RecycleBindings`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod diff;
mod group;
mod holder;
mod layout;
mod list;
mod renderer;
mod updates;
pub mod view_data;

#[cfg(test)]
mod test_support;

pub use adapter::RendererAdapter;
pub use diff::check_list_updates;
pub use group::{GroupItemRenderer, GroupRow, GroupViewData};
pub use holder::{BindingSlot, RecycleBindings, RendererId, ViewHolder};
pub use layout::{EmptyRenderer, EmptyViewData, LayoutRenderer, LayoutViewData};
pub use list::{ListRenderer, ListViewData};
pub use renderer::{KeyGetter, Renderer};
pub use updates::{
    ListUpdate, ListUpdateKind, Payload, UpdateAction, UpdateSink, dispatch_updates,
};
pub use view_data::{ViewData, resolve_indices};
