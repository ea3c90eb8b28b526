// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View holders and the side table used for scoped recycling.
//!
//! A view holder is an opaque, reusable UI row owned by the host. Composite
//! renderers bind a holder through exactly one of their children, and must later
//! recycle it through that same child. They remember which one by recording a
//! [`BindingSlot`] under their own [`RendererId`] in the holder's
//! [`RecycleBindings`], and take it back out on recycle.
//!
//! The table lives with the holder rather than with the renderer, so renderers stay
//! shareable and hold no per-row state. It must only be touched from the thread
//! that binds and recycles rows.

use core::sync::atomic::{AtomicUsize, Ordering};

use smallvec::SmallVec;

/// Process-unique identity of a renderer instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RendererId(usize);

impl RendererId {
    /// Allocates a fresh id.
    #[must_use]
    pub fn fresh() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which child of a composite renderer bound a holder.
///
/// The meaning of the value is private to the renderer that records it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingSlot(pub u32);

/// Per-holder record of `renderer -> child that last bound this holder`.
///
/// Holds one entry per composite nesting level, so it rarely spills to the heap.
#[derive(Clone, Debug, Default)]
pub struct RecycleBindings {
    entries: SmallVec<[(RendererId, BindingSlot); 4]>,
}

impl RecycleBindings {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `renderer` bound the holder through `slot`, replacing any
    /// earlier record for the same renderer.
    pub fn record(&mut self, renderer: RendererId, slot: BindingSlot) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| *id == renderer) {
            entry.1 = slot;
        } else {
            self.entries.push((renderer, slot));
        }
    }

    /// Removes and returns the record for `renderer`, if any.
    pub fn take(&mut self, renderer: RendererId) -> Option<BindingSlot> {
        let pos = self.entries.iter().position(|(id, _)| *id == renderer)?;
        Some(self.entries.swap_remove(pos).1)
    }

    /// Returns the record for `renderer` without removing it.
    #[must_use]
    pub fn get(&self, renderer: RendererId) -> Option<BindingSlot> {
        self.entries
            .iter()
            .find(|(id, _)| *id == renderer)
            .map(|(_, slot)| *slot)
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no renderer holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A reusable UI row handed to renderers for binding and recycling.
///
/// Hosts implement this on their row type and embed a [`RecycleBindings`].
pub trait ViewHolder {
    /// The holder's recycle side table.
    fn recycle_bindings(&mut self) -> &mut RecycleBindings;
}

#[cfg(test)]
mod tests {
    use super::{BindingSlot, RecycleBindings, RendererId};

    #[test]
    fn ids_are_unique() {
        assert_ne!(RendererId::fresh(), RendererId::fresh());
    }

    #[test]
    fn record_overwrites_and_take_clears() {
        let a = RendererId::fresh();
        let b = RendererId::fresh();
        let mut table = RecycleBindings::new();

        table.record(a, BindingSlot(0));
        table.record(b, BindingSlot(1));
        table.record(a, BindingSlot(2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(a), Some(BindingSlot(2)));

        assert_eq!(table.take(a), Some(BindingSlot(2)));
        assert_eq!(table.take(a), None);
        assert_eq!(table.take(b), Some(BindingSlot(1)));
        assert!(table.is_empty());
    }

    #[test]
    fn take_without_record_is_none() {
        let mut table = RecycleBindings::new();
        assert_eq!(table.take(RendererId::fresh()), None);
    }
}
