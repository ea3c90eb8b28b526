// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update actions produced by diffing two snapshots, and their consumers.
//!
//! Renderers describe how one snapshot turns into the next as a tree of
//! [`UpdateAction`]s. Leaves are insert/remove/change operations on a range of
//! rows; [`UpdateAction::Composite`] nodes shift every descendant by an offset.
//! A child renderer therefore only ever reports positions relative to its own
//! first row, and its parent wraps the result at the right place.
//!
//! Consumers walk the tree with [`dispatch_updates`], which sums ancestor offsets
//! top-down and reports absolute positions to an [`UpdateSink`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

/// Opaque payload attached to a change, forwarded untouched to the UI layer.
///
/// Payloads are shared and compared by identity.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    /// Wraps a value as a change payload.
    pub fn new<P: Any>(value: P) -> Self {
        Self(Rc::new(value))
    }

    /// Returns the payload value if it is a `P`.
    #[must_use]
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.0.downcast_ref()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Payload {}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").finish_non_exhaustive()
    }
}

/// One node of an update tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateAction {
    /// `count` rows were inserted at `position`.
    Inserted {
        /// First inserted row.
        position: usize,
        /// Number of inserted rows.
        count: usize,
    },
    /// `count` rows were removed starting at `position`.
    Removed {
        /// First removed row.
        position: usize,
        /// Number of removed rows.
        count: usize,
    },
    /// `count` rows starting at `position` changed in place.
    Changed {
        /// First changed row.
        position: usize,
        /// Number of changed rows.
        count: usize,
        /// Optional payload for partial rebinding.
        payload: Option<Payload>,
    },
    /// A nested batch whose positions are relative to `offset`.
    Composite {
        /// Added to every descendant position.
        offset: usize,
        /// The nested batch, applied in order.
        actions: Vec<UpdateAction>,
    },
}

impl UpdateAction {
    /// Shorthand for [`UpdateAction::Inserted`].
    #[must_use]
    pub const fn inserted(position: usize, count: usize) -> Self {
        Self::Inserted { position, count }
    }

    /// Shorthand for [`UpdateAction::Removed`].
    #[must_use]
    pub const fn removed(position: usize, count: usize) -> Self {
        Self::Removed { position, count }
    }

    /// Shorthand for [`UpdateAction::Changed`] without a payload.
    #[must_use]
    pub const fn changed(position: usize, count: usize) -> Self {
        Self::Changed {
            position,
            count,
            payload: None,
        }
    }

    /// Shorthand for [`UpdateAction::Composite`].
    #[must_use]
    pub const fn composite(offset: usize, actions: Vec<Self>) -> Self {
        Self::Composite { offset, actions }
    }

    /// Returns `true` if applying this action changes nothing.
    ///
    /// Leaves with a zero `count` and composites made only of no-ops qualify.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Inserted { count, .. }
            | Self::Removed { count, .. }
            | Self::Changed { count, .. } => *count == 0,
            Self::Composite { actions, .. } => actions.iter().all(Self::is_noop),
        }
    }
}

/// Pushes the actions that turn `old_count` rows into `new_count` different rows.
///
/// Same-size content changes in place; a size change cannot be expressed as a
/// change and becomes a removal followed by an insertion at the same position.
pub(crate) fn push_replacement(
    actions: &mut Vec<UpdateAction>,
    old_count: usize,
    new_count: usize,
) {
    if old_count == new_count {
        actions.push(UpdateAction::changed(0, new_count));
    } else {
        actions.push(UpdateAction::removed(0, old_count));
        actions.push(UpdateAction::inserted(0, new_count));
    }
}

/// Kind of an absolute list update.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListUpdateKind {
    /// Rows were inserted.
    Inserted,
    /// Rows were removed.
    Removed,
    /// Rows changed in place.
    Changed,
}

/// A leaf update with its position resolved to absolute list coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListUpdate {
    /// What happened to the rows.
    pub kind: ListUpdateKind,
    /// Absolute first row.
    pub position: usize,
    /// Number of rows.
    pub count: usize,
    /// Change payload, only ever set for [`ListUpdateKind::Changed`].
    pub payload: Option<Payload>,
}

/// Receiver of resolved list updates, typically the UI list widget.
pub trait UpdateSink {
    /// `count` rows were inserted at `position`.
    fn on_inserted(&mut self, position: usize, count: usize);
    /// `count` rows were removed at `position`.
    fn on_removed(&mut self, position: usize, count: usize);
    /// `count` rows at `position` changed.
    fn on_changed(&mut self, position: usize, count: usize, payload: Option<&Payload>);
}

impl UpdateSink for Vec<ListUpdate> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.push(ListUpdate {
            kind: ListUpdateKind::Inserted,
            position,
            count,
            payload: None,
        });
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.push(ListUpdate {
            kind: ListUpdateKind::Removed,
            position,
            count,
            payload: None,
        });
    }

    fn on_changed(&mut self, position: usize, count: usize, payload: Option<&Payload>) {
        self.push(ListUpdate {
            kind: ListUpdateKind::Changed,
            position,
            count,
            payload: payload.cloned(),
        });
    }
}

/// Walks `actions` in order and reports each leaf to `sink` at its absolute position.
///
/// Composite offsets are summed from the root down. Zero-count leaves are skipped.
pub fn dispatch_updates(actions: &[UpdateAction], sink: &mut impl UpdateSink) {
    dispatch_at(0, actions, sink);
}

fn dispatch_at(base: usize, actions: &[UpdateAction], sink: &mut impl UpdateSink) {
    for action in actions {
        match action {
            UpdateAction::Inserted { position, count } if *count > 0 => {
                sink.on_inserted(base + position, *count);
            }
            UpdateAction::Removed { position, count } if *count > 0 => {
                sink.on_removed(base + position, *count);
            }
            UpdateAction::Changed {
                position,
                count,
                payload,
            } if *count > 0 => {
                sink.on_changed(base + position, *count, payload.as_ref());
            }
            UpdateAction::Composite { offset, actions } => {
                dispatch_at(base + offset, actions, sink);
            }
            _ => {}
        }
    }
}
