// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory List Diff: shortest edit scripts between two indexed sequences.
//!
//! This crate answers one question: given an old and a new sequence, and a way to
//! tell whether an old item and a new item are *the same logical item*, which items
//! were kept, which were removed, and which were inserted?
//!
//! - [`diff_by`] computes a shortest edit script using Myers' greedy algorithm,
//!   after trimming any common prefix and suffix.
//! - [`Edit`] is one step of that script, expressed in terms of old and new indices.
//!
//! Item identity is supplied by the caller as a closure over indices, so this crate
//! does not care how items are stored or keyed. Content comparison (whether a kept
//! item *changed*) is a separate concern left to higher layers.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_list_diff::{Edit, diff_by};
//!
//! let old = ['a', 'b', 'c'];
//! let new = ['a', 'c', 'd'];
//! let edits = diff_by(old.len(), new.len(), |o, n| old[o] == new[n]);
//!
//! assert_eq!(
//!     edits,
//!     vec![
//!         Edit::Keep { old: 0, new: 0 },
//!         Edit::Remove { old: 1 },
//!         Edit::Keep { old: 2, new: 1 },
//!         Edit::Insert { new: 2 },
//!     ]
//! );
//! ```
//!
//! ## Ordering
//!
//! Edits are emitted in forward order: walking the script from the front and
//! applying each step to a cursor over the old sequence reproduces the new one.
//! Old indices of `Keep`/`Remove` are strictly increasing, as are new indices of
//! `Keep`/`Insert`.
//!
//! ## Cost
//!
//! Time is `O((N + M) · D)` where `D` is the number of removed plus inserted items;
//! the trace kept for backtracking uses the same order of memory. Lists that change
//! by a handful of items per update stay close to linear.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

/// One step of an edit script produced by [`diff_by`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edit {
    /// The old item at `old` survives as the new item at `new`.
    Keep {
        /// Index into the old sequence.
        old: usize,
        /// Index into the new sequence.
        new: usize,
    },
    /// The old item at `old` has no counterpart in the new sequence.
    Remove {
        /// Index into the old sequence.
        old: usize,
    },
    /// The new item at `new` has no counterpart in the old sequence.
    Insert {
        /// Index into the new sequence.
        new: usize,
    },
}

impl Edit {
    /// Returns `true` for [`Edit::Keep`].
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep { .. })
    }
}

/// Compute a shortest edit script turning `0..old_len` into `0..new_len`.
///
/// `same_item(o, n)` reports whether old item `o` and new item `n` are the same
/// logical item. It should behave like an equivalence between the two sides (for
/// example, equal keys); the script is only minimal with respect to that relation.
pub fn diff_by(
    old_len: usize,
    new_len: usize,
    mut same_item: impl FnMut(usize, usize) -> bool,
) -> Vec<Edit> {
    let mut prefix = 0;
    while prefix < old_len && prefix < new_len && same_item(prefix, prefix) {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old_len - prefix
        && suffix < new_len - prefix
        && same_item(old_len - 1 - suffix, new_len - 1 - suffix)
    {
        suffix += 1;
    }

    let mut edits = Vec::with_capacity(old_len.max(new_len));
    edits.extend((0..prefix).map(|i| Edit::Keep { old: i, new: i }));
    diff_middle(
        prefix..old_len - suffix,
        prefix..new_len - suffix,
        &mut same_item,
        &mut edits,
    );
    edits.extend((0..suffix).map(|i| Edit::Keep {
        old: old_len - suffix + i,
        new: new_len - suffix + i,
    }));
    edits
}

#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "Diagonal arithmetic is signed; every index is bounded by `old.len() + new.len()`."
)]
fn diff_middle(
    old: core::ops::Range<usize>,
    new: core::ops::Range<usize>,
    same_item: &mut impl FnMut(usize, usize) -> bool,
    out: &mut Vec<Edit>,
) {
    if old.is_empty() {
        out.extend(new.map(|n| Edit::Insert { new: n }));
        return;
    }
    if new.is_empty() {
        out.extend(old.map(|o| Edit::Remove { old: o }));
        return;
    }

    let n = old.len() as isize;
    let m = new.len() as isize;
    let max = (n + m) as usize;
    // Diagonal `k` lives at `v[k + offset]`; `k` spans `-(max + 1)..=max + 1`.
    let offset = max as isize + 1;
    let slot = |k: isize| (k + offset) as usize;

    let mut v = vec![0_isize; 2 * max + 3];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    'search: for d in 0..=max as isize {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && v[slot(k - 1)] < v[slot(k + 1)]) {
                v[slot(k + 1)]
            } else {
                v[slot(k - 1)] + 1
            };
            let mut y = x - k;
            while x < n && y < m && same_item(old.start + x as usize, new.start + y as usize) {
                x += 1;
                y += 1;
            }
            v[slot(k)] = x;
            if x >= n && y >= m {
                break 'search;
            }
            k += 2;
        }
    }

    let mut reversed = Vec::with_capacity(old.len() + new.len());
    let (mut x, mut y) = (n, m);
    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && v[slot(k - 1)] < v[slot(k + 1)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[slot(prev_k)];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            reversed.push(Edit::Keep {
                old: old.start + (x - 1) as usize,
                new: new.start + (y - 1) as usize,
            });
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                reversed.push(Edit::Insert {
                    new: new.start + (y - 1) as usize,
                });
            } else {
                reversed.push(Edit::Remove {
                    old: old.start + (x - 1) as usize,
                });
            }
        }
        x = prev_x;
        y = prev_y;
    }

    out.extend(reversed.into_iter().rev());
}
