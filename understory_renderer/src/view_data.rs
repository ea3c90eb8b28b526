// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot contract and the end-point index used to flatten sub-item rows.

use alloc::vec::Vec;

/// An immutable snapshot produced by a renderer for one point in time.
///
/// A snapshot occupies [`ViewData::count`] consecutive rows of the flattened list.
///
/// Implementations must guarantee that:
/// - `count` is stable: two reads of the same snapshot return the same value,
/// - equality is *value* equality over the visually relevant state, since diffing
///   compares snapshots with `==` to decide whether rows changed.
pub trait ViewData: PartialEq {
    /// Number of flattened rows this snapshot occupies.
    fn count(&self) -> usize;
}

/// Builds the cumulative end points of a sequence of snapshots.
///
/// `ends[k]` is the total row count of `items[0..=k]`, so item `k` occupies rows
/// `ends[k - 1]..ends[k]` (with `ends[-1]` taken as `0`).
pub fn end_points<D: ViewData>(items: &[D]) -> Vec<usize> {
    items
        .iter()
        .scan(0_usize, |acc, item| {
            *acc += item.count();
            Some(*acc)
        })
        .collect()
}

/// Total row count described by `ends`, or `0` when there are no items.
#[must_use]
pub fn end_point(ends: &[usize]) -> usize {
    ends.last().copied().unwrap_or(0)
}

/// Row offset at which item `k` starts.
#[must_use]
pub fn start_point(ends: &[usize], k: usize) -> usize {
    if k == 0 { 0 } else { ends[k - 1] }
}

/// Returns `true` when the number of items equals the total row count.
///
/// Zero-row items can offset multi-row ones, so this does not imply that every
/// item is exactly one row; counts `[0, 2]` are saturated.
#[must_use]
pub fn is_saturated(ends: &[usize]) -> bool {
    end_point(ends) == ends.len()
}

/// Resolves a row `offset` into `(item, offset_within_item)`.
///
/// The returned `item` satisfies `ends[item - 1] <= offset < ends[item]`, which
/// skips any zero-row items sitting at that offset. The caller must guarantee
/// `offset < end_point(ends)`.
#[must_use]
pub fn resolve_indices(offset: usize, ends: &[usize]) -> (usize, usize) {
    debug_assert!(
        offset < end_point(ends),
        "row offset {offset} out of range for {} sub-item rows",
        end_point(ends)
    );
    let item = ends.partition_point(|&end| end <= offset);
    (item, offset - start_point(ends, item))
}
