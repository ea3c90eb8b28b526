// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed diffing of a list of snapshots into update actions.

use alloc::vec::Vec;

use understory_list_diff::{Edit, diff_by};

use crate::{KeyGetter, UpdateAction, ViewData};

/// Diffs two lists of item snapshots into update actions over their rows.
///
/// Items are matched with `key_getter`. Positions are progressive: each action is
/// expressed against the list as it stands after every earlier action was applied,
/// starting from the first row of `old`.
///
/// - Runs of unmatched old items become one [`UpdateAction::Removed`].
/// - Runs of unmatched new items become one [`UpdateAction::Inserted`].
/// - Matched items whose snapshots differ are diffed with `item_updates` and the
///   result is wrapped in an [`UpdateAction::Composite`] at the item's first row.
pub fn check_list_updates<D: ViewData>(
    old: &[D],
    new: &[D],
    key_getter: &KeyGetter<D>,
    mut item_updates: impl FnMut(&D, &D) -> Vec<UpdateAction>,
) -> Vec<UpdateAction> {
    let edits = diff_by(old.len(), new.len(), |o, n| {
        key_getter.same_item(&old[o], o, &new[n], n)
    });

    let mut actions = Vec::new();
    let mut pos = 0;
    for edit in edits {
        match edit {
            Edit::Remove { old: o } => {
                push_removed(&mut actions, pos, old[o].count());
            }
            Edit::Insert { new: n } => {
                let count = new[n].count();
                push_inserted(&mut actions, pos, count);
                pos += count;
            }
            Edit::Keep { old: o, new: n } => {
                if old[o] != new[n] {
                    let nested = item_updates(&old[o], &new[n]);
                    if !nested.is_empty() {
                        actions.push(UpdateAction::composite(pos, nested));
                    }
                }
                pos += new[n].count();
            }
        }
    }
    actions
}

fn push_removed(actions: &mut Vec<UpdateAction>, position: usize, count: usize) {
    if count == 0 {
        return;
    }
    if let Some(UpdateAction::Removed {
        position: last,
        count: run,
    }) = actions.last_mut()
    {
        if *last == position {
            *run += count;
            return;
        }
    }
    actions.push(UpdateAction::removed(position, count));
}

fn push_inserted(actions: &mut Vec<UpdateAction>, position: usize, count: usize) {
    if count == 0 {
        return;
    }
    if let Some(UpdateAction::Inserted {
        position: last,
        count: run,
    }) = actions.last_mut()
    {
        if *last + *run == position {
            *run += count;
            return;
        }
    }
    actions.push(UpdateAction::inserted(position, count));
}
