// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A group header followed by a dynamic list of sub-items, flattened into one list.
//!
//! The flattened layout of a [`GroupViewData`] is:
//!
//! ```text
//! rows 0..title_size                      header rows, owned by the group renderer
//! rows title_size + ends[k-1]..ends[k]    rows of sub-item k, owned by the sub renderer
//! ```
//!
//! where `ends` are the cumulative [`end_points`] of the sub-item snapshots.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::updates::push_replacement;
use crate::view_data::{end_point, end_points, is_saturated, resolve_indices, start_point};
use crate::{
    BindingSlot, KeyGetter, Renderer, RendererId, UpdateAction, ViewData, ViewHolder,
    check_list_updates,
};

/// Snapshot of a [`GroupItemRenderer`]: one header snapshot and the sub-item snapshots.
///
/// Immutable once built. `count == title_size + end_point(sub_end_points)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupViewData<G, I> {
    title_item: G,
    subs_data: Vec<I>,
    title_size: usize,
    sub_end_points: Vec<usize>,
    count: usize,
}

impl<G: ViewData, I: ViewData> GroupViewData<G, I> {
    /// Builds a snapshot and its derived row index.
    pub fn new(title_item: G, subs_data: Vec<I>) -> Self {
        let title_size = title_item.count();
        let sub_end_points = end_points(&subs_data);
        let count = title_size + end_point(&sub_end_points);
        Self {
            title_item,
            subs_data,
            title_size,
            sub_end_points,
            count,
        }
    }
}

impl<G, I> GroupViewData<G, I> {
    /// The header snapshot.
    pub fn title_item(&self) -> &G {
        &self.title_item
    }

    /// The sub-item snapshots, in flattened order.
    pub fn subs_data(&self) -> &[I] {
        &self.subs_data
    }

    /// Number of header rows.
    pub fn title_size(&self) -> usize {
        self.title_size
    }

    /// Cumulative row counts of the sub-items.
    pub fn sub_end_points(&self) -> &[usize] {
        &self.sub_end_points
    }

    /// Row, relative to the first sub-item row, at which sub-item `k` starts.
    pub fn sub_start(&self, k: usize) -> usize {
        start_point(&self.sub_end_points, k)
    }

    /// Resolves a flattened row into the part of the group owning it.
    pub fn resolve(&self, index: usize) -> GroupRow {
        debug_assert!(
            index < self.count,
            "row {index} out of range for group of {} rows",
            self.count
        );
        if index < self.title_size {
            GroupRow::Title(index)
        } else {
            let (sub, offset) = resolve_indices(index - self.title_size, &self.sub_end_points);
            GroupRow::Sub { sub, offset }
        }
    }
}

impl<G: ViewData, I: ViewData> ViewData for GroupViewData<G, I> {
    fn count(&self) -> usize {
        self.count
    }
}

/// Owner of one flattened row of a [`GroupViewData`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupRow {
    /// Header row at this index within the header.
    Title(usize),
    /// Row `offset` within sub-item `sub`.
    Sub {
        /// Index of the owning sub-item.
        sub: usize,
        /// Row within that sub-item.
        offset: usize,
    },
}

const TITLE_SLOT: BindingSlot = BindingSlot(0);
const SUBS_SLOT: BindingSlot = BindingSlot(1);

/// Composes a header renderer and a sub-item renderer into one renderer over `T`.
///
/// `group_getter` extracts the header content, `subs_getter` the sub-item contents.
/// Both child renderers may themselves be composites, to any depth.
///
/// Every per-row request is routed to the child owning the row: header rows keep
/// their index, sub-item rows are re-based onto the owning sub-item.
pub struct GroupItemRenderer<T, G, I, H, GR, SR>
where
    H: ViewHolder,
    GR: Renderer<G, H>,
    SR: Renderer<I, H>,
{
    id: RendererId,
    group_getter: Box<dyn Fn(&T) -> G>,
    subs_getter: Box<dyn Fn(&T) -> Vec<I>>,
    group: GR,
    subs: SR,
    key_getter: KeyGetter<SR::Data>,
    _holder: PhantomData<fn(&mut H)>,
}

impl<T, G, I, H, GR, SR> GroupItemRenderer<T, G, I, H, GR, SR>
where
    H: ViewHolder,
    GR: Renderer<G, H>,
    SR: Renderer<I, H>,
{
    /// Creates a group renderer matching sub-items by snapshot equality.
    pub fn new(
        group_getter: impl Fn(&T) -> G + 'static,
        subs_getter: impl Fn(&T) -> Vec<I> + 'static,
        group: GR,
        subs: SR,
    ) -> Self {
        Self {
            id: RendererId::fresh(),
            group_getter: Box::new(group_getter),
            subs_getter: Box::new(subs_getter),
            group,
            subs,
            key_getter: KeyGetter::Identity,
            _holder: PhantomData,
        }
    }

    /// Sets how sub-items are matched across snapshots when diffing.
    #[must_use]
    pub fn with_key_getter(mut self, key_getter: KeyGetter<SR::Data>) -> Self {
        self.key_getter = key_getter;
        self
    }

    /// Identity under which this renderer records holder bindings.
    pub fn id(&self) -> RendererId {
        self.id
    }

    /// The header renderer.
    pub fn group(&self) -> &GR {
        &self.group
    }

    /// The sub-item renderer.
    pub fn subs(&self) -> &SR {
        &self.subs
    }

    /// Sub-item updates when either snapshot has multi-row or zero-row items.
    ///
    /// Pairs sub-items by position and treats any length difference as a change
    /// at the tail, counted in items.
    fn positional_updates(
        &self,
        old: &GroupViewData<GR::Data, SR::Data>,
        new: &GroupViewData<GR::Data, SR::Data>,
    ) -> Vec<UpdateAction> {
        let old_len = old.subs_data.len();
        let new_len = new.subs_data.len();

        let mut actions: Vec<UpdateAction> = old
            .subs_data
            .iter()
            .zip(&new.subs_data)
            .enumerate()
            .map(|(k, (old_item, new_item))| {
                UpdateAction::composite(old.sub_start(k), self.subs.updates(old_item, new_item))
            })
            .collect();

        if old_len < new_len {
            actions.push(UpdateAction::inserted(old_len, new_len - old_len));
        } else if old_len > new_len {
            actions.push(UpdateAction::removed(new_len, old_len - new_len));
        }
        actions
    }
}

impl<T, G, I, H, GR, SR> fmt::Debug for GroupItemRenderer<T, G, I, H, GR, SR>
where
    H: ViewHolder,
    GR: Renderer<G, H> + fmt::Debug,
    SR: Renderer<I, H> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupItemRenderer")
            .field("id", &self.id)
            .field("group", &self.group)
            .field("subs", &self.subs)
            .field("key_getter", &self.key_getter)
            .finish_non_exhaustive()
    }
}

impl<T, G, I, H, GR, SR> Renderer<T, H> for GroupItemRenderer<T, G, I, H, GR, SR>
where
    H: ViewHolder,
    GR: Renderer<G, H>,
    SR: Renderer<I, H>,
{
    type Data = GroupViewData<GR::Data, SR::Data>;

    fn view_data(&self, content: &T) -> Self::Data {
        let title = self.group.view_data(&(self.group_getter)(content));
        let subs = (self.subs_getter)(content)
            .iter()
            .map(|item| self.subs.view_data(item))
            .collect();
        GroupViewData::new(title, subs)
    }

    fn item_id(&self, data: &Self::Data, index: usize) -> Option<u64> {
        match data.resolve(index) {
            GroupRow::Title(i) => self.group.item_id(&data.title_item, i),
            GroupRow::Sub { sub, offset } => self.subs.item_id(&data.subs_data[sub], offset),
        }
    }

    fn item_view_type(&self, data: &Self::Data, index: usize) -> u32 {
        match data.resolve(index) {
            GroupRow::Title(i) => self.group.item_view_type(&data.title_item, i),
            GroupRow::Sub { sub, offset } => {
                self.subs.item_view_type(&data.subs_data[sub], offset)
            }
        }
    }

    fn layout_res_id(&self, data: &Self::Data, index: usize) -> u32 {
        match data.resolve(index) {
            GroupRow::Title(i) => self.group.layout_res_id(&data.title_item, i),
            GroupRow::Sub { sub, offset } => {
                self.subs.layout_res_id(&data.subs_data[sub], offset)
            }
        }
    }

    fn bind(&self, data: &Self::Data, index: usize, holder: &mut H) {
        match data.resolve(index) {
            GroupRow::Title(i) => {
                self.group.bind(&data.title_item, i, holder);
                holder.recycle_bindings().record(self.id, TITLE_SLOT);
            }
            GroupRow::Sub { sub, offset } => {
                self.subs.bind(&data.subs_data[sub], offset, holder);
                holder.recycle_bindings().record(self.id, SUBS_SLOT);
            }
        }
    }

    fn recycle(&self, holder: &mut H) {
        match holder.recycle_bindings().take(self.id) {
            Some(TITLE_SLOT) => self.group.recycle(holder),
            Some(SUBS_SLOT) => self.subs.recycle(holder),
            _ => {}
        }
    }

    /// Header changes come first, then the sub-item batch.
    ///
    /// The sub-item batch is wrapped in a composite at the *old* header size.
    /// Sub-items are diffed by key when both snapshots have as many sub-items as
    /// sub-item rows, and positionally otherwise.
    ///
    /// Both snapshots must come from this renderer; pairing snapshots built under a
    /// different key configuration yields wrong, but well-formed, actions.
    fn updates(&self, old: &Self::Data, new: &Self::Data) -> Vec<UpdateAction> {
        let mut actions = Vec::new();
        if old.title_item != new.title_item {
            push_replacement(&mut actions, old.title_size, new.title_size);
        }

        let sub_actions =
            if is_saturated(&old.sub_end_points) && is_saturated(&new.sub_end_points) {
                check_list_updates(&old.subs_data, &new.subs_data, &self.key_getter, |o, n| {
                    self.subs.updates(o, n)
                })
            } else {
                self.positional_updates(old, new)
            };

        actions.push(UpdateAction::composite(
            old.title_item.count(),
            sub_actions,
        ));
        actions
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{GroupItemRenderer, GroupRow, GroupViewData};
    use crate::test_support::{Rows, TestHolder};
    use crate::{
        EmptyRenderer, KeyGetter, LayoutRenderer, LayoutViewData, Renderer, UpdateAction,
        ViewData,
    };

    const TITLE_LAYOUT: u32 = 100;
    const ITEM_LAYOUT: u32 = 200;

    /// A header with `title_rows` rows over `title`, followed by `items`.
    #[derive(Clone, Debug)]
    struct Section {
        title: u32,
        title_rows: usize,
        items: Vec<(u32, usize)>,
    }

    impl Section {
        fn new(title: u32, title_rows: usize, items: &[(u32, usize)]) -> Self {
            Self {
                title,
                title_rows,
                items: items.to_vec(),
            }
        }
    }

    /// Leaf renderer with content-driven row counts.
    #[derive(Debug)]
    struct VarRows {
        label: &'static str,
        layout: u32,
    }

    impl Renderer<(u32, usize), TestHolder> for VarRows {
        type Data = Rows;

        fn view_data(&self, content: &(u32, usize)) -> Rows {
            Rows::tagged(content.1, content.0)
        }

        fn item_id(&self, data: &Rows, index: usize) -> Option<u64> {
            Some(u64::from(data.tag) * 100 + index as u64)
        }

        fn layout_res_id(&self, _data: &Rows, _index: usize) -> u32 {
            self.layout
        }

        fn bind(&self, data: &Rows, index: usize, holder: &mut TestHolder) {
            holder.bound.push((self.label, data.tag, index));
        }

        fn recycle(&self, holder: &mut TestHolder) {
            holder.recycled.push(self.label);
        }

        fn updates(&self, old: &Rows, new: &Rows) -> Vec<UpdateAction> {
            if old == new {
                Vec::new()
            } else if old.count == new.count {
                vec![UpdateAction::changed(0, new.count)]
            } else {
                vec![
                    UpdateAction::removed(0, old.count),
                    UpdateAction::inserted(0, new.count),
                ]
            }
        }
    }

    fn leaf(label: &'static str, layout: u32) -> VarRows {
        VarRows { label, layout }
    }

    type Sections =
        GroupItemRenderer<Section, (u32, usize), (u32, usize), TestHolder, VarRows, VarRows>;

    fn sections() -> Sections {
        GroupItemRenderer::new(
            |s: &Section| (s.title, s.title_rows),
            |s: &Section| s.items.clone(),
            leaf("title", TITLE_LAYOUT),
            leaf("item", ITEM_LAYOUT),
        )
    }

    #[test]
    fn count_is_title_plus_last_end_point() {
        let data = sections().view_data(&Section::new(1, 2, &[(10, 3), (11, 0), (12, 1)]));
        assert_eq!(data.title_size(), 2);
        assert_eq!(data.sub_end_points(), [3, 3, 4]);
        assert_eq!(data.count(), 6);

        let empty = sections().view_data(&Section::new(1, 1, &[]));
        assert!(empty.sub_end_points().is_empty());
        assert_eq!(empty.count(), 1);
    }

    #[test]
    fn every_row_has_exactly_one_owner() {
        let data = sections().view_data(&Section::new(1, 2, &[(10, 3), (11, 0), (12, 1)]));
        let owners: Vec<GroupRow> = (0..data.count()).map(|i| data.resolve(i)).collect();
        assert_eq!(
            owners,
            [
                GroupRow::Title(0),
                GroupRow::Title(1),
                GroupRow::Sub { sub: 0, offset: 0 },
                GroupRow::Sub { sub: 0, offset: 1 },
                GroupRow::Sub { sub: 0, offset: 2 },
                GroupRow::Sub { sub: 2, offset: 0 },
            ]
        );
    }

    #[test]
    fn per_row_requests_route_consistently() {
        let renderer = sections();
        let data = renderer.view_data(&Section::new(1, 1, &[(10, 2), (11, 1)]));

        let ids: Vec<_> = (0..data.count()).map(|i| renderer.item_id(&data, i)).collect();
        assert_eq!(ids, [Some(100), Some(1000), Some(1001), Some(1100)]);

        let layouts: Vec<_> = (0..data.count())
            .map(|i| renderer.layout_res_id(&data, i))
            .collect();
        assert_eq!(layouts, [TITLE_LAYOUT, ITEM_LAYOUT, ITEM_LAYOUT, ITEM_LAYOUT]);

        let view_types: Vec<_> = (0..data.count())
            .map(|i| renderer.item_view_type(&data, i))
            .collect();
        assert_eq!(view_types, layouts);

        let mut holder = TestHolder::default();
        for i in 0..data.count() {
            renderer.bind(&data, i, &mut holder);
        }
        assert_eq!(
            holder.bound,
            [("title", 1, 0), ("item", 10, 0), ("item", 10, 1), ("item", 11, 0)]
        );
    }

    #[test]
    fn recycle_goes_through_the_child_that_bound() {
        let renderer = sections();
        let data = renderer.view_data(&Section::new(1, 1, &[(10, 1)]));

        let mut holder = TestHolder::default();
        renderer.bind(&data, 0, &mut holder);
        renderer.recycle(&mut holder);
        assert_eq!(holder.recycled, ["title"]);
        assert!(holder.bindings.is_empty());

        renderer.bind(&data, 0, &mut holder);
        renderer.bind(&data, 1, &mut holder);
        renderer.recycle(&mut holder);
        assert_eq!(holder.recycled, ["title", "item"]);
    }

    #[test]
    fn bindings_are_recorded_under_the_renderer_id() {
        let renderer = sections();
        assert_eq!(renderer.group().layout, TITLE_LAYOUT);
        assert_eq!(renderer.subs().layout, ITEM_LAYOUT);
        assert_ne!(renderer.id(), sections().id());

        let data = renderer.view_data(&Section::new(1, 1, &[(10, 1)]));
        let mut holder = TestHolder::default();
        renderer.bind(&data, 1, &mut holder);
        assert_eq!(holder.bindings.get(renderer.id()), Some(super::SUBS_SLOT));
        renderer.bind(&data, 0, &mut holder);
        assert_eq!(holder.bindings.get(renderer.id()), Some(super::TITLE_SLOT));
        assert_eq!(holder.bindings.len(), 1);
    }

    #[test]
    fn recycle_without_bind_is_a_noop() {
        let mut holder = TestHolder::default();
        sections().recycle(&mut holder);
        assert!(holder.recycled.is_empty());
    }

    #[test]
    fn nested_groups_recycle_each_level() {
        let inner = sections();
        let outer = GroupItemRenderer::new(
            |_: &Vec<Section>| (0_u32, 0_usize),
            |s: &Vec<Section>| s.clone(),
            leaf("outer", 1),
            inner,
        );
        let content = vec![
            Section::new(1, 1, &[(10, 1)]),
            Section::new(2, 1, &[(20, 2)]),
        ];
        let data = outer.view_data(&content);
        assert_eq!(data.count(), 5);

        let mut holder = TestHolder::default();
        outer.bind(&data, 4, &mut holder);
        assert_eq!(holder.bound, [("item", 20, 1)]);
        assert_eq!(holder.bindings.len(), 2, "one record per nesting level");

        outer.recycle(&mut holder);
        assert_eq!(holder.recycled, ["item"]);
        assert!(holder.bindings.is_empty());
    }

    #[test]
    fn identical_snapshots_produce_no_changes() {
        let renderer = sections();
        for section in [
            Section::new(1, 1, &[(10, 1), (11, 1)]),
            Section::new(1, 2, &[(10, 3), (11, 0)]),
        ] {
            let data = renderer.view_data(&section);
            let actions = renderer.updates(&data, &data);
            assert_eq!(actions.len(), 1, "only the sub-item batch remains");
            assert!(actions.iter().all(UpdateAction::is_noop));
        }
    }

    #[test]
    fn appended_sub_item_is_inserted_after_the_header() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 3, &[(10, 1), (11, 1)]));
        let new = renderer.view_data(&Section::new(1, 3, &[(10, 1), (11, 1), (12, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(3, vec![UpdateAction::inserted(2, 1)])]
        );
    }

    #[test]
    fn resized_header_is_replaced_and_subs_keep_old_offset() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 2, &[(10, 1)]));
        let new = renderer.view_data(&Section::new(1, 4, &[(10, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [
                UpdateAction::removed(0, 2),
                UpdateAction::inserted(0, 4),
                UpdateAction::composite(2, vec![]),
            ]
        );
    }

    #[test]
    fn same_size_header_change_is_one_change() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 2, &[]));
        let new = renderer.view_data(&Section::new(2, 2, &[]));
        assert_eq!(
            renderer.updates(&old, &new),
            [
                UpdateAction::changed(0, 2),
                UpdateAction::composite(2, vec![]),
            ]
        );
    }

    #[test]
    fn empty_to_two_items_inserts_both() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 1, &[]));
        let new = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(1, vec![UpdateAction::inserted(0, 2)])]
        );
    }

    #[test]
    fn keyed_path_matches_items_by_key() {
        let renderer = sections().with_key_getter(KeyGetter::custom(|r: &Rows, _| {
            u64::from(r.tag % 10)
        }));
        let old = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 1)]));
        let new = renderer.view_data(&Section::new(1, 1, &[(19, 1), (10, 1), (21, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(
                1,
                vec![
                    UpdateAction::inserted(0, 1),
                    UpdateAction::composite(2, vec![UpdateAction::changed(0, 1)]),
                ]
            )]
        );
    }

    #[test]
    fn multi_row_items_take_the_positional_path() {
        // Same keys as above, but item 11 spans two rows, so keys are ignored.
        let renderer = sections().with_key_getter(KeyGetter::custom(|r: &Rows, _| {
            u64::from(r.tag % 10)
        }));
        let old = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 2)]));
        let new = renderer.view_data(&Section::new(1, 1, &[(19, 1), (10, 1), (21, 2)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(
                1,
                vec![
                    UpdateAction::composite(0, vec![UpdateAction::changed(0, 1)]),
                    UpdateAction::composite(
                        1,
                        vec![UpdateAction::removed(0, 2), UpdateAction::inserted(0, 1)]
                    ),
                    UpdateAction::inserted(2, 1),
                ]
            )]
        );
    }

    #[test]
    fn growing_an_item_past_one_row_takes_the_positional_path() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 1)]));
        let new = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 2), (12, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(
                1,
                vec![
                    UpdateAction::composite(0, vec![]),
                    UpdateAction::composite(
                        1,
                        vec![UpdateAction::removed(0, 1), UpdateAction::inserted(0, 2)]
                    ),
                    UpdateAction::inserted(2, 1),
                ]
            )]
        );
    }

    #[test]
    fn shrinking_a_multi_row_item_takes_the_positional_path() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 2), (12, 1)]));
        let new = renderer.view_data(&Section::new(1, 1, &[(10, 1), (11, 1)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(
                1,
                vec![
                    UpdateAction::composite(0, vec![]),
                    UpdateAction::composite(
                        1,
                        vec![UpdateAction::removed(0, 2), UpdateAction::inserted(0, 1)]
                    ),
                    UpdateAction::removed(2, 1),
                ]
            )]
        );
    }

    #[test]
    fn positional_path_removes_at_the_tail_in_items() {
        let renderer = sections();
        let old = renderer.view_data(&Section::new(1, 1, &[(10, 2), (11, 1), (12, 1)]));
        let new = renderer.view_data(&Section::new(1, 1, &[(10, 2)]));
        assert_eq!(
            renderer.updates(&old, &new),
            [UpdateAction::composite(
                1,
                vec![
                    UpdateAction::composite(0, vec![]),
                    UpdateAction::removed(1, 2),
                ]
            )]
        );
    }

    #[test]
    fn header_less_groups_use_the_empty_renderer() {
        let renderer = GroupItemRenderer::new(
            |_: &Vec<u32>| (),
            |v: &Vec<u32>| v.clone(),
            EmptyRenderer::new(),
            LayoutRenderer::new(ITEM_LAYOUT, |h: &mut TestHolder, c: &u32, i| {
                h.bound.push(("item", *c, i));
            }),
        );
        let data: GroupViewData<_, LayoutViewData<u32>> = renderer.view_data(&vec![4, 5]);
        assert_eq!(data.title_size(), 0);
        assert_eq!(data.count(), 2);

        let mut holder = TestHolder::default();
        renderer.bind(&data, 1, &mut holder);
        assert_eq!(holder.bound, [("item", 5, 0)]);

        let grown = renderer.view_data(&vec![4, 5, 6]);
        assert_eq!(
            renderer.updates(&data, &grown),
            [UpdateAction::composite(0, vec![UpdateAction::inserted(2, 1)])]
        );
    }
}
