// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped list demo: sections of items, each with a title row.
//!
//! Builds a two-level list (a page of sections, each a title plus its items),
//! binds every row into a printing holder, then edits the model and prints the
//! resolved updates a list widget would apply.
//!
//! Run:
//! - `cargo run -p understory_demos --example grouped_list`

use understory_renderer::{
    GroupItemRenderer, KeyGetter, LayoutRenderer, LayoutViewData, ListUpdate, RecycleBindings,
    RendererAdapter, ViewHolder, dispatch_updates,
};

const PAGE_HEADER: u32 = 1;
const SECTION_TITLE: u32 = 2;
const ITEM: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
struct ItemModel {
    id: u64,
    title: String,
    content: String,
}

fn item_model(index: u64) -> ItemModel {
    ItemModel {
        id: index,
        title: format!("Title {index}"),
        content: format!("This is Content {index}"),
    }
}

fn gen_list(start: u64, count: u64) -> Vec<ItemModel> {
    (start..start + count).map(item_model).collect()
}

#[derive(Clone, Debug)]
struct Section {
    name: String,
    items: Vec<ItemModel>,
}

#[derive(Clone, Debug)]
struct Page {
    header: String,
    sections: Vec<Section>,
}

/// A row that remembers the last text bound into it.
#[derive(Debug, Default)]
struct TextRow {
    text: String,
    bindings: RecycleBindings,
}

impl ViewHolder for TextRow {
    fn recycle_bindings(&mut self) -> &mut RecycleBindings {
        &mut self.bindings
    }
}

fn main() {
    let section = GroupItemRenderer::new(
        |s: &Section| s.name.clone(),
        |s: &Section| s.items.clone(),
        LayoutRenderer::new(SECTION_TITLE, |row: &mut TextRow, name: &String, _| {
            row.text = format!("== {name} ==");
        }),
        LayoutRenderer::new(ITEM, |row: &mut TextRow, item: &ItemModel, _| {
            row.text = format!("{}: {}", item.title, item.content);
        })
        .with_stable_id(|item, _| item.id)
        .with_recycle(|row: &mut TextRow| row.text.clear()),
    )
    .with_key_getter(KeyGetter::custom(|d: &LayoutViewData<ItemModel>, _| {
        d.content().id
    }));

    let page = GroupItemRenderer::new(
        |p: &Page| p.header.clone(),
        |p: &Page| p.sections.clone(),
        LayoutRenderer::new(PAGE_HEADER, |row: &mut TextRow, header: &String, _| {
            row.text = header.to_uppercase();
        }),
        section,
    );

    let mut model = Page {
        header: "inbox".into(),
        sections: vec![
            Section {
                name: "Today".into(),
                items: gen_list(0, 3),
            },
            Section {
                name: "Earlier".into(),
                items: gen_list(10, 2),
            },
        ],
    };

    let mut adapter = RendererAdapter::new(page, &model);
    print_rows(&mut adapter);

    // Edit one item, drop another, and add a new section at the end.
    model.sections[0].items[1].content = "Edited".into();
    model.sections[1].items.remove(0);
    model.sections.push(Section {
        name: "Archive".into(),
        items: gen_list(20, 1),
    });

    let actions = adapter.set_content(&model);
    let mut updates: Vec<ListUpdate> = Vec::new();
    dispatch_updates(&actions, &mut updates);
    println!("updates:");
    for update in &updates {
        println!(
            "  {:?} at {} x{}",
            update.kind, update.position, update.count
        );
    }

    print_rows(&mut adapter);
}

fn print_rows<T, R>(adapter: &mut RendererAdapter<T, TextRow, R>)
where
    R: understory_renderer::Renderer<T, TextRow>,
{
    let mut row = TextRow::default();
    for position in 0..adapter.item_count() {
        let view_type = adapter.item_view_type(position);
        adapter.bind(position, &mut row);
        println!(
            "{position:>3} [{view_type}] id={:?} {}",
            adapter.item_id(position),
            row.text
        );
        adapter.recycle(&mut row);
    }
}
