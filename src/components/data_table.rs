//! Table building blocks that know nothing about reviews: a column model
//! rendered by [`DataTable`] and a measured, infinitely loading
//! [`VirtualTable`] driven by [`Virtualizer`].
use std::hash::Hash;

use leptos::html::Div;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::client::windowing::{reached_end, Virtualizer, ROW_HEIGHT_PX, VIEWPORT_PX, VIRTUAL_OVERSCAN};

/// One column: header text plus a cell renderer. `Ctx` is whatever the
/// cells share, such as the current search.
pub struct ColumnDef<Row, Ctx> {
    pub id: &'static str,
    pub header: &'static str,
    pub class: &'static str,
    pub cell: fn(&Row, Ctx) -> View,
}

impl<Row, Ctx> Clone for ColumnDef<Row, Ctx> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Row, Ctx> Copy for ColumnDef<Row, Ctx> {}

pub fn header_cells<Row, Ctx>(columns: &[ColumnDef<Row, Ctx>]) -> View {
    columns
        .iter()
        .map(|column| view! { <th class=column.class data-column=column.id>{column.header}</th> })
        .collect_view()
}

pub fn body_cells<Row, Ctx: Copy>(columns: &[ColumnDef<Row, Ctx>], row: &Row, ctx: Ctx) -> View {
    columns
        .iter()
        .map(|column| view! { <td class=column.class>{(column.cell)(row, ctx)}</td> })
        .collect_view()
}

/// Keyed table whose header and cells all come from `columns`.
#[component]
pub fn DataTable<Row, Ctx, K>(
    #[prop(into)] rows: Signal<Vec<Row>>,
    columns: Vec<ColumnDef<Row, Ctx>>,
    ctx: Ctx,
    row_key: fn(&Row) -> K,
    #[prop(into)] empty: ViewFn,
    #[prop(optional)] class: &'static str,
) -> impl IntoView
where
    Row: Clone + 'static,
    Ctx: Copy + 'static,
    K: Eq + Hash + 'static,
{
    let columns = store_value(columns);

    view! {
        <table class=class>
            <thead>
                <tr>{columns.with_value(|columns| header_cells(columns))}</tr>
            </thead>
            <tbody>
                <Show when=move || rows.with(|rows| !rows.is_empty()) fallback=empty>
                    <For
                        each=move || rows.get()
                        key=move |row| row_key(row)
                        children=move |row| view! { <tr>{columns.with_value(|columns| body_cells(columns, &row, ctx))}</tr> }
                    />
                </Show>
            </tbody>
        </table>
    }
}

/// Heights of the rendered `tr[data-index]` rows.
fn rendered_heights(container: &web_sys::Element) -> Vec<(usize, f64)> {
    let Ok(nodes) = container.query_selector_all("tr[data-index]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .filter_map(|row| {
            let index = row.get_attribute("data-index")?.parse().ok()?;
            Some((index, f64::from(row.offset_height())))
        })
        .collect()
}

/// Scrolling table that renders only the rows near the viewport, learns
/// their real heights, and asks for more rows once the last one shows.
/// `empty` is shown only when there are no rows and nothing left to fetch.
#[component]
pub fn VirtualTable<Row>(
    #[prop(into)] rows: Signal<Vec<Row>>,
    #[prop(into)] header: ViewFn,
    cells: Callback<Row, View>,
    #[prop(into)] has_next_page: Signal<bool>,
    #[prop(into)] is_fetching_next_page: Signal<bool>,
    on_fetch_next: Callback<()>,
    #[prop(into)] empty: ViewFn,
    colspan: usize,
    #[prop(optional)] class: &'static str,
) -> impl IntoView
where
    Row: Clone + 'static,
{
    let container = create_node_ref::<Div>();
    let (scroll_top, set_scroll_top) = create_signal(0.0_f64);
    let virtualizer = create_rw_signal(Virtualizer::new(0, ROW_HEIGHT_PX, VIRTUAL_OVERSCAN));

    create_effect(move |_| {
        let count = rows.with(Vec::len);
        virtualizer.update(|v| v.set_count(count));
    });

    let items = create_memo(move |_| virtualizer.with(|v| v.virtual_items(scroll_top.get(), VIEWPORT_PX)));

    let measure = move || {
        let Some(container) = container.get_untracked() else {
            return;
        };
        let heights = rendered_heights(&container);
        let stale = virtualizer.with_untracked(|v| heights.iter().any(|&(index, size)| v.size_of(index) != size));
        if stale {
            virtualizer.update(|v| {
                for (index, size) in heights {
                    v.measure(index, size);
                }
            });
        }
    };

    create_effect(move |_| {
        items.track();
        request_animation_frame(measure);
    });

    create_effect(move |_| {
        let count = rows.with(Vec::len);
        if items.with(|items| reached_end(items, count)) && has_next_page.get() && !is_fetching_next_page.get() {
            on_fetch_next.call(());
        }
    });

    let on_scroll = move |ev: ev::Event| {
        let el = event_target::<web_sys::Element>(&ev);
        set_scroll_top.set(f64::from(el.scroll_top()));
    };

    let body = move || {
        let items = items.get();
        let (padding_top, padding_bottom) = virtualizer.with(|v| v.spacers(&items));
        rows.with(|rows| {
            if rows.is_empty() && !has_next_page.get() {
                return empty.run();
            }
            let visible = items
                .iter()
                .filter_map(|item| {
                    let row = rows.get(item.index)?.clone();
                    Some(view! { <tr data-index=item.index>{cells.call(row)}</tr> })
                })
                .collect_view();
            view! {
                <tr class="spacer" style=format!("height: {padding_top}px")></tr>
                {visible}
                <tr class="spacer" style=format!("height: {padding_bottom}px")></tr>
                <Show when=move || is_fetching_next_page.get()>
                    <tr class="loader-row">
                        <td colspan=colspan class="loader">"Loading more..."</td>
                    </tr>
                </Show>
            }
            .into_view()
        })
    };

    view! {
        <div
            class="scroll-container"
            style=format!("height: {VIEWPORT_PX}px")
            node_ref=container
            on:scroll=on_scroll
        >
            <table class=class>
                <thead>{move || header.run()}</thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Fruit {
        id: u32,
        name: &'static str,
    }

    fn name_cell(fruit: &Fruit, shout: bool) -> View {
        if shout {
            fruit.name.to_uppercase().into_view()
        } else {
            fruit.name.into_view()
        }
    }

    fn fruit_id(fruit: &Fruit) -> u32 {
        fruit.id
    }

    fn fruit_columns() -> Vec<ColumnDef<Fruit, bool>> {
        vec![ColumnDef { id: "name", header: "Fruit", class: "col-name", cell: name_cell }]
    }

    fn render_table(fruits: Vec<Fruit>) -> String {
        leptos::ssr::render_to_string(move || {
            view! {
                <DataTable
                    rows=Signal::derive(move || fruits.clone())
                    columns=fruit_columns()
                    ctx=true
                    row_key=fruit_id
                    empty=|| view! { <tr><td>"Nothing here"</td></tr> }
                />
            }
        })
        .to_string()
    }

    #[test]
    fn test_data_table_renders_columns() {
        let html = render_table(vec![Fruit { id: 1, name: "pear" }, Fruit { id: 2, name: "fig" }]);
        assert!(html.contains("Fruit"));
        assert!(html.contains("data-column=\"name\""));
        assert!(html.contains("PEAR"));
        assert!(html.contains("FIG"));
        assert!(!html.contains("Nothing here"));
    }

    #[test]
    fn test_data_table_empty_fallback() {
        assert!(render_table(Vec::new()).contains("Nothing here"));
    }

    fn render_virtual(fruits: Vec<Fruit>, has_next_page: bool) -> String {
        leptos::ssr::render_to_string(move || {
            view! {
                <VirtualTable
                    rows=Signal::derive(move || fruits.clone())
                    header=|| view! { <tr><th>"Fruit"</th></tr> }
                    cells=Callback::new(|fruit: Fruit| view! { <td>{fruit.name}</td> }.into_view())
                    has_next_page=Signal::derive(move || has_next_page)
                    is_fetching_next_page=Signal::derive(|| false)
                    on_fetch_next=Callback::new(|_: ()| {})
                    empty=|| view! { <tr><td>"Nothing here"</td></tr> }
                    colspan=1
                />
            }
        })
        .to_string()
    }

    #[test]
    fn test_virtual_table_renders_first_rows() {
        let fruits = (0..50).map(|id| Fruit { id, name: "plum" }).collect();
        let html = render_virtual(fruits, false);
        assert!(html.contains("data-index=\"0\""));
        // 500px viewport of 100px rows plus overscan leaves the tail unrendered.
        assert!(!html.contains("data-index=\"49\""));
    }

    #[test]
    fn test_virtual_table_empty_only_when_exhausted() {
        assert!(render_virtual(Vec::new(), false).contains("Nothing here"));
        assert!(!render_virtual(Vec::new(), true).contains("Nothing here"));
    }
}
