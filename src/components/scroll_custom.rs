use leptos::*;

use crate::client::windowing::{near_bottom, ManualWindow, ROW_HEIGHT_PX, VIEWPORT_PX};
use crate::components::cells::EmptyState;
use crate::components::columns::{header_row, row_cells, COLUMN_COUNT};
use crate::models::review::Review;
use crate::search::SearchFilter;

/// Infinite scroll with hand-rolled windowing over fixed-height rows.
#[component]
pub fn ScrollCustom(
    #[prop(into)] rows: Signal<Vec<Review>>,
    #[prop(into)] search: Signal<SearchFilter>,
    #[prop(into)] has_next_page: Signal<bool>,
    #[prop(into)] is_fetching_next_page: Signal<bool>,
    #[prop(into)] column_model: Signal<bool>,
    on_fetch_next: Callback<()>,
) -> impl IntoView {
    let (scroll_top, set_scroll_top) = create_signal(0.0_f64);
    let window = create_memo(move |_| {
        ManualWindow::compute(scroll_top.get(), rows.with(Vec::len), has_next_page.get())
    });

    let request_more = move || {
        if has_next_page.get_untracked() && !is_fetching_next_page.get_untracked() {
            on_fetch_next.call(());
        }
    };

    let on_scroll = move |ev: ev::Event| {
        let el = event_target::<web_sys::Element>(&ev);
        let top = f64::from(el.scroll_top());
        set_scroll_top.set(top);
        if near_bottom(f64::from(el.scroll_height()), top, f64::from(el.client_height())) {
            request_more();
        }
    };

    // A short list never scrolls, so keep loading until the viewport is full.
    create_effect(move |_| {
        let height = rows.with(Vec::len) as f64 * ROW_HEIGHT_PX;
        if height < VIEWPORT_PX && has_next_page.get() && !is_fetching_next_page.get() {
            request_more();
        }
    });

    let body = move || {
        let ManualWindow { start, end, padding_top, padding_bottom } = window.get();
        let column_model = column_model.get();
        rows.with(|rows| {
            if rows.is_empty() && !has_next_page.get() {
                return view! { <EmptyState colspan=COLUMN_COUNT/> }.into_view();
            }
            let visible = rows[start..end]
                .iter()
                .map(|review| {
                    view! {
                        <tr class="fixed-row" style=format!("height: {ROW_HEIGHT_PX}px")>
                            {row_cells(review, search, column_model)}
                        </tr>
                    }
                })
                .collect_view();
            view! {
                <tr class="spacer" style=format!("height: {padding_top}px")></tr>
                {visible}
                <tr class="spacer" style=format!("height: {padding_bottom}px")>
                    <td colspan=COLUMN_COUNT class="loader">
                        {move || is_fetching_next_page.get().then_some("Loading more...")}
                    </td>
                </tr>
            }
            .into_view()
        })
    };

    view! {
        <div class="scroll-container" style=format!("height: {VIEWPORT_PX}px") on:scroll=on_scroll>
            <table class="reviews scroll-custom">
                <thead>{move || header_row(column_model.get())}</thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}
