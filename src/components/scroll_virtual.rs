use leptos::*;

use crate::components::cells::EmptyState;
use crate::components::columns::{header_row, row_cells, COLUMN_COUNT};
use crate::components::data_table::VirtualTable;
use crate::models::review::Review;
use crate::search::SearchFilter;

/// Infinite scroll over the generic virtualized table.
#[component]
pub fn ScrollVirtual(
    #[prop(into)] rows: Signal<Vec<Review>>,
    #[prop(into)] search: Signal<SearchFilter>,
    #[prop(into)] has_next_page: Signal<bool>,
    #[prop(into)] is_fetching_next_page: Signal<bool>,
    #[prop(into)] column_model: Signal<bool>,
    on_fetch_next: Callback<()>,
) -> impl IntoView {
    let cells = Callback::new(move |review: Review| row_cells(&review, search, column_model.get()));

    view! {
        <VirtualTable
            rows
            header=move || header_row(column_model.get())
            cells
            has_next_page
            is_fetching_next_page
            on_fetch_next
            empty=|| view! { <EmptyState colspan=COLUMN_COUNT/> }
            colspan=COLUMN_COUNT
            class="reviews scroll-virtual"
        />
    }
}
