use leptos::*;

use crate::components::cells::EmptyState;
use crate::components::columns::{review_columns, review_id, COLUMN_COUNT};
use crate::components::data_table::DataTable;
use crate::models::review::Review;
use crate::search::SearchFilter;

/// The review table rendered through the generic column-model table.
#[component]
pub fn ColumnTable(
    #[prop(into)] rows: Signal<Vec<Review>>,
    #[prop(into)] search: Signal<SearchFilter>,
) -> impl IntoView {
    view! {
        <DataTable
            rows
            columns=review_columns().to_vec()
            ctx=search
            row_key=review_id
            empty=|| view! { <EmptyState colspan=COLUMN_COUNT/> }
            class="reviews column-model"
        />
    }
}
