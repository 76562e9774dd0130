//! Review columns for the column-model renderers, plus the hard-coded
//! cells the other renderers use when the column model is off.
use leptos::*;

use crate::components::cells::{RatingCell, ReviewTextCell};
use crate::components::data_table::{body_cells, header_cells, ColumnDef};
use crate::models::review::Review;
use crate::search::SearchFilter;

pub type ReviewColumn = ColumnDef<Review, Signal<SearchFilter>>;

pub fn review_id(review: &Review) -> i64 {
    review.id
}

fn id_cell(review: &Review, _search: Signal<SearchFilter>) -> View {
    format!("#{}", review.id).into_view()
}

fn rating_cell(review: &Review, _search: Signal<SearchFilter>) -> View {
    view! { <RatingCell rating=review.rating/> }.into_view()
}

fn text_cell(review: &Review, search: Signal<SearchFilter>) -> View {
    view! { <ReviewTextCell review=review.clone() search/> }.into_view()
}

pub fn review_columns() -> [ReviewColumn; COLUMN_COUNT] {
    [
        ColumnDef { id: "id", header: "ID", class: "col-id", cell: id_cell },
        ColumnDef { id: "rating", header: "Rating", class: "col-rating", cell: rating_cell },
        ColumnDef { id: "text", header: "Review", class: "col-text", cell: text_cell },
    ]
}

pub const COLUMN_COUNT: usize = 3;

/// Header row, either from the column model or hard-coded.
pub fn header_row(column_model: bool) -> View {
    if column_model {
        view! { <tr>{header_cells(&review_columns())}</tr> }.into_view()
    } else {
        view! {
            <tr>
                <th class="col-id">"ID"</th>
                <th class="col-rating">"Rating"</th>
                <th class="col-text">"Review"</th>
            </tr>
        }
        .into_view()
    }
}

/// The `<td>`s of one row, either from the column model or hard-coded.
pub fn row_cells(review: &Review, search: Signal<SearchFilter>, column_model: bool) -> View {
    if column_model {
        body_cells(&review_columns(), review, search)
    } else {
        view! {
            <td class="col-id">{format!("#{}", review.id)}</td>
            <td class="col-rating">
                <RatingCell rating=review.rating/>
            </td>
            <td class="col-text">
                <ReviewTextCell review=review.clone() search/>
            </td>
        }
        .into_view()
    }
}
