use leptos::*;

use crate::components::cells::{EmptyState, RatingCell, ReviewTextCell};
use crate::components::columns::COLUMN_COUNT;
use crate::models::review::Review;
use crate::search::SearchFilter;

/// Plain `<table>` with hard-coded cells.
#[component]
pub fn NativeTable(
    #[prop(into)] rows: Signal<Vec<Review>>,
    #[prop(into)] search: Signal<SearchFilter>,
) -> impl IntoView {
    view! {
        <table class="reviews native">
            <thead>
                <tr>
                    <th class="col-id">"ID"</th>
                    <th class="col-rating">"Rating"</th>
                    <th class="col-text">"Review"</th>
                </tr>
            </thead>
            <tbody>
                <Show when=move || rows.with(|rows| !rows.is_empty()) fallback=|| view! { <EmptyState colspan=COLUMN_COUNT/> }>
                    <For
                        each=move || rows.get()
                        key=|review| review.id
                        children=move |review| {
                            view! {
                                <tr>
                                    <td class="col-id">{format!("#{}", review.id)}</td>
                                    <td class="col-rating">
                                        <RatingCell rating=review.rating/>
                                    </td>
                                    <td class="col-text">
                                        <ReviewTextCell review search/>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </Show>
            </tbody>
        </table>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    fn render(rows: Vec<Review>) -> String {
        leptos::ssr::render_to_string(move || {
            view! {
                <NativeTable
                    rows=Signal::derive(move || rows.clone())
                    search=Signal::derive(SearchFilter::default)
                />
            }
        })
        .to_string()
    }

    #[test]
    fn test_no_rows_renders_empty_state() {
        let html = render(Vec::new());
        assert!(html.contains("No reviews found"));
        assert!(!html.contains("Server not responding"));
    }

    #[test]
    fn test_rows_replace_empty_state() {
        let html = render(vec![Review { id: 7, text: "Lovely staff".into(), rating: 5 }]);
        assert!(html.contains("Lovely staff"));
        assert!(!html.contains("No reviews found"));
    }
}
