//! Cells shared by every table renderer, plus the review detail modal.
use leptos::*;

use crate::models::review::{Review, MAX_RATING};
use crate::search::SearchFilter;

/// Longer comments get a "More..." button opening the full text.
pub const PREVIEW_CHARS: usize = 160;

/// The review shown in the detail modal, provided by the table page.
#[derive(Clone, Copy)]
pub struct ActiveReview(pub RwSignal<Option<Review>>);

pub fn badge_class(rating: u8) -> &'static str {
    match rating {
        4.. => "badge good",
        3 => "badge neutral",
        _ => "badge bad",
    }
}

pub fn is_long(text: &str) -> bool {
    text.chars().count() > PREVIEW_CHARS
}

#[component]
pub fn StarRating(rating: u8) -> impl IntoView {
    view! {
        <span class="star-rating" aria-hidden="true">
            {(1..=MAX_RATING)
                .map(|star| {
                    let class = if star <= rating { "star filled" } else { "star" };
                    view! { <span class=class>"★"</span> }
                })
                .collect_view()}
        </span>
    }
}

#[component]
pub fn RatingCell(rating: u8) -> impl IntoView {
    view! {
        <div class="rating-cell">
            <span class=badge_class(rating)>{format!("{rating} / {MAX_RATING}")}</span>
            <StarRating rating/>
        </div>
    }
}

/// `text` with every match of the current search wrapped in `<mark>`.
#[component]
pub fn HighlightedText(#[prop(into)] text: String, #[prop(into)] search: Signal<SearchFilter>) -> impl IntoView {
    move || {
        search
            .with(|filter| filter.segments(&text))
            .into_iter()
            .map(|segment| {
                if segment.highlighted {
                    view! { <mark>{segment.text}</mark> }.into_view()
                } else {
                    segment.text.into_view()
                }
            })
            .collect_view()
    }
}

#[component]
pub fn ReviewTextCell(review: Review, #[prop(into)] search: Signal<SearchFilter>) -> impl IntoView {
    if review.text.is_empty() {
        return view! { <span class="no-comment">"No comment"</span> }.into_view();
    }
    let active = use_context::<ActiveReview>();
    let more = is_long(&review.text).then(|| {
        let review = review.clone();
        view! {
            <button
                class="more"
                on:click=move |_| {
                    if let Some(ActiveReview(active)) = active {
                        active.set(Some(review.clone()));
                    }
                }
            >
                "More..."
            </button>
        }
    });

    view! {
        <div class="text-cell">
            <p class="preview">
                <HighlightedText text=review.text search/>
            </p>
            {more}
        </div>
    }
    .into_view()
}

/// Placeholder row for an empty result set.
#[component]
pub fn EmptyState(colspan: usize) -> impl IntoView {
    view! {
        <tr class="empty-state">
            <td colspan=colspan>"No reviews found"</td>
        </tr>
    }
}

/// Full text of the active review. Closes on the backdrop or the button.
#[component]
pub fn ReviewModal(#[prop(into)] search: Signal<SearchFilter>) -> impl IntoView {
    let ActiveReview(active) = expect_context::<ActiveReview>();
    let close = move |_| active.set(None);

    move || {
        active.get().map(|review| {
            view! {
                <div class="modal-backdrop" on:click=close>
                    <div class="modal review-modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                        <header>
                            <h2>{format!("Review #{}", review.id)}</h2>
                            <RatingCell rating=review.rating/>
                        </header>
                        <p class="full-text">
                            <HighlightedText text=review.text search/>
                        </p>
                        <button on:click=close>"Close"</button>
                    </div>
                </div>
            }
        })
    }
}
