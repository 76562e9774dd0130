/// Main application entry point for Star Reviews.
/// The submission form lives at `/`, the review table at `/table`.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::review_form::ReviewForm;
use crate::components::reviews_table::ReviewsTable;
use crate::components::tab_presence::{provide_tab_hidden, TabPresence};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let hidden = provide_tab_hidden();

    view! {
        <Stylesheet id="leptos" href="/pkg/star-reviews.css"/>
        <TabPresence hidden/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=ReviewForm/>
                    <Route path="/table" view=ReviewsTable/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Leave a review"</A>
        </div>
    }
}
