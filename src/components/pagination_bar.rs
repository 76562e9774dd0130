use leptos::*;

use crate::client::store::TableSettings;

#[component]
pub fn PaginationBar(#[prop(into)] total: Signal<u64>, #[prop(into)] total_pages: Signal<u32>) -> impl IntoView {
    let settings = expect_context::<RwSignal<TableSettings>>();
    let page = move || settings.with(|s| s.page);

    view! {
        <nav class="pagination">
            <button
                disabled=move || page() <= 1
                on:click=move |_| settings.update(|s| s.set_page(s.page.saturating_sub(1)))
            >
                "Previous"
            </button>
            <span class="page-info">
                {move || format!("Page {} of {} ({} reviews)", page(), total_pages.get(), total.get())}
            </span>
            <button
                disabled=move || page() >= total_pages.get()
                on:click=move |_| settings.update(|s| s.set_page(s.page + 1))
            >
                "Next"
            </button>
        </nav>
    }
}
