use std::time::Duration;

use leptos::html::Div;
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::A;

use crate::client::review_data::{use_review_data, LoadStatus};
use crate::client::store::{TableSettings, ViewMode, MIN_AUTO_LIMIT};
use crate::client::windowing::auto_limit;
use crate::components::cells::{ActiveReview, ReviewModal};
use crate::components::column_table::ColumnTable;
use crate::components::native_table::NativeTable;
use crate::components::pagination_bar::PaginationBar;
use crate::components::scroll_custom::ScrollCustom;
use crate::components::scroll_virtual::ScrollVirtual;
use crate::components::settings_panel::SettingsPanel;

const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);
const DEFAULT_ROOT_FONT_PX: f64 = 16.0;

fn root_font_px() -> f64 {
    let Some(window) = web_sys::window() else {
        return DEFAULT_ROOT_FONT_PX;
    };
    window
        .document()
        .and_then(|document| document.document_element())
        .and_then(|root| window.get_computed_style(&root).ok().flatten())
        .and_then(|style| style.get_property_value("font-size").ok())
        .and_then(|size| size.trim().trim_end_matches("px").parse().ok())
        .unwrap_or(DEFAULT_ROOT_FONT_PX)
}

/// Class and text shown in place of the table, if any.
fn status_notice(status: LoadStatus) -> Option<(&'static str, &'static str)> {
    match status {
        LoadStatus::Failed => Some(("status error", "Server not responding")),
        LoadStatus::Loading => Some(("status loading", "Loading...")),
        LoadStatus::Ready => None,
    }
}

/// The review browser: settings, one of four renderers, pagination and the
/// detail modal.
#[component]
pub fn ReviewsTable() -> impl IntoView {
    let settings = create_rw_signal(TableSettings::default());
    provide_context(settings);
    provide_context(ActiveReview(create_rw_signal(None)));

    let data = use_review_data(settings);
    let status = create_memo(move |_| data.status.get());
    let view_mode = create_memo(move |_| settings.with(TableSettings::view_mode));
    let search = create_memo(move |_| settings.with(TableSettings::search_filter));
    let column_model = create_memo(move |_| settings.with(|s| s.column_model));
    let infinite = create_memo(move |_| settings.with(|s| s.infinite));

    // Page size follows the height of the table area.
    let area = create_node_ref::<Div>();
    let fit = move || {
        let Some(area) = area.get_untracked() else {
            return;
        };
        let limit = auto_limit(f64::from(area.client_height()), root_font_px(), MIN_AUTO_LIMIT);
        if settings.with_untracked(|s| s.limit) != limit {
            log!("[CLIENT] Page size fitted to {}", limit);
            settings.update(|s| s.set_limit(limit));
        }
    };
    area.on_load(move |_| request_animation_frame(fit));

    let pending_fit = store_value(None::<TimeoutHandle>);
    create_effect(move |_| {
        let resize = window_event_listener(ev::resize, move |_| {
            pending_fit.update_value(|pending| {
                if let Some(handle) = pending.take() {
                    handle.clear();
                }
            });
            match set_timeout_with_handle(fit, RESIZE_DEBOUNCE) {
                Ok(handle) => pending_fit.set_value(Some(handle)),
                Err(err) => error!("[CLIENT] Could not schedule resize: {:?}", err),
            }
        });
        on_cleanup(move || resize.remove());
    });

    let table = move || match status_notice(status.get()) {
        Some((class, text)) => view! { <div class=class>{text}</div> }.into_view(),
        None => match view_mode.get() {
            ViewMode::Native => view! { <NativeTable rows=data.rows search/> }.into_view(),
            ViewMode::ColumnModel => view! { <ColumnTable rows=data.rows search/> }.into_view(),
            ViewMode::ScrollCustom => view! {
                <ScrollCustom
                    rows=data.rows
                    search
                    has_next_page=data.has_next_page
                    is_fetching_next_page=data.is_fetching_next_page
                    column_model
                    on_fetch_next=data.fetch_next
                />
            }
            .into_view(),
            ViewMode::ScrollVirtual => view! {
                <ScrollVirtual
                    rows=data.rows
                    search
                    has_next_page=data.has_next_page
                    is_fetching_next_page=data.is_fetching_next_page
                    column_model
                    on_fetch_next=data.fetch_next
                />
            }
            .into_view(),
        },
    };

    view! {
        <div class="table-page">
            <header class="table-header">
                <h1>"Reviews"</h1>
                <A href="/" class="table-link">"Leave a review"</A>
            </header>
            <SettingsPanel/>
            <div class="table-area" node_ref=area>{table}</div>
            <Show when=move || !infinite.get()>
                <PaginationBar total=data.total total_pages=data.total_pages/>
            </Show>
            <ReviewModal search/>
        </div>
    }
}
