use leptos::logging::error;
use leptos::*;
use leptos_meta::{Link, Title};

use crate::client::presence::{presence, ACTIVE_FAVICON, FAVICON_ID};

/// `true` while the tab is in the background. Provided by the app root.
#[derive(Clone, Copy)]
pub struct TabHidden(pub ReadSignal<bool>);

fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .map_or(false, |document| document.hidden())
}

fn set_favicon(href: &str) {
    let Some(link) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(FAVICON_ID))
    else {
        return;
    };
    if let Err(err) = link.set_attribute("href", href) {
        error!("[CLIENT] Could not swap favicon: {:?}", err);
    }
}

/// Tracks page visibility and shares it through [`TabHidden`].
pub fn provide_tab_hidden() -> ReadSignal<bool> {
    let (hidden, set_hidden) = create_signal(false);
    provide_context(TabHidden(hidden));

    // Browser only.
    create_effect(move |_| {
        set_hidden.set(document_hidden());
        let listener = window_event_listener_untyped("visibilitychange", move |_| {
            set_hidden.set(document_hidden());
        });
        on_cleanup(move || listener.remove());
    });

    hidden
}

/// Favicon and title that change while the tab is hidden.
#[component]
pub fn TabPresence(hidden: ReadSignal<bool>) -> impl IntoView {
    create_effect(move |_| {
        let (href, _) = presence(hidden.get());
        set_favicon(href);
    });

    view! {
        <Link id=FAVICON_ID rel="icon" href=ACTIVE_FAVICON/>
        <Title text=move || presence(hidden.get()).1/>
    }
}
