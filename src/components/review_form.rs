use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen::JsCast;

use crate::client::draft::{
    star_class, ReviewDraft, CLOSE_TABS_KEY, RATING_KEY, REDIRECT_SECONDS, TEXT_KEY, TEXT_SYNC_DELAY,
};
use crate::client::fetch::{submit_review, TABLE_URL};
use crate::client::storage;
use crate::components::clock::Clock;
use crate::models::review::MAX_RATING;

fn parse_rating(raw: Option<String>) -> u8 {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(0)
}

fn store_rating(rating: u8) {
    if rating == 0 {
        storage::remove_item(RATING_KEY);
    } else {
        storage::set_item(RATING_KEY, &rating.to_string());
    }
}

/// Forgets the draft everywhere and tells the other tabs to close.
fn finish_draft() {
    storage::remove_item(RATING_KEY);
    storage::remove_item(TEXT_KEY);
    storage::set_item(CLOSE_TABS_KEY, &js_sys::Date::now().to_string());
}

fn alert(message: &str) {
    if let Some(Err(err)) = web_sys::window().map(|window| window.alert_with_message(message)) {
        error!("[CLIENT] Could not show alert: {:?}", err);
    }
}

/// Scripts may only close tabs they opened, so this can quietly do nothing.
fn close_tab() {
    if let Some(Err(err)) = web_sys::window().map(|window| window.close()) {
        error!("[CLIENT] Could not close tab: {:?}", err);
    }
}

/// Star picker plus comment box. The draft survives reloads and is mirrored
/// across tabs through local storage.
#[component]
pub fn ReviewForm() -> impl IntoView {
    let draft = create_rw_signal(ReviewDraft::default());
    let (sending, set_sending) = create_signal(false);
    let (sent, set_sent) = create_signal(false);
    let text_sync = store_value(None::<TimeoutHandle>);

    let cancel_text_sync = move || {
        text_sync.update_value(|pending| {
            if let Some(handle) = pending.take() {
                handle.clear();
            }
        });
    };

    // Browser only: restore the saved draft and follow the other tabs.
    create_effect(move |_| {
        draft.set(ReviewDraft::restore(
            storage::get_item(RATING_KEY).as_deref(),
            storage::get_item(TEXT_KEY),
        ));

        let listener = window_event_listener_untyped("storage", move |ev| {
            let Ok(ev) = ev.dyn_into::<web_sys::StorageEvent>() else {
                return;
            };
            match ev.key().as_deref() {
                Some(RATING_KEY) => draft.update(|d| {
                    d.set_rating(parse_rating(ev.new_value()));
                }),
                Some(TEXT_KEY) => draft.update(|d| d.set_text(ev.new_value().unwrap_or_default())),
                Some(CLOSE_TABS_KEY) => {
                    log!("[CLIENT] Review sent from another tab, closing");
                    close_tab();
                }
                _ => {}
            }
        });
        on_cleanup(move || listener.remove());
    });

    let pick_star = move |star: u8| {
        cancel_text_sync();
        draft.update(|d| d.pick_star(star));
        store_rating(draft.with_untracked(ReviewDraft::rating));
        storage::remove_item(TEXT_KEY);
    };

    let on_input = move |ev: ev::Event| {
        draft.update(|d| d.set_text(event_target_value(&ev)));
        cancel_text_sync();
        let save = move || {
            let text = draft.with_untracked(|d| d.text().to_owned());
            storage::set_item(TEXT_KEY, &text);
        };
        match set_timeout_with_handle(save, TEXT_SYNC_DELAY) {
            Ok(handle) => text_sync.set_value(Some(handle)),
            Err(err) => error!("[CLIENT] Could not schedule draft save: {:?}", err),
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() || !draft.with_untracked(ReviewDraft::can_submit) {
            return;
        }
        let review = draft.with_untracked(ReviewDraft::to_new_review);
        set_sending.set(true);
        spawn_local(async move {
            let result = submit_review(&review).await;
            cancel_text_sync();
            finish_draft();
            draft.set(ReviewDraft::default());
            set_sending.set(false);
            match result {
                Ok(created) => {
                    log!("[CLIENT] Review #{} sent", created.id);
                    set_sent.set(true);
                }
                Err(err) => {
                    error!("[CLIENT] Failed to send review: {}", err);
                    alert("Failed to send review");
                }
            }
        });
    };

    let placeholder = move || {
        if draft.with(ReviewDraft::requires_text) {
            "What went wrong? A comment is required for 3 stars or fewer"
        } else {
            "Anything to add? (optional)"
        }
    };

    view! {
        <div class="review-page">
            <Clock/>
            <form class="review-form" on:submit=on_submit>
                <h1>"How was it?"</h1>
                <div class="stars" role="radiogroup">
                    {(1..=MAX_RATING)
                        .map(|star| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        format!("star {}", star_class(star, draft.with(ReviewDraft::rating)))
                                    }
                                    aria-label=format!("{star} of {MAX_RATING}")
                                    on:click=move |_| pick_star(star)
                                >
                                    "★"
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <textarea
                    class="review-text"
                    rows="5"
                    placeholder=placeholder
                    prop:value=move || draft.with(|d| d.text().to_owned())
                    on:input=on_input
                ></textarea>
                <button
                    type="submit"
                    class="submit"
                    disabled=move || sending.get() || !draft.with(ReviewDraft::can_submit)
                >
                    {move || if sending.get() { "Sending..." } else { "Send review" }}
                </button>
                <A href=TABLE_URL class="table-link">"See all reviews"</A>
            </form>
            <Show when=move || sent.get()>
                <SentDialog/>
            </Show>
        </div>
    }
}

/// Thanks dialog. Either counts down to the review table or, after "Stay
/// here", tries to close the tab.
#[component]
fn SentDialog() -> impl IntoView {
    let (staying, set_staying) = create_signal(false);
    let stay = Callback::new(move |_: ()| {
        log!("[CLIENT] Staying, closing tab");
        close_tab();
        set_staying.set(true);
    });

    view! {
        <div class="modal-backdrop">
            <div class="modal sent-dialog" role="dialog">
                <Show
                    when=move || staying.get()
                    fallback=move || view! { <RedirectCountdown on_stay=stay/> }
                >
                    <h2>"Done"</h2>
                    <p>"You can close this tab manually."</p>
                </Show>
            </div>
        </div>
    }
}

/// Redirects to the table when the countdown runs out. Unmounting stops it.
#[component]
fn RedirectCountdown(on_stay: Callback<()>) -> impl IntoView {
    let navigate = use_navigate();
    let (seconds_left, set_seconds_left) = create_signal(REDIRECT_SECONDS);

    create_effect(move |_| {
        let tick = move || set_seconds_left.update(|left| *left = left.saturating_sub(1));
        match set_interval_with_handle(tick, Duration::from_secs(1)) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(err) => error!("[CLIENT] Could not start redirect countdown: {:?}", err),
        }
    });

    let redirect = navigate.clone();
    create_effect(move |_| {
        if seconds_left.get() == 0 {
            redirect(TABLE_URL, Default::default());
        }
    });

    view! {
        <h2>"Thank you!"</h2>
        <p>"Your review has been sent."</p>
        <p class="countdown">{move || format!("Opening all reviews in {} s", seconds_left.get())}</p>
        <div class="actions">
            <button on:click=move |_| navigate(TABLE_URL, Default::default())>"Go to reviews"</button>
            <button class="secondary" on:click=move |_| on_stay.call(())>
                "Stay here"
            </button>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use leptos_router::{RouterIntegrationContext, ServerIntegration};

    fn render_dialog() -> String {
        leptos::ssr::render_to_string(|| {
            provide_context(RouterIntegrationContext::new(ServerIntegration {
                path: "http://localhost/".to_string(),
            }));
            view! { <leptos_router::Router><SentDialog/></leptos_router::Router> }
        })
        .to_string()
    }

    #[test]
    fn test_sent_dialog_offers_redirect_and_stay() {
        let html = render_dialog();
        assert!(html.contains("Thank you!"));
        assert!(html.contains("Stay here"));
        assert!(!html.contains("You can close this tab manually."));
    }
}
