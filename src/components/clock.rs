use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};
use leptos::logging::{error, log};
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use crate::client::clock::{
    floor_to_interval, format_date, format_time, next_tick_delay, Locale, LANGUAGE_KEY, SYNC_INTERVAL,
};
use crate::client::storage;
use crate::components::tab_presence::TabHidden;

fn time_text(ms: f64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(ms));
    format_time(date.get_hours(), date.get_minutes(), date.get_seconds())
}

fn date_text(ms: f64, locale: Locale) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(ms));
    format_date(locale, date.get_day(), date.get_date(), date.get_month())
}

/// Clock ticking on ten-second marks, with a language switch shared by all
/// tabs. Stops while the tab is hidden.
#[component]
pub fn Clock() -> impl IntoView {
    let locale = create_rw_signal(Locale::default());
    // Displayed instant in epoch milliseconds; unset until the browser starts it.
    let shown = create_rw_signal(None::<f64>);
    let first_tick = store_value(None::<TimeoutHandle>);
    let ticker = store_value(None::<IntervalHandle>);
    let hidden = use_context::<TabHidden>().map(|TabHidden(hidden)| hidden);

    let stop = move || {
        first_tick.update_value(|pending| {
            if let Some(handle) = pending.take() {
                handle.clear();
            }
        });
        ticker.update_value(|running| {
            if let Some(handle) = running.take() {
                handle.clear();
            }
        });
    };

    let start = move || {
        stop();
        let now = js_sys::Date::now();
        shown.set(Some(floor_to_interval(now, SYNC_INTERVAL)));

        let tick = move || shown.set(Some(floor_to_interval(js_sys::Date::now(), SYNC_INTERVAL)));
        let align = move || {
            tick();
            match set_interval_with_handle(tick, SYNC_INTERVAL) {
                Ok(handle) => ticker.set_value(Some(handle)),
                Err(err) => error!("[CLIENT] Could not start clock: {:?}", err),
            }
        };
        match set_timeout_with_handle(align, next_tick_delay(now, SYNC_INTERVAL)) {
            Ok(handle) => first_tick.set_value(Some(handle)),
            Err(err) => error!("[CLIENT] Could not sync clock: {:?}", err),
        }
    };

    // Browser only: saved language and changes made in other tabs.
    create_effect(move |_| {
        if let Some(saved) = storage::get_item(LANGUAGE_KEY).as_deref().and_then(Locale::from_code) {
            locale.set(saved);
        }
        let listener = window_event_listener_untyped("storage", move |ev| {
            let Ok(ev) = ev.dyn_into::<web_sys::StorageEvent>() else {
                return;
            };
            if ev.key().as_deref() != Some(LANGUAGE_KEY) {
                return;
            }
            if let Some(changed) = ev.new_value().as_deref().and_then(Locale::from_code) {
                log!("[CLIENT] Clock language changed in another tab: {}", changed.code());
                locale.set(changed);
            }
        });
        on_cleanup(move || {
            listener.remove();
            stop();
        });
    });

    create_effect(move |_| {
        if hidden.map_or(false, |hidden| hidden.get()) {
            stop();
        } else {
            start();
        }
    });

    let choose = move |chosen: Locale| {
        locale.set(chosen);
        storage::set_item(LANGUAGE_KEY, chosen.code());
    };

    view! {
        <div class="clock">
            <div class="clock-time">
                {move || shown.get().map_or_else(|| "--:--:--".to_owned(), time_text)}
            </div>
            <div class="clock-date">
                {move || shown.get().map(|ms| date_text(ms, locale.get())).unwrap_or_default()}
            </div>
            <div class="clock-languages">
                {Locale::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                type="button"
                                class=move || if locale.get() == option { "lang active" } else { "lang" }
                                on:click=move |_| choose(option)
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
