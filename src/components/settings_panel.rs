use leptos::*;

use crate::client::store::{DataSource, TableSettings};

#[component]
fn Toggle(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <label class="toggle">
            <input type="checkbox" prop:checked=checked on:change=move |_| on_toggle.call(())/>
            {label}
        </label>
    }
}

/// Search box and the view/source switches of the table page.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let settings = expect_context::<RwSignal<TableSettings>>();
    let flag = move |read: fn(&TableSettings) -> bool| Signal::derive(move || settings.with(read));
    let action = move |apply: fn(&mut TableSettings)| Callback::new(move |_: ()| settings.update(apply));

    view! {
        <div class="settings-panel">
            <input
                type="search"
                class="search"
                placeholder="Search reviews"
                prop:value=move || settings.with(|s| s.search.clone())
                on:input=move |ev| {
                    let search = event_target_value(&ev);
                    settings.update(|s| s.set_search(search));
                }
            />
            <div class="toggles">
                <Toggle label="Exact match" checked=flag(|s| s.exact) on_toggle=action(TableSettings::toggle_exact)/>
                <Toggle
                    label="Case sensitive"
                    checked=flag(|s| s.case_sensitive)
                    on_toggle=action(TableSettings::toggle_case_sensitive)
                />
                <Toggle label="Infinite scroll" checked=flag(|s| s.infinite) on_toggle=action(TableSettings::toggle_infinite)/>
                <Show when=move || settings.with(|s| s.infinite)>
                    <Toggle
                        label="Virtualized"
                        checked=flag(|s| s.virtualized)
                        on_toggle=action(TableSettings::toggle_virtualized)
                    />
                </Show>
                <Toggle
                    label="Column model"
                    checked=flag(|s| s.column_model)
                    on_toggle=action(TableSettings::toggle_column_model)
                />
                <Toggle
                    label="Filter locally"
                    checked=flag(|s| s.source == DataSource::Local)
                    on_toggle=action(TableSettings::toggle_source)
                />
            </div>
            <button class="secondary" on:click=move |_| settings.update(TableSettings::reset_filters)>
                "Reset filters"
            </button>
        </div>
    }
}
