//! `localStorage` access. Failures (private mode, quota, no window during
//! SSR) are logged and otherwise ignored.
use leptos::logging::error;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn set_item(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        error!("[CLIENT] localStorage unavailable, could not save {}", key);
        return;
    };
    if let Err(err) = storage.set_item(key, value) {
        error!("[CLIENT] Failed to save {}: {:?}", key, err);
    }
}

pub fn remove_item(key: &str) {
    if let Some(Err(err)) = local_storage().map(|storage| storage.remove_item(key)) {
        error!("[CLIENT] Failed to remove {}: {:?}", key, err);
    }
}
