use std::panic;
use leptos::logging::log;

/// Sets up a panic hook that forwards to the browser console and adds context
/// for panics raised by signals touched after their owner was disposed.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(move |panic_info| {
        // Print the full panic to the console first
        console_error_panic_hook::hook(panic_info);

        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("disposed") {
            log!("[PANIC] A reactive value was used after its owner was disposed. This usually happens when:");
            log!("[PANIC] 1. A fetch resolved after the table or form page was left");
            log!("[PANIC] 2. A timer (text autosave, redirect countdown, resize debounce) fired after unmount");
        }
    }));
}

/// Call at hydration or client-side start-up
pub fn init() {
    set_custom_panic_hook();
    log!("[PANIC_HOOK] Custom panic hook set up successfully");
}
