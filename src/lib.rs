//! Star reviews: submit a 1-5 star rating with an optional comment, then
//! browse every review in a searchable table.
//!
//! The server half (`ssr`) is an actix-web app with a SQLite store and a JSON
//! API under `/api/reviews`. The browser half (`hydrate`/`csr`) is a Leptos
//! app with two pages: the submission form at `/` and the table at `/table`.
pub mod app;
pub mod client;
pub mod components;
pub mod models;
pub mod search;
pub mod utils;

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod db;
#[cfg(feature = "ssr")]
pub mod error;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    utils::panic_hook::init();
    leptos::mount_to_body(app::App);
}
