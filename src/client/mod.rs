//! Browser-side state and data plumbing. Everything except `fetch`,
//! `storage` and `review_data` is plain Rust and unit tested natively.
pub mod clock;
pub mod draft;
pub mod fetch;
pub mod pipeline;
pub mod presence;
pub mod review_data;
pub mod storage;
pub mod store;
pub mod windowing;
