use gloo_net::http::{Request, Response};
use leptos::logging::{error, log, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::review::{NewReview, Review, ReviewPage, ReviewQuery, MAX_PAGE_SIZE};

pub const REVIEWS_ENDPOINT: &str = "/api/reviews";
pub const TABLE_URL: &str = "/table";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Unreadable response: {0}")]
    Decode(String),
}

pub fn list_url(query: &ReviewQuery) -> String {
    format!("{REVIEWS_ENDPOINT}?{}", query.to_query_string())
}

pub async fn fetch_reviews(query: &ReviewQuery) -> Result<ReviewPage, FetchError> {
    let url = list_url(query);
    log!("[CLIENT] GET {}", url);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    read_json(response).await
}

/// The whole unfiltered set, for local mode.
pub async fn fetch_all_reviews() -> Result<Vec<Review>, FetchError> {
    let query = ReviewQuery {
        limit: MAX_PAGE_SIZE,
        ..ReviewQuery::default()
    };
    let page = fetch_reviews(&query).await?;
    if is_truncated(&page) {
        warn!(
            "[CLIENT] Local mode holds {} of {} reviews; the rest are not searchable",
            page.data.len(),
            page.total
        );
    }
    Ok(page.data)
}

/// The server held back rows, so in-memory filtering sees a partial set.
pub fn is_truncated(page: &ReviewPage) -> bool {
    page.total != page.data.len() as u64
}

pub async fn submit_review(review: &NewReview) -> Result<Review, FetchError> {
    let response = Request::post(REVIEWS_ENDPOINT)
        .json(review)
        .map_err(|e| FetchError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    if !response.ok() {
        error!("[CLIENT] {} answered {}", response.url(), response.status());
        return Err(FetchError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}
