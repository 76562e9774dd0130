use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use leptos::logging::{log, warn};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::error::ReviewError;
use crate::models::review::{NewReview, ReviewQuery, ReviewQueryParams};

/// Registers the review routes on whatever scope the caller mounts them under.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::resource("/reviews")
            .route(web::get().to(list_reviews))
            .route(web::post().to(create_review)),
    );
}

// Malformed bodies answer with the same JSON error shape as everything else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        warn!("[API] Rejected payload: {}", err);
        ReviewError::MalformedPayload(err.to_string()).into()
    })
}

// GET /api/reviews?page&limit&search&searchType&caseSensitive&sortBy&order
pub async fn list_reviews(
    db: web::Data<Database>,
    config: web::Data<ServerConfig>,
    params: web::Query<ReviewQueryParams>,
) -> Result<HttpResponse, ReviewError> {
    let query = ReviewQuery::from_params(&params, config.max_page_size);
    log!("[API] Listing reviews: {:?}", query);

    let page = db.list_reviews(&query).await?;
    log!("[API] Returning {} of {} reviews", page.data.len(), page.total);
    Ok(HttpResponse::Ok().json(page))
}

// POST /api/reviews {text, rating}
pub async fn create_review(
    db: web::Data<Database>,
    request: web::Json<NewReview>,
) -> Result<HttpResponse, ReviewError> {
    let request = request.into_inner();
    log!("[API] Received review request - rating: {}", request.rating);

    let rating = request.validated_rating().map_err(|err| {
        warn!("[API] {}", err);
        err
    })?;
    let review = db.insert_review(request.text(), rating).await?;

    log!("[API] Successfully saved review ID: {}", review.id);
    Ok(HttpResponse::Created().json(review))
}
