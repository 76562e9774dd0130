#![cfg(feature = "ssr")]

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use star_reviews::api;
use star_reviews::config::ServerConfig;
use star_reviews::db::Database;
use star_reviews::models::review::{Review, ReviewPage};

async fn test_db() -> Database {
    let db = Database::new(":memory:").expect("in-memory database");
    db.create_schema().await.expect("schema");
    db
}

macro_rules! app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new(ServerConfig::default()))
                .service(web::scope("/api").configure(api::configure)),
        )
        .await
    };
}

async fn seed(db: &Database, reviews: &[(&str, u8)]) {
    for (text, rating) in reviews {
        db.insert_review(text, *rating).await.expect("insert");
    }
}

#[actix_web::test]
async fn test_post_then_get() {
    let db = test_db().await;
    let app = app!(db);

    for rating in 1..=5 {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({ "text": format!("rated {rating}"), "rating": rating }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Review = test::read_body_json(resp).await;
        assert_eq!(created.rating, rating);
        assert_eq!(created.text, format!("rated {rating}"));
    }

    let req = test::TestRequest::get().uri("/api/reviews?limit=10").to_request();
    let page: ReviewPage = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    // Newest first by default.
    let ratings: Vec<u8> = page.data.iter().map(|review| review.rating).collect();
    assert_eq!(ratings, [5, 4, 3, 2, 1]);
}

#[actix_web::test]
async fn test_invalid_rating_rejected() {
    let db = test_db().await;
    let app = app!(db);

    for rating in [0, 6, -1] {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({ "text": "nope", "rating": rating }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_malformed_json_rejected() {
    let db = test_db().await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"rating\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_null_text_stored_empty() {
    let db = test_db().await;
    let app = app!(db);

    for body in [json!({ "text": null, "rating": 5 }), json!({ "rating": 4 })] {
        let req = test::TestRequest::post().uri("/api/reviews").set_json(body).to_request();
        let created: Review = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.text, "");
    }
}

#[actix_web::test]
async fn test_exact_and_partial_search() {
    let db = test_db().await;
    seed(&db, &[("good food", 5), ("pure goodness", 4), ("Good enough", 3), ("awful", 1)]).await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/reviews?search=good&searchType=partial&limit=10")
        .to_request();
    let page: ReviewPage = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total, 3);

    let req = test::TestRequest::get()
        .uri("/api/reviews?search=good&searchType=exact&limit=10")
        .to_request();
    let page: ReviewPage = test::call_and_read_body_json(&app, req).await;
    let texts: Vec<&str> = page.data.iter().map(|review| review.text.as_str()).collect();
    assert_eq!(texts, ["Good enough", "good food"]);

    let req = test::TestRequest::get()
        .uri("/api/reviews?search=good&searchType=exact&caseSensitive=true&limit=10")
        .to_request();
    let page: ReviewPage = test::call_and_read_body_json(&app, req).await;
    let texts: Vec<&str> = page.data.iter().map(|review| review.text.as_str()).collect();
    assert_eq!(texts, ["good food"]);
}

#[actix_web::test]
async fn test_pagination_totals() {
    let db = test_db().await;
    let reviews: Vec<(String, u8)> = (1..=12).map(|i| (format!("review {i}"), 5)).collect();
    db.replace_all(&reviews).await.unwrap();
    let app = app!(db);

    let mut seen = 0;
    for page in 1..=3 {
        let req = test::TestRequest::get()
            .uri(&format!("/api/reviews?page={page}&limit=5"))
            .to_request();
        let body: ReviewPage = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total, 12);
        assert_eq!(body.total_pages(), 3);
        seen += body.data.len();
    }
    assert_eq!(seen, 12);

    let req = test::TestRequest::get().uri("/api/reviews?page=3&limit=5").to_request();
    let last: ReviewPage = test::call_and_read_body_json(&app, req).await;
    assert_eq!(last.data.len(), 2);
    assert!(!last.has_next());
}

#[actix_web::test]
async fn test_garbage_params_use_defaults() {
    let db = test_db().await;
    seed(&db, &[("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5), ("six", 5)]).await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/reviews?page=-3&limit=abc&searchType=fuzzy&sortBy=DROP%20TABLE&order=sideways")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: ReviewPage = test::read_body_json(resp).await;
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 5);
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.data[0].text, "six");
}

#[actix_web::test]
async fn test_sort_by_rating_ascending() {
    let db = test_db().await;
    seed(&db, &[("mid", 3), ("top", 5), ("low", 1)]).await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/reviews?sortBy=rating&order=asc")
        .to_request();
    let page: ReviewPage = test::call_and_read_body_json(&app, req).await;
    let texts: Vec<&str> = page.data.iter().map(|review| review.text.as_str()).collect();
    assert_eq!(texts, ["low", "mid", "top"]);
}
