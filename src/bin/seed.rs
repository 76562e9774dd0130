//! Wipes the review table and fills it with random reviews.
//!
//! Usage: `cargo run --bin seed -- [count]` (default 1000). The database path
//! comes from `REVIEWS_DB_PATH`, like the server.
use rand::seq::IndexedRandom;
use rand::Rng;

use leptos::logging::log;
use star_reviews::config::ServerConfig;
use star_reviews::db::Database;
use star_reviews::models::review::{MAX_RATING, MIN_RATING};

const DEFAULT_COUNT: usize = 1000;

const WORDS: &[&str] = &[
    "service", "delivery", "quality", "price", "staff", "order", "fast", "slow", "friendly", "rude",
    "fresh", "cold", "warm", "good", "great", "bad", "excellent", "average", "again", "never",
    "always", "package", "support", "manager", "waiting", "time", "product", "recommend", "happy",
    "disappointed", "experience", "clean", "expensive", "cheap", "courier", "app", "menu", "taste",
    "portion", "helpful", "broken", "perfect", "okay", "late", "early", "goodness", "value", "simple",
];

fn sentence(rng: &mut impl Rng) -> String {
    let len = rng.random_range(6..=14);
    let words: Vec<&str> = (0..len).filter_map(|_| WORDS.choose(rng).copied()).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(..1) {
        sentence.replace_range(..1, &first.to_uppercase());
    }
    sentence.push('.');
    sentence
}

fn review_text(rng: &mut impl Rng) -> String {
    let sentences = rng.random_range(1..=3);
    (0..sentences).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let count = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<usize>().map_err(|e| format!("invalid count {raw:?}: {e}"))?,
        None => DEFAULT_COUNT,
    };
    let config = ServerConfig::from_env();

    log!("[SEED] Connecting to database at: {}", config.db_path);
    let db = Database::new(&config.db_path)?;
    db.create_schema().await?;

    let mut rng = rand::rng();
    let reviews: Vec<(String, u8)> = (0..count)
        .map(|_| (review_text(&mut rng), rng.random_range(MIN_RATING..=MAX_RATING)))
        .collect();

    log!("[SEED] Clearing old reviews and inserting {}", reviews.len());
    let inserted = db.replace_all(&reviews).await?;
    log!("[SEED] Created {} reviews", inserted);
    Ok(())
}
