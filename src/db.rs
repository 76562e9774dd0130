use leptos::logging::log;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Error, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::review::{Review, ReviewPage, ReviewQuery, SearchMode, SortField};
use crate::search::Matcher;

/// SQL function backing the text filter: `review_match(text, needle, exact, case_sensitive)`.
const MATCH_FN: &str = "review_match";

// Shared handle to the review store; clones share one connection.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    // Create a new database connection
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let conn = Connection::open(db_path)?;
        register_functions(&conn)?;
        log!("[DB] Database connection established at: {}", db_path);
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // Create the database schema
    pub async fn create_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL DEFAULT '',
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5)
            );",
        )
        .map_err(|e| {
            leptos::logging::error!("[DB] Failed creating reviews table: {}", e);
            e
        })?;
        Ok(())
    }

    pub async fn insert_review(&self, text: &str, rating: u8) -> Result<Review, Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO reviews (text, rating) VALUES (?1, ?2)",
            params![text, rating],
        )?;
        let id = conn.last_insert_rowid();
        log!("[DB] Review inserted: id={}, rating={}", id, rating);
        Ok(Review {
            id,
            text: text.to_string(),
            rating,
        })
    }

    pub async fn get_review(&self, id: i64) -> Result<Option<Review>, Error> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, text, rating FROM reviews WHERE id = ?1",
            [id],
            review_from_row,
        )
        .optional()
    }

    pub async fn count_reviews(&self) -> Result<u64, Error> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// One page of reviews matching `query`, plus the total match count.
    pub async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, Error> {
        let conn = self.conn.lock().await;

        let mut filter_values = Vec::new();
        let where_clause = if query.has_search() {
            filter_values.push(Value::Text(query.search.clone()));
            filter_values.push(Value::Integer(i64::from(query.mode == SearchMode::Exact)));
            filter_values.push(Value::Integer(i64::from(query.case_sensitive)));
            format!("WHERE {MATCH_FN}(text, ?, ?, ?)")
        } else {
            String::new()
        };

        let direction = query.order.keyword();
        let order_clause = match query.sort_by {
            SortField::Id => format!("ORDER BY id {direction}"),
            field => format!("ORDER BY {} {direction}, id {direction}", field.column()),
        };

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM reviews {where_clause}"),
            params_from_iter(filter_values.iter()),
            |row| row.get(0),
        )?;

        let mut page_values = filter_values;
        page_values.push(Value::Integer(i64::from(query.limit)));
        page_values.push(Value::Integer(query.offset()));

        let mut stmt = conn.prepare(&format!(
            "SELECT id, text, rating FROM reviews {where_clause} {order_clause} LIMIT ? OFFSET ?"
        ))?;
        let data = stmt
            .query_map(params_from_iter(page_values.iter()), review_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        log!(
            "[DB] Listed {} of {} reviews (page {}, limit {}, search {:?})",
            data.len(),
            total,
            query.page,
            query.limit,
            query.search
        );

        Ok(ReviewPage {
            data,
            total: total as u64,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Deletes every review and inserts `reviews` in one transaction.
    /// Ids keep counting up from where they were.
    pub async fn replace_all(&self, reviews: &[(String, u8)]) -> Result<usize, Error> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM reviews", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO reviews (text, rating) VALUES (?1, ?2)")?;
            for (text, rating) in reviews {
                stmt.execute(params![text, rating])?;
            }
        }
        tx.commit()?;
        log!("[DB] Replaced {} reviews with {}", deleted, reviews.len());
        Ok(reviews.len())
    }
}

fn review_from_row(row: &rusqlite::Row<'_>) -> Result<Review, Error> {
    Ok(Review {
        id: row.get(0)?,
        text: row.get(1)?,
        rating: row.get(2)?,
    })
}

fn register_functions(conn: &Connection) -> Result<(), Error> {
    conn.create_scalar_function(
        MATCH_FN,
        4,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text = ctx.get::<String>(0)?;
            let needle = ctx.get::<String>(1)?;
            let mode = if ctx.get::<bool>(2)? {
                SearchMode::Exact
            } else {
                SearchMode::Partial
            };
            let case_sensitive = ctx.get::<bool>(3)?;
            Ok(Matcher::new(&needle, mode, case_sensitive).map_or(true, |matcher| matcher.matches(&text)))
        },
    )
}
