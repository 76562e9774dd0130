use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use leptos::logging::error;
use serde::Serialize;
use thiserror::Error;

use crate::models::review::InvalidRating;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    InvalidRating(#[from] InvalidRating),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ReviewError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::MalformedPayload(_) | ReviewError::InvalidRating(_) => StatusCode::BAD_REQUEST,
            ReviewError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ReviewError::Database(err) => {
                error!("[API] Database error: {:?}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ReviewError::from(InvalidRating(9)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReviewError::MalformedPayload("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReviewError::from(rusqlite::Error::InvalidQuery).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
