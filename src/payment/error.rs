use std::fmt::Display;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::luhn::InvalidCard;

#[derive(Debug)]
pub enum PaymentError {
    InvalidCard(InvalidCard),
    InvalidAmount(f64),
    InvalidCurrency(String),
    InvalidId(String),
    NotFound(i64),
    Database(sqlx::Error),
}

impl From<InvalidCard> for PaymentError {
    fn from(value: InvalidCard) -> Self {
        Self::InvalidCard(value)
    }
}

impl From<sqlx::Error> for PaymentError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value)
    }
}

impl std::error::Error for PaymentError {}

impl Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::InvalidCard(e) => write!(f, "invalid card number: {e}"),
            PaymentError::InvalidAmount(amount) => {
                write!(f, "payment amount must be positive, got {amount}")
            }
            PaymentError::InvalidCurrency(code) => {
                write!(f, "currency must be a 3-letter code, got {code:?}")
            }
            PaymentError::InvalidId(raw) => {
                write!(f, "payment id must be a positive integer, got {raw:?}")
            }
            PaymentError::NotFound(id) => write!(f, "no payment recorded under id {id}"),
            PaymentError::Database(e) => write!(f, "payment store error: {e}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match &self {
            PaymentError::InvalidCard(_)
            | PaymentError::InvalidAmount(_)
            | PaymentError::InvalidCurrency(_)
            | PaymentError::InvalidId(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            PaymentError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            PaymentError::Database(e) => {
                tracing::error!("Payment store failure: {e}");
                // Driver detail stays in the logs.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "payment store unavailable".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
