use serde::{Deserialize, Serialize};

use crate::{
    db::{Db, PaymentRecord},
    luhn,
    payment::error::PaymentError,
};

pub mod api;
pub mod error;
/// Requisite masking for log output
pub mod mask;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Inbound payment request. Never persisted as-is.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub name: String,
    pub card_number: String,
    pub payment_amount: f64,
    pub currency: String,
}

/// Read-only view of a recorded payment, amount denormalized back to
/// decimal.
#[derive(Debug, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub name: String,
    pub payment_amount: f64,
    pub currency: String,
    pub valid: bool,
}

impl From<PaymentRecord> for Invoice {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            payment_amount: to_decimal(record.amount_minor),
            currency: record.currency,
            valid: record.valid,
        }
    }
}

/// Convert a decimal amount to integer minor units, rounding half-up.
///
/// Exact only for amounts with at most two fractional digits; anything
/// finer is rounded here rather than silently truncated by the driver.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Denormalize minor units back to a decimal amount.
pub fn to_decimal(amount_minor: i64) -> f64 {
    amount_minor as f64 / 100.0
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Record a payment and return it with its store-assigned identifier.
///
/// The card number is checked first; a payment that fails any check leaves
/// no trace in the store. The currency is a format check only, no ISO-4217
/// registry is consulted.
pub async fn submit(db: &Db, request: &PaymentRequest) -> Result<PaymentRecord> {
    luhn::validate(request.card_number.trim())?;
    if !(request.payment_amount > 0.0) {
        return Err(PaymentError::InvalidAmount(request.payment_amount));
    }
    if !is_currency_code(&request.currency) {
        return Err(PaymentError::InvalidCurrency(request.currency.clone()));
    }
    let currency = request.currency.to_ascii_uppercase();
    let amount_minor = to_minor_units(request.payment_amount);
    let id = db
        .insert_payment(&request.name, amount_minor, &currency, true)
        .await?;
    Ok(PaymentRecord {
        id,
        name: request.name.clone(),
        amount_minor,
        currency,
        valid: true,
    })
}

/// Parse a raw invoice identifier. Fails without touching the store.
pub fn parse_payment_id(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(PaymentError::InvalidId(raw.to_string())),
    }
}

/// Look up a recorded payment by identifier.
pub async fn invoice(db: &Db, id: i64) -> Result<Invoice> {
    if id <= 0 {
        return Err(PaymentError::InvalidId(id.to_string()));
    }
    match db.payment_by_id(id).await? {
        Some(record) => Ok(record.into()),
        None => Err(PaymentError::NotFound(id)),
    }
}
