use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    db::Db,
    payment::{self, Invoice, PaymentRequest, mask},
};

/// Body of a successful payment submission.
#[derive(Debug, Serialize)]
pub struct PaymentCreated {
    pub message: &'static str,
    pub payment_id: i64,
}

#[instrument(skip_all)]
async fn submit_payment(
    State(db): State<Db>,
    Json(request): Json<PaymentRequest>,
) -> payment::Result<Json<PaymentCreated>> {
    tracing::debug!(
        name = %request.name,
        card = %mask::pan(&request.card_number),
        amount = request.payment_amount,
        currency = %request.currency,
        "Received payment request"
    );
    let record = payment::submit(&db, &request).await?;
    tracing::info!(id = record.id, "Recorded payment");
    Ok(Json(PaymentCreated {
        message: "Payment Successful",
        payment_id: record.id,
    }))
}

#[instrument(skip_all)]
async fn get_invoice(
    State(db): State<Db>,
    Path(payment_id): Path<String>,
) -> payment::Result<Json<Invoice>> {
    let id = payment::parse_payment_id(&payment_id)?;
    let invoice = payment::invoice(&db, id).await?;
    tracing::debug!(id, "Dispatched invoice");
    Ok(Json(invoice))
}

pub fn router() -> Router<Db> {
    Router::new()
        .route("/payments", post(submit_payment))
        .route("/invoices/{payment_id}", get(get_invoice))
}
