//! Payment and account-entry routes.
//!
//! Each mutation changes one source record, then rebuilds every passbook the
//! record appears in and responds with the owning entity's passbook.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};
use chrono::NaiveDate;
use haulbook_core::fleet::{DriverAccount, SupplierAccount};
use haulbook_core::ledger::EntityType;
use haulbook_core::trip::PartyPayment;
use haulbook_shared::AppError;
use haulbook_shared::types::{
    AccountEntryId, DriverId, PartyId, PaymentId, SupplierId, TripId, UserId,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::ledgers::{LedgerResponse, Trigger, refresh_ledger};
use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers/{supplier_id}/payments", post(create_supplier_payment))
        .route(
            "/suppliers/{supplier_id}/payments/{entry_id}",
            delete(delete_supplier_payment),
        )
        .route("/drivers/{driver_id}/accounts", post(create_driver_entry))
        .route(
            "/drivers/{driver_id}/accounts/{entry_id}",
            delete(delete_driver_entry),
        )
        .route("/parties/{party_id}/payments", post(create_party_payment))
        .route(
            "/parties/{party_id}/payments/{payment_id}",
            delete(delete_party_payment),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for paying a supplier.
#[derive(Debug, Deserialize)]
pub struct SupplierPaymentRequest {
    /// Amount paid; must be positive.
    pub amount: Decimal,
    /// Date paid.
    pub date: NaiveDate,
    /// Trip the payment is allocated to.
    pub trip_id: Option<TripId>,
    /// Payment mode (e.g. "Cash", "Bank").
    pub payment_mode: Option<String>,
}

/// Request body for a manual driver entry.
#[derive(Debug, Deserialize)]
pub struct DriverEntryRequest {
    /// Cash received back from the driver.
    pub got: Option<Decimal>,
    /// Cash handed to the driver.
    pub gave: Option<Decimal>,
    /// Entry date.
    pub date: NaiveDate,
    /// Reason for the entry.
    #[serde(default)]
    pub reason: String,
}

/// Request body for a payment received from a party.
#[derive(Debug, Deserialize)]
pub struct PartyPaymentRequest {
    /// Amount received; must be positive.
    pub amount: Decimal,
    /// Date received.
    pub date: NaiveDate,
    /// Trip the payment is allocated to.
    pub trip_id: Option<TripId>,
    /// Payment type (defaults to "Payment").
    pub payment_type: Option<String>,
    /// Driver who collected the cash.
    pub driver_id: Option<DriverId>,
}

fn positive(field: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(AppError::Validation(format!("{field} must be positive")))
    }
}

fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

async fn respond(
    state: &AppState,
    user: &UserId,
    entity_type: EntityType,
    entity_id: &str,
) -> ApiResult<Json<LedgerResponse>> {
    let ledger = refresh_ledger(state, user, entity_type, entity_id, Trigger::Mutation).await?;
    Ok(Json(LedgerResponse::new(entity_type, entity_id, ledger)))
}

// ============================================================================
// Supplier payments
// ============================================================================

/// POST /suppliers/{supplier_id}/payments
async fn create_supplier_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(supplier_id): Path<SupplierId>,
    Json(req): Json<SupplierPaymentRequest>,
) -> ApiResult<(StatusCode, Json<LedgerResponse>)> {
    let user = auth.user_id();
    let entry = SupplierAccount {
        id: AccountEntryId::new(new_entry_id()),
        supplier_id: supplier_id.clone(),
        trip_id: req.trip_id,
        amount: Some(positive("amount", req.amount)?),
        date: Some(req.date),
        payment_mode: req.payment_mode,
    };
    let entry_id = entry.id.clone();

    state.store.add_supplier_account(&user, entry).await?;
    info!(supplier_id = %supplier_id, entry_id = %entry_id, "Supplier payment recorded");

    let response = respond(&state, &user, EntityType::Supplier, supplier_id.as_str()).await?;
    Ok((StatusCode::CREATED, response))
}

/// DELETE /suppliers/{supplier_id}/payments/{entry_id}
async fn delete_supplier_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((supplier_id, entry_id)): Path<(SupplierId, AccountEntryId)>,
) -> ApiResult<Json<LedgerResponse>> {
    let user = auth.user_id();
    state
        .store
        .delete_supplier_account(&user, &supplier_id, &entry_id)
        .await?;
    info!(supplier_id = %supplier_id, entry_id = %entry_id, "Supplier payment deleted");

    respond(&state, &user, EntityType::Supplier, supplier_id.as_str()).await
}

// ============================================================================
// Driver entries
// ============================================================================

/// POST /drivers/{driver_id}/accounts
async fn create_driver_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(driver_id): Path<DriverId>,
    Json(req): Json<DriverEntryRequest>,
) -> ApiResult<(StatusCode, Json<LedgerResponse>)> {
    let got = req.got.map(|v| positive("got", v)).transpose()?;
    let gave = req.gave.map(|v| positive("gave", v)).transpose()?;
    if got.is_none() && gave.is_none() {
        return Err(AppError::Validation("One of got or gave is required".to_string()).into());
    }

    let user = auth.user_id();
    let entry = DriverAccount {
        id: AccountEntryId::new(new_entry_id()),
        driver_id: driver_id.clone(),
        got,
        gave,
        date: Some(req.date),
        reason: req.reason,
    };
    let entry_id = entry.id.clone();

    state.store.add_driver_account(&user, entry).await?;
    info!(driver_id = %driver_id, entry_id = %entry_id, "Driver entry recorded");

    let response = respond(&state, &user, EntityType::Driver, driver_id.as_str()).await?;
    Ok((StatusCode::CREATED, response))
}

/// DELETE /drivers/{driver_id}/accounts/{entry_id}
async fn delete_driver_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((driver_id, entry_id)): Path<(DriverId, AccountEntryId)>,
) -> ApiResult<Json<LedgerResponse>> {
    let user = auth.user_id();
    state
        .store
        .delete_driver_account(&user, &driver_id, &entry_id)
        .await?;
    info!(driver_id = %driver_id, entry_id = %entry_id, "Driver entry deleted");

    respond(&state, &user, EntityType::Driver, driver_id.as_str()).await
}

// ============================================================================
// Party payments
// ============================================================================

/// POST /parties/{party_id}/payments
///
/// A payment collected by a driver also moves the driver's passbook.
async fn create_party_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(party_id): Path<PartyId>,
    Json(req): Json<PartyPaymentRequest>,
) -> ApiResult<(StatusCode, Json<LedgerResponse>)> {
    let user = auth.user_id();
    let payment = PartyPayment {
        id: PaymentId::new(new_entry_id()),
        trip_id: req.trip_id,
        party_id: party_id.clone(),
        amount: Some(positive("amount", req.amount)?),
        date: Some(req.date),
        payment_type: req.payment_type.unwrap_or_else(|| "Payment".to_string()),
        driver_id: req.driver_id,
    };
    let payment_id = payment.id.clone();
    let collector = payment.driver_id.clone();

    state.store.add_party_payment(&user, payment).await?;
    info!(party_id = %party_id, payment_id = %payment_id, "Party payment recorded");

    if let Some(driver_id) = collector {
        refresh_ledger(
            &state,
            &user,
            EntityType::Driver,
            driver_id.as_str(),
            Trigger::Mutation,
        )
        .await?;
    }

    let response = respond(&state, &user, EntityType::Party, party_id.as_str()).await?;
    Ok((StatusCode::CREATED, response))
}

/// DELETE /parties/{party_id}/payments/{payment_id}
async fn delete_party_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((party_id, payment_id)): Path<(PartyId, PaymentId)>,
) -> ApiResult<Json<LedgerResponse>> {
    let user = auth.user_id();
    let removed = state
        .store
        .delete_party_payment(&user, &party_id, &payment_id)
        .await?;
    info!(party_id = %party_id, payment_id = %payment_id, "Party payment deleted");

    if let Some(driver_id) = removed.driver_id {
        refresh_ledger(
            &state,
            &user,
            EntityType::Driver,
            driver_id.as_str(),
            Trigger::Mutation,
        )
        .await?;
    }

    respond(&state, &user, EntityType::Party, party_id.as_str()).await
}
