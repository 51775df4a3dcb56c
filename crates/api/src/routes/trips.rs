//! Trip balance routes and trip-level deletes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use haulbook_core::ledger::EntityType;
use haulbook_core::trip::{TripBalance, TripIndex, trip_balances};
use haulbook_shared::AppError;
use haulbook_shared::types::{ChargeId, TripId, UserId};
use serde::Serialize;
use tracing::{debug, info};

use super::ledgers::{LedgerResponse, Trigger, refresh_ledger};
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates trip routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trips/balances", get(list_balances))
        .route("/trips/{trip_id}/balance", get(get_balance))
        .route("/trips/{trip_id}", delete(delete_trip))
        .route("/trips/{trip_id}/charges/{charge_id}", delete(delete_charge))
}

/// Balance of a trip after a charge was removed, with the party's rebuilt passbook.
#[derive(Debug, Serialize)]
pub struct ChargeDeletedResponse {
    /// Fresh balance of the trip.
    pub trip_balance: TripBalance,
    /// The billed party's passbook.
    pub party_ledger: LedgerResponse,
}

/// GET /trips/balances
async fn list_balances(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TripBalance>>> {
    let user = auth.user_id();
    let (trips, charges, payments) = tokio::try_join!(
        state.store.trips(&user),
        state.store.trip_charges(&user),
        state.store.party_payments(&user),
    )?;

    Ok(Json(trip_balances(&trips, &charges, &payments)))
}

async fn trip_balance(
    state: &AppState,
    user: &UserId,
    trip_id: &TripId,
) -> ApiResult<TripBalance> {
    let (trip, charges, payments) = tokio::try_join!(
        state.store.trip(user, trip_id),
        state.store.trip_charges(user),
        state.store.party_payments(user),
    )?;

    Ok(TripIndex::new(&charges, &payments).balance_of(&trip))
}

/// GET /trips/{trip_id}/balance
async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(trip_id): Path<TripId>,
) -> ApiResult<Json<TripBalance>> {
    let balance = trip_balance(&state, &auth.user_id(), &trip_id).await?;
    Ok(Json(balance))
}

/// DELETE /trips/{trip_id}/charges/{charge_id}
async fn delete_charge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((trip_id, charge_id)): Path<(TripId, ChargeId)>,
) -> ApiResult<Json<ChargeDeletedResponse>> {
    let user = auth.user_id();
    let removed = state
        .store
        .delete_trip_charge(&user, &trip_id, &charge_id)
        .await?;
    info!(trip_id = %trip_id, charge_id = %removed.id, "Trip charge deleted");

    let balance = trip_balance(&state, &user, &trip_id).await?;
    let trip = state.store.trip(&user, &trip_id).await?;
    let party_id = trip.party_id.as_str();
    let ledger = refresh_ledger(
        &state,
        &user,
        EntityType::Party,
        party_id,
        Trigger::Mutation,
    )
    .await?;

    Ok(Json(ChargeDeletedResponse {
        trip_balance: balance,
        party_ledger: LedgerResponse::new(EntityType::Party, party_id, ledger),
    }))
}

/// DELETE /trips/{trip_id}
///
/// Removes the trip with its charges, allocated payments and expenses, then
/// rebuilds the cached balances of its supplier and of every driver whose
/// passbook held a removed record.
async fn delete_trip(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(trip_id): Path<TripId>,
) -> ApiResult<StatusCode> {
    let user = auth.user_id();
    let removed = state.store.delete_trip(&user, &trip_id).await?;
    info!(
        trip_id = %removed.trip.id,
        charges = removed.charges.len(),
        payments = removed.payments.len(),
        expenses = removed.expenses.len(),
        "Trip deleted"
    );

    let mut affected: Vec<(EntityType, &str)> = removed
        .affected_drivers()
        .into_iter()
        .map(|id| (EntityType::Driver, id.as_str()))
        .collect();
    if let Some(supplier_id) = &removed.trip.supplier_id {
        affected.push((EntityType::Supplier, supplier_id.as_str()));
    }

    for (entity_type, entity_id) in affected {
        match refresh_ledger(&state, &user, entity_type, entity_id, Trigger::Mutation).await {
            Ok(_) => {}
            Err(ApiError(AppError::NotFound(_))) => {
                debug!(
                    entity_type = %entity_type,
                    entity_id = %entity_id,
                    "No cached balance to refresh"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
