//! Passbook routes and ledger rebuilding.
//!
//! Every passbook is rebuilt from the full record set on each request. For
//! drivers and suppliers the rebuilt final balance is the source of truth
//! for the cached `balance` field.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use haulbook_core::ledger::{
    EntityType, EntryKind, Ledger, LedgerEntry, driver_ledger, party_ledger, supplier_ledger,
};
use haulbook_shared::types::{DriverId, PartyId, SupplierId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the passbook routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/ledgers/{entity_type}/{entity_id}", get(get_ledger))
}

// ============================================================================
// Response Types
// ============================================================================

/// One passbook line.
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Source kind.
    pub kind: EntryKind,
    /// Identifier of the source record.
    pub source_id: String,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            debit: entry.debit(),
            credit: entry.credit(),
            date: entry.date,
            description: entry.description,
            kind: entry.kind,
            source_id: entry.source_id,
            running_balance: entry.running_balance,
        }
    }
}

/// A passbook in display order.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// Entity the passbook belongs to.
    pub entity_type: EntityType,
    /// Entity identifier.
    pub entity_id: String,
    /// Lines, newest first for drivers and oldest first otherwise.
    pub entries: Vec<LedgerEntryResponse>,
    /// Balance after the last line in date order.
    pub final_balance: Decimal,
    /// Total of the debit column.
    pub total_debit: Decimal,
    /// Total of the credit column.
    pub total_credit: Decimal,
    /// Source records left out for lack of a date.
    pub skipped_entries: usize,
}

impl LedgerResponse {
    /// Builds the response, ordering entries for the entity type.
    #[must_use]
    pub fn new(entity_type: EntityType, entity_id: impl Into<String>, ledger: Ledger) -> Self {
        let ledger = ledger.display(entity_type.display_order());
        Self {
            entity_type,
            entity_id: entity_id.into(),
            final_balance: ledger.final_balance,
            total_debit: ledger.total_debit(),
            total_credit: ledger.total_credit(),
            skipped_entries: ledger.skipped,
            entries: ledger.entries.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Rebuilding
// ============================================================================

/// Why a passbook is being rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// Plain read; a cached balance that disagrees has drifted.
    Read,
    /// A source record just changed; the cached balance is expected to move.
    Mutation,
}

/// Rebuilds an entity's passbook from the current record set and writes the
/// final balance back to the cached field when it differs.
pub(crate) async fn refresh_ledger(
    state: &AppState,
    user: &UserId,
    entity_type: EntityType,
    entity_id: &str,
    trigger: Trigger,
) -> ApiResult<Ledger> {
    let store = state.store.as_ref();

    let ledger = match entity_type {
        EntityType::Supplier => {
            let id = SupplierId::new(entity_id);
            let (supplier, trips, accounts) = tokio::try_join!(
                store.supplier(user, &id),
                store.trips(user),
                store.supplier_accounts(user),
            )?;
            let ledger = supplier_ledger(&id, &trips, &accounts);
            if let Err(drift) = ledger.reconcile(supplier.balance) {
                note_drift(entity_type, entity_id, trigger, &drift);
                store
                    .set_supplier_balance(user, &id, ledger.final_balance)
                    .await?;
            }
            ledger
        }
        EntityType::Driver => {
            let id = DriverId::new(entity_id);
            let (driver, accounts, payments, expenses) = tokio::try_join!(
                store.driver(user, &id),
                store.driver_accounts(user),
                store.party_payments(user),
                store.expenses(user),
            )?;
            let ledger = driver_ledger(&id, &accounts, &payments, &expenses);
            if let Err(drift) = ledger.reconcile(driver.balance) {
                note_drift(entity_type, entity_id, trigger, &drift);
                store
                    .set_driver_balance(user, &id, ledger.final_balance)
                    .await?;
            }
            ledger
        }
        EntityType::Party => {
            let id = PartyId::new(entity_id);
            let (_party, trips, charges, payments) = tokio::try_join!(
                store.party(user, &id),
                store.trips(user),
                store.trip_charges(user),
                store.party_payments(user),
            )?;
            party_ledger(&id, &trips, &charges, &payments)
        }
    };

    Ok(ledger)
}

fn note_drift(
    entity_type: EntityType,
    entity_id: &str,
    trigger: Trigger,
    drift: &haulbook_core::ledger::LedgerError,
) {
    match trigger {
        Trigger::Read => warn!(
            entity_type = %entity_type,
            entity_id = %entity_id,
            error = %drift,
            "Cached balance drifted from ledger, repairing"
        ),
        Trigger::Mutation => info!(
            entity_type = %entity_type,
            entity_id = %entity_id,
            "Cached balance updated from rebuilt ledger"
        ),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /ledgers/{entity_type}/{entity_id}
async fn get_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> ApiResult<Json<LedgerResponse>> {
    let entity_type: EntityType = entity_type.parse()?;
    let ledger = refresh_ledger(
        &state,
        &auth.user_id(),
        entity_type,
        &entity_id,
        Trigger::Read,
    )
    .await?;

    Ok(Json(LedgerResponse::new(entity_type, entity_id, ledger)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use haulbook_shared::types::SupplierId;
    use haulbook_store::FleetStore;
    use rust_decimal_macros::dec;

    use crate::test_support::{TestApp, decimal};

    #[tokio::test]
    async fn test_ledger_requires_token() {
        let app = TestApp::new();
        let (status, _) = app.get_anonymous("/api/v1/ledgers/supplier/s1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_supplier_ledger_sorted_and_drift_repaired() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/ledgers/supplier/s1").await;
        assert_eq!(status, StatusCode::OK);

        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["kind"], "supplier_payment");
        assert_eq!(decimal(&entries[0]["running_balance"]), dec!(2000));
        assert_eq!(entries[1]["kind"], "truck_hire");
        assert_eq!(decimal(&entries[1]["debit"]), dec!(5000));
        assert_eq!(decimal(&entries[1]["running_balance"]), dec!(-3000));
        assert_eq!(decimal(&body["final_balance"]), dec!(-3000));

        let supplier = app
            .store
            .supplier(&app.user, &SupplierId::new("s1"))
            .await
            .unwrap();
        assert_eq!(supplier.balance, dec!(-3000));
    }

    #[tokio::test]
    async fn test_driver_ledger_is_newest_first() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/ledgers/driver/d1").await;
        assert_eq!(status, StatusCode::OK);

        let dates: Vec<&str> = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["date"].as_str().unwrap())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(body["skipped_entries"], 1);
    }

    #[tokio::test]
    async fn test_party_ledger_final_balance() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/ledgers/party/p1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["final_balance"]), dec!(4300));
    }

    #[tokio::test]
    async fn test_unknown_entity_type_and_entity() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/ledgers/truck/TRK1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, body) = app.get("/api/v1/ledgers/driver/d404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
