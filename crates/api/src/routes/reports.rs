//! Monthly report route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use haulbook_core::reports::{OwnershipReport, ReportService};
use serde::Deserialize;
use tracing::debug;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/monthly", get(monthly_report))
}

/// Query parameters for the monthly report.
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    /// Month number, 1 to 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// GET /reports/monthly?month=&year=
async fn monthly_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthlyReportQuery>,
) -> ApiResult<Json<OwnershipReport>> {
    let month = ReportService::month(query.year, query.month)?;
    let user = auth.user_id();

    let (trips, trucks, charges, expenses) = tokio::try_join!(
        state.store.trips(&user),
        state.store.trucks(&user),
        state.store.trip_charges(&user),
        state.store.expenses(&user),
    )?;

    let report = ReportService::ownership_report(&trips, &trucks, &charges, &expenses, month);
    debug!(
        month = %month,
        self_trips = report.self_owned.trip_count,
        market_trips = report.market.trip_count,
        "Built ownership report"
    );

    Ok(Json(report))
}
