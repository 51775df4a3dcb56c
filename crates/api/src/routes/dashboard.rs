//! Dashboard route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use haulbook_core::dashboard::{DashboardInputs, DashboardSummary, build_dashboard};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Day the dashboard is computed for (defaults to today, UTC).
    pub date: Option<NaiveDate>,
}

/// GET /dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let user = auth.user_id();
    let today = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let (trips, charges, payments, expenses) = tokio::try_join!(
        state.store.trips(&user),
        state.store.trip_charges(&user),
        state.store.party_payments(&user),
        state.store.expenses(&user),
    )?;

    let summary = build_dashboard(
        DashboardInputs {
            trips: &trips,
            charges: &charges,
            payments: &payments,
            expenses: &expenses,
        },
        today,
    );

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    use crate::test_support::{TestApp, decimal};

    #[tokio::test]
    async fn test_dashboard_for_august() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/dashboard?date=2024-08-20").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(decimal(&body["total_receivable"]), dec!(4300));
        assert_eq!(decimal(&body["monthly_profit"]), dec!(13600));

        let counts = body["monthly_trip_counts"].as_array().unwrap();
        assert_eq!(counts.len(), 12);
        assert_eq!(counts[0]["label"], "April 2024");
        assert_eq!(counts[4]["count"], 2);

        let totals = body["expense_category_totals"].as_array().unwrap();
        let names: Vec<&str> = totals
            .iter()
            .map(|t| t["category"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Office", "Trip", "Truck"]);
        assert_eq!(decimal(&totals[0]["amount"]), dec!(2500));
        assert_eq!(totals[1]["count"], 2);
        assert_eq!(decimal(&totals[1]["amount"]), dec!(1500));
        assert_eq!(decimal(&totals[2]["amount"]), dec!(700));
    }

    #[tokio::test]
    async fn test_dashboard_outside_fiscal_year_is_empty() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/dashboard?date=2023-06-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["monthly_profit"]), dec!(0));
        assert!(
            body["monthly_trip_counts"]
                .as_array()
                .unwrap()
                .iter()
                .all(|m| m["count"] == 0)
        );
    }
}
