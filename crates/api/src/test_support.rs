//! Router fixture shared by the route tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::NaiveDate;
use haulbook_core::expense::Expense;
use haulbook_core::fleet::{
    Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck, TruckOwnership,
};
use haulbook_core::trip::{PartyPayment, Trip, TripCharge, TripStatus};
use haulbook_shared::types::{
    AccountEntryId, ChargeId, DriverId, ExpenseId, PartyId, PaymentId, SupplierId, TripId,
    TruckId, UserId,
};
use haulbook_shared::{JwtConfig, JwtService};
use haulbook_store::{FleetSnapshot, MemoryStore};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub fn day(d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 8, d)
}

pub fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn trip(id: &str, user: &str, party: &str, truck: &str, amount: Decimal) -> Trip {
    Trip {
        id: TripId::new(id),
        user_id: UserId::new(user),
        amount: Some(amount),
        start_date: day(5),
        party_id: PartyId::new(party),
        driver_id: DriverId::new("d1"),
        truck_id: TruckId::new(truck),
        supplier_id: None,
        truck_hire_cost: None,
        status: TripStatus::Started,
    }
}

fn expense(
    id: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    trip: Option<&str>,
    truck: Option<&str>,
    driver: Option<&str>,
) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        user_id: UserId::new("u1"),
        amount: Some(amount),
        date,
        expense_type: "Misc".to_string(),
        trip_id: trip.map(TripId::new),
        truck_id: truck.map(TruckId::new),
        driver_id: driver.map(DriverId::new),
        notes: None,
    }
}

/// August 2024 books for user `u1`, plus one foreign trip owned by `u2`.
///
/// - t1: own truck, freight 10000, billable detention 500, 6000 collected by d1
/// - t2: market truck from s1, freight 8000, hire 5000, damage deduction 200,
///   8000 paid by the party
/// - s1 paid 2000 on the 8th; d1 given 3000 on the 4th
/// - expenses: 1200 fuel on t1 paid by d1, 100 undated paid by d1, 2500 rent,
///   700 maintenance on TRK1, 300 toll on t2
pub fn fixture() -> FleetSnapshot {
    let u1 = UserId::new("u1");

    let mut t2 = trip("t2", "u1", "p1", "TRK2", dec!(8000));
    t2.start_date = day(10);
    t2.supplier_id = Some(SupplierId::new("s1"));
    t2.truck_hire_cost = Some(dec!(5000));

    FleetSnapshot {
        trips: vec![
            trip("t1", "u1", "p1", "TRK1", dec!(10000)),
            t2,
            trip("t9", "u2", "p2", "TRK9", dec!(99999)),
        ],
        trip_charges: vec![
            TripCharge {
                id: ChargeId::new("c1"),
                trip_id: TripId::new("t1"),
                amount: Some(dec!(500)),
                party_bill: true,
                expense_type: "Detention".to_string(),
                date: day(6),
            },
            TripCharge {
                id: ChargeId::new("c2"),
                trip_id: TripId::new("t2"),
                amount: Some(dec!(200)),
                party_bill: false,
                expense_type: "Damage".to_string(),
                date: day(11),
            },
        ],
        party_payments: vec![
            PartyPayment {
                id: PaymentId::new("pp1"),
                trip_id: Some(TripId::new("t1")),
                party_id: PartyId::new("p1"),
                amount: Some(dec!(6000)),
                date: day(7),
                payment_type: "Advance".to_string(),
                driver_id: Some(DriverId::new("d1")),
            },
            PartyPayment {
                id: PaymentId::new("pp2"),
                trip_id: Some(TripId::new("t2")),
                party_id: PartyId::new("p1"),
                amount: Some(dec!(8000)),
                date: day(12),
                payment_type: "Payment".to_string(),
                driver_id: None,
            },
        ],
        supplier_accounts: vec![SupplierAccount {
            id: AccountEntryId::new("sa1"),
            supplier_id: SupplierId::new("s1"),
            trip_id: Some(TripId::new("t2")),
            amount: Some(dec!(2000)),
            date: day(8),
            payment_mode: Some("Cash".to_string()),
        }],
        driver_accounts: vec![DriverAccount {
            id: AccountEntryId::new("da1"),
            driver_id: DriverId::new("d1"),
            got: None,
            gave: Some(dec!(3000)),
            date: day(4),
            reason: "Trip advance".to_string(),
        }],
        expenses: vec![
            expense("e1", dec!(1200), day(6), Some("t1"), None, Some("d1")),
            expense("e2", dec!(100), None, None, None, Some("d1")),
            expense("e3", dec!(2500), day(15), None, None, None),
            expense("e4", dec!(700), day(16), None, Some("TRK1"), None),
            expense("e5", dec!(300), day(12), Some("t2"), None, None),
        ],
        trucks: vec![
            Truck {
                id: TruckId::new("TRK1"),
                user_id: u1.clone(),
                truck_number: "MH12AB1234".to_string(),
                ownership: TruckOwnership::SelfOwned,
                supplier_id: None,
            },
            Truck {
                id: TruckId::new("TRK2"),
                user_id: u1.clone(),
                truck_number: "MH14CD5678".to_string(),
                ownership: TruckOwnership::Market,
                supplier_id: Some(SupplierId::new("s1")),
            },
        ],
        drivers: vec![Driver {
            id: DriverId::new("d1"),
            user_id: u1.clone(),
            name: "Ramesh".to_string(),
            balance: Decimal::ZERO,
        }],
        suppliers: vec![Supplier {
            id: SupplierId::new("s1"),
            user_id: u1.clone(),
            name: "Gupta Transport".to_string(),
            balance: Decimal::ZERO,
        }],
        parties: vec![
            Party {
                id: PartyId::new("p1"),
                user_id: u1,
                name: "Sharma Traders".to_string(),
            },
            Party {
                id: PartyId::new("p2"),
                user_id: UserId::new("u2"),
                name: "Other Books".to_string(),
            },
        ],
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub user: UserId,
    router: Router,
    token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_snapshot(fixture())
    }

    pub fn with_snapshot(snapshot: FleetSnapshot) -> Self {
        let store = Arc::new(MemoryStore::new(snapshot));
        let jwt_service = Arc::new(JwtService::new(JwtConfig::default()));
        let user = UserId::new("u1");
        let token = jwt_service.issue(&user).unwrap();
        let router = create_router(AppState {
            store: store.clone(),
            jwt_service,
        });

        Self {
            store,
            user,
            router,
            token,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        Self::call(self.router.clone(), request.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn get_anonymous(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        Self::call(self.router.clone(), request).await
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
