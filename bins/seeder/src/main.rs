//! Demo snapshot seeder for Haulbook development and testing.
//!
//! Writes a deterministic fiscal year 2024-25 of books for one demo user:
//! own and market trucks, trips every nine days, advances collected by
//! drivers, supplier settlements, office rent and truck maintenance.
//! Cached driver and supplier balances are rebuilt from their passbooks
//! before the snapshot is written.
//!
//! Usage: cargo run --bin seeder [snapshot path]

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use haulbook_core::expense::Expense;
use haulbook_core::fiscal::{CalendarMonth, FiscalYear};
use haulbook_core::fleet::{
    Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck, TruckOwnership,
};
use haulbook_core::ledger::{driver_ledger, supplier_ledger};
use haulbook_core::reports::ReportService;
use haulbook_core::trip::{PartyPayment, Trip, TripCharge, TripStatus};
use haulbook_shared::types::{
    AccountEntryId, ChargeId, DriverId, ExpenseId, PartyId, PaymentId, SupplierId, TripId,
    TruckId, UserId, format_money,
};
use haulbook_store::{FleetSnapshot, MemoryStore};
use rust_decimal::Decimal;

/// Owner of every seeded record.
const DEMO_USER_ID: &str = "demo-user";
/// Fiscal year the demo books cover.
const DEMO_FISCAL_YEAR: i32 = 2024;
/// Trips start on these days of each month.
const TRIP_DAYS: [u32; 3] = [3, 12, 21];
/// Months (from April) whose trips have been settled in full.
const SETTLED_MONTHS: usize = 8;

const PARTIES: [(&str, &str); 3] = [
    ("party-01", "Sharma Traders"),
    ("party-02", "Deccan Cement"),
    ("party-03", "Konkan Agro"),
];
const DRIVERS: [(&str, &str); 3] = [
    ("driver-01", "Ramesh Patil"),
    ("driver-02", "Suresh Yadav"),
    ("driver-03", "Imran Shaikh"),
];
const SUPPLIERS: [(&str, &str); 2] = [
    ("supplier-01", "Gupta Transport"),
    ("supplier-02", "Western Carriers"),
];
/// Truck id, registration, supplier for market trucks.
const TRUCKS: [(&str, &str, Option<&str>); 4] = [
    ("truck-01", "MH12AB1234", None),
    ("truck-02", "MH12CD5678", None),
    ("truck-03", "MH14EF9012", Some("supplier-01")),
    ("truck-04", "GJ05GH3456", Some("supplier-02")),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HAULBOOK__STORE__SNAPSHOT_PATH").ok())
        .map_or_else(|| PathBuf::from("data/snapshot.json"), PathBuf::from);

    println!("Building demo books...");
    let snapshot = demo_snapshot()?;

    println!("Writing snapshot to {}...", path.display());
    MemoryStore::save(&path, &snapshot).await?;

    let receivable = ReportService::total_receivable(
        &snapshot.trips,
        &snapshot.trip_charges,
        &snapshot.party_payments,
    );
    println!(
        "Seeded {} trips, {} expenses; receivable {}",
        snapshot.trips.len(),
        snapshot.expenses.len(),
        format_money(receivable)
    );
    println!("Seeding complete!");

    Ok(())
}

fn day(month: CalendarMonth, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(month.year, month.month, day)
        .with_context(|| format!("invalid day {day} in {month}"))
}

fn percent(amount: Decimal, pct: i64) -> Decimal {
    (amount * Decimal::new(pct, 2)).round_dp(0)
}

fn demo_snapshot() -> anyhow::Result<FleetSnapshot> {
    let user = UserId::new(DEMO_USER_ID);
    let mut s = FleetSnapshot::default();

    seed_masters(&mut s, &user);

    let months = FiscalYear {
        start_year: DEMO_FISCAL_YEAR,
    }
    .months();

    let mut n: usize = 0;
    for (month_index, month) in months.into_iter().enumerate() {
        let settled = month_index < SETTLED_MONTHS;
        seed_month_overheads(&mut s, &user, month, month_index)?;

        for start_day in TRIP_DAYS {
            n += 1;
            seed_trip(&mut s, &user, month, start_day, n, settled)?;
        }
    }

    refresh_balances(&mut s);
    Ok(s)
}

fn seed_masters(s: &mut FleetSnapshot, user: &UserId) {
    s.parties = PARTIES
        .iter()
        .map(|(id, name)| Party {
            id: PartyId::new(*id),
            user_id: user.clone(),
            name: (*name).to_string(),
        })
        .collect();
    s.drivers = DRIVERS
        .iter()
        .map(|(id, name)| Driver {
            id: DriverId::new(*id),
            user_id: user.clone(),
            name: (*name).to_string(),
            balance: Decimal::ZERO,
        })
        .collect();
    s.suppliers = SUPPLIERS
        .iter()
        .map(|(id, name)| Supplier {
            id: SupplierId::new(*id),
            user_id: user.clone(),
            name: (*name).to_string(),
            balance: Decimal::ZERO,
        })
        .collect();
    s.trucks = TRUCKS
        .iter()
        .map(|(id, number, supplier)| Truck {
            id: TruckId::new(*id),
            user_id: user.clone(),
            truck_number: (*number).to_string(),
            ownership: if supplier.is_some() {
                TruckOwnership::Market
            } else {
                TruckOwnership::SelfOwned
            },
            supplier_id: supplier.map(SupplierId::new),
        })
        .collect();
}

/// Rent, driver advances and quarterly maintenance for one month.
fn seed_month_overheads(
    s: &mut FleetSnapshot,
    user: &UserId,
    month: CalendarMonth,
    month_index: usize,
) -> anyhow::Result<()> {
    let first = day(month, 1)?;
    let tag = format!("{:04}{:02}", month.year, month.month);

    s.expenses.push(Expense {
        id: ExpenseId::new(format!("exp-rent-{tag}")),
        user_id: user.clone(),
        amount: Some(Decimal::from(15_000)),
        date: Some(first),
        expense_type: "Rent".to_string(),
        trip_id: None,
        truck_id: None,
        driver_id: None,
        notes: Some("Office rent".to_string()),
    });

    if month_index % 3 == 0 {
        s.expenses.push(Expense {
            id: ExpenseId::new(format!("exp-maint-{tag}")),
            user_id: user.clone(),
            amount: Some(Decimal::from(8_500)),
            date: Some(day(month, 15)?),
            expense_type: "Maintenance".to_string(),
            trip_id: None,
            truck_id: Some(TruckId::new("truck-01")),
            driver_id: None,
            notes: None,
        });
    }

    for (driver_id, _) in DRIVERS {
        s.driver_accounts.push(DriverAccount {
            id: AccountEntryId::new(format!("da-{driver_id}-{tag}")),
            driver_id: DriverId::new(driver_id),
            got: None,
            gave: Some(Decimal::from(5_000)),
            date: Some(first),
            reason: "Monthly advance".to_string(),
        });
    }

    Ok(())
}

fn seed_trip(
    s: &mut FleetSnapshot,
    user: &UserId,
    month: CalendarMonth,
    start_day: u32,
    n: usize,
    settled: bool,
) -> anyhow::Result<()> {
    let (truck_id, _, supplier) = TRUCKS[n % TRUCKS.len()];
    let (party_id, _) = PARTIES[n % PARTIES.len()];
    let (driver_id, _) = DRIVERS[n % DRIVERS.len()];

    let trip_id = TripId::new(format!("trip-{n:03}"));
    let start = day(month, start_day)?;
    let amount = Decimal::from(20_000) + Decimal::from(1_500) * Decimal::from(n % 5);
    let hire = supplier.map(|_| percent(amount, 70));

    s.trips.push(Trip {
        id: trip_id.clone(),
        user_id: user.clone(),
        amount: Some(amount),
        start_date: Some(start),
        party_id: PartyId::new(party_id),
        driver_id: DriverId::new(driver_id),
        truck_id: TruckId::new(truck_id),
        supplier_id: supplier.map(SupplierId::new),
        truck_hire_cost: hire,
        status: if settled {
            TripStatus::Settled
        } else {
            TripStatus::Started
        },
    });

    s.trip_charges.push(TripCharge {
        id: ChargeId::new(format!("chg-{n:03}-loading")),
        trip_id: trip_id.clone(),
        amount: Some(Decimal::from(400)),
        party_bill: true,
        expense_type: "Loading".to_string(),
        date: Some(start),
    });
    if n % 4 == 0 {
        s.trip_charges.push(TripCharge {
            id: ChargeId::new(format!("chg-{n:03}-shortage")),
            trip_id: trip_id.clone(),
            amount: Some(Decimal::from(250)),
            party_bill: false,
            expense_type: "Shortage".to_string(),
            date: Some(day(month, start_day + 2)?),
        });
    }

    let advance = percent(amount, 40);
    s.party_payments.push(PartyPayment {
        id: PaymentId::new(format!("pay-{n:03}-advance")),
        trip_id: Some(trip_id.clone()),
        party_id: PartyId::new(party_id),
        amount: Some(advance),
        date: Some(day(month, start_day + 1)?),
        payment_type: "Advance".to_string(),
        driver_id: Some(DriverId::new(driver_id)),
    });
    if settled {
        s.party_payments.push(PartyPayment {
            id: PaymentId::new(format!("pay-{n:03}-balance")),
            trip_id: Some(trip_id.clone()),
            party_id: PartyId::new(party_id),
            amount: Some(amount + Decimal::from(400) - advance),
            date: Some(day(month, start_day + 6)?),
            payment_type: "Payment".to_string(),
            driver_id: None,
        });
    }

    if let (Some(supplier_id), Some(hire)) = (supplier, hire) {
        s.supplier_accounts.push(SupplierAccount {
            id: AccountEntryId::new(format!("sa-{n:03}")),
            supplier_id: SupplierId::new(supplier_id),
            trip_id: Some(trip_id.clone()),
            amount: Some(if settled { hire } else { percent(hire, 50) }),
            date: Some(day(month, start_day + 5)?),
            payment_mode: Some("Bank".to_string()),
        });
    }

    s.expenses.push(Expense {
        id: ExpenseId::new(format!("exp-{n:03}-fuel")),
        user_id: user.clone(),
        amount: Some(percent(amount, 18)),
        date: Some(day(month, start_day + 1)?),
        expense_type: "Fuel".to_string(),
        trip_id: Some(trip_id),
        truck_id: Some(TruckId::new(truck_id)),
        driver_id: Some(DriverId::new(driver_id)),
        notes: None,
    });

    Ok(())
}

/// Sets every cached balance to the final balance of its passbook.
fn refresh_balances(s: &mut FleetSnapshot) {
    let driver_balances: Vec<Decimal> = s
        .drivers
        .iter()
        .map(|d| {
            driver_ledger(&d.id, &s.driver_accounts, &s.party_payments, &s.expenses).final_balance
        })
        .collect();
    for (driver, balance) in s.drivers.iter_mut().zip(driver_balances) {
        driver.balance = balance;
    }

    let supplier_balances: Vec<Decimal> = s
        .suppliers
        .iter()
        .map(|x| supplier_ledger(&x.id, &s.trips, &s.supplier_accounts).final_balance)
        .collect();
    for (supplier, balance) in s.suppliers.iter_mut().zip(supplier_balances) {
        supplier.balance = balance;
    }
}
