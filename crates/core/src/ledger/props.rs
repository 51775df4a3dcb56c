//! Property-based tests for the ledger engine.
//!
//! - Running balance fold over merged streams
//! - Final balance equals the last running balance
//! - Equal dates keep source-concatenation order
//! - Passbook final balances equal the independently aggregated balances

use chrono::NaiveDate;
use haulbook_shared::types::{
    AccountEntryId, ChargeId, DriverId, ExpenseId, PartyId, PaymentId, SupplierId, TripId, TruckId,
    UserId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::balance::{driver_outstanding, party_outstanding, supplier_outstanding};
use super::engine::build_ledger;
use super::entry::EntryKind;
use super::passbook::{driver_ledger, party_ledger, supplier_ledger};
use super::source::{SourceRecord, TransactionStream};
use crate::expense::Expense;
use crate::fleet::{DriverAccount, SupplierAccount};
use crate::trip::{PartyPayment, Trip, TripCharge, TripStatus};

/// Strategy for amounts in cents, sometimes missing.
fn amount() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        1 => Just(None::<Decimal>),
        6 => (0i64..5_000_000i64).prop_map(|cents| Some(Decimal::new(cents, 2))),
    ]
}

/// Strategy for dates in a narrow window so ties are common.
fn date() -> impl Strategy<Value = NaiveDate> {
    (1u32..=10).prop_map(|d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap())
}

fn maybe_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![1 => Just(None::<NaiveDate>), 8 => date().prop_map(Some)]
}

fn pick<'a>(ids: &'a [&'a str], n: usize) -> &'a str {
    ids[n % ids.len()]
}

const SUPPLIERS: [&str; 2] = ["s1", "s2"];
const DRIVERS: [&str; 2] = ["d1", "d2"];
const PARTIES: [&str; 2] = ["p1", "p2"];

type TripRow = (
    usize,
    Option<usize>,
    Option<Decimal>,
    Option<Decimal>,
    Option<NaiveDate>,
);

fn make_trip(i: usize, (party, supplier, amt, hire, d): TripRow) -> Trip {
    Trip {
        id: TripId::new(format!("t{i}")),
        user_id: UserId::new("u1"),
        amount: amt,
        start_date: d,
        party_id: PartyId::new(pick(&PARTIES, party)),
        driver_id: DriverId::new(pick(&DRIVERS, i)),
        truck_id: TruckId::new("TRK1"),
        supplier_id: supplier.map(|s| SupplierId::new(pick(&SUPPLIERS, s))),
        truck_hire_cost: hire,
        status: TripStatus::Started,
    }
}

fn trip_strategy() -> impl Strategy<Value = Vec<Trip>> {
    prop::collection::vec(
        (0usize..2, prop::option::of(0usize..2), amount(), amount(), maybe_date()),
        0..8,
    )
    .prop_map(|rows| rows.into_iter().enumerate().map(|(i, row)| make_trip(i, row)).collect())
}

fn charge_strategy() -> impl Strategy<Value = Vec<TripCharge>> {
    prop::collection::vec((0usize..8, amount(), any::<bool>()), 0..10).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (trip, amt, party_bill))| TripCharge {
                id: ChargeId::new(format!("c{i}")),
                trip_id: TripId::new(format!("t{trip}")),
                amount: amt,
                party_bill,
                expense_type: "Loading".to_string(),
                date: None,
            })
            .collect()
    })
}

fn payment_strategy() -> impl Strategy<Value = Vec<PartyPayment>> {
    prop::collection::vec(
        (
            prop::option::of(0usize..8),
            0usize..2,
            amount(),
            date(),
            prop::option::of(0usize..2),
        ),
        0..10,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (trip, party, amt, d, driver))| PartyPayment {
                id: PaymentId::new(format!("pp{i}")),
                trip_id: trip.map(|t| TripId::new(format!("t{t}"))),
                party_id: PartyId::new(pick(&PARTIES, party)),
                amount: amt,
                date: Some(d),
                payment_type: "Payment".to_string(),
                driver_id: driver.map(|d| DriverId::new(pick(&DRIVERS, d))),
            })
            .collect()
    })
}

fn supplier_account_strategy() -> impl Strategy<Value = Vec<SupplierAccount>> {
    prop::collection::vec((0usize..2, amount(), date()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (supplier, amt, d))| SupplierAccount {
                id: AccountEntryId::new(format!("sa{i}")),
                supplier_id: SupplierId::new(pick(&SUPPLIERS, supplier)),
                trip_id: None,
                amount: amt,
                date: Some(d),
                payment_mode: None,
            })
            .collect()
    })
}

fn driver_account_strategy() -> impl Strategy<Value = Vec<DriverAccount>> {
    prop::collection::vec((0usize..2, amount(), amount(), date()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (driver, got, gave, d))| DriverAccount {
                id: AccountEntryId::new(format!("da{i}")),
                driver_id: DriverId::new(pick(&DRIVERS, driver)),
                got,
                gave,
                date: Some(d),
                reason: String::new(),
            })
            .collect()
    })
}

fn expense_strategy() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec((prop::option::of(0usize..2), amount(), date()), 0..8).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (driver, amt, d))| Expense {
                    id: ExpenseId::new(format!("e{i}")),
                    user_id: UserId::new("u1"),
                    amount: amt,
                    date: Some(d),
                    expense_type: "Fuel".to_string(),
                    trip_id: None,
                    truck_id: None,
                    driver_id: driver.map(|d| DriverId::new(pick(&DRIVERS, d))),
                    notes: None,
                })
                .collect()
        },
    )
}

/// Trips with a start date, so every record reaches the ledger.
fn dated(trips: Vec<Trip>) -> Vec<Trip> {
    trips
        .into_iter()
        .map(|mut t| {
            t.start_date = t.start_date.or(NaiveDate::from_ymd_opt(2024, 5, 1));
            t
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every running balance is the previous one plus the entry's amount, and
    /// the last one is the final balance.
    #[test]
    fn prop_fold_and_final_balance(
        trips in trip_strategy(),
        accounts in supplier_account_strategy(),
    ) {
        let ledger = build_ledger([
            trips.iter().map(SourceRecord::TruckHire).collect::<TransactionStream<'_>>(),
            accounts.iter().map(SourceRecord::SupplierPayment).collect(),
        ]);

        if let Some(first) = ledger.entries.first() {
            prop_assert_eq!(first.running_balance, first.signed_amount);
        }
        for pair in ledger.entries.windows(2) {
            prop_assert_eq!(
                pair[1].running_balance,
                pair[0].running_balance + pair[1].signed_amount
            );
            prop_assert!(pair[0].date <= pair[1].date);
        }
        match ledger.entries.last() {
            Some(last) => prop_assert_eq!(last.running_balance, ledger.final_balance),
            None => prop_assert_eq!(ledger.final_balance, Decimal::ZERO),
        }
        prop_assert_eq!(
            ledger.entries.len() + ledger.skipped,
            trips.len() + accounts.len()
        );
    }

    /// Entries sharing a date appear in source-concatenation order.
    #[test]
    fn prop_stable_tie_break(
        trips in trip_strategy(),
        accounts in supplier_account_strategy(),
    ) {
        let ledger = build_ledger([
            trips.iter().map(SourceRecord::TruckHire).collect::<TransactionStream<'_>>(),
            accounts.iter().map(SourceRecord::SupplierPayment).collect(),
        ]);

        let concat: Vec<&str> = trips
            .iter()
            .filter(|t| t.start_date.is_some())
            .map(|t| t.id.as_str())
            .chain(accounts.iter().map(|a| a.id.as_str()))
            .collect();
        let position = |id: &str| concat.iter().position(|c| *c == id);

        for pair in ledger.entries.windows(2) {
            if pair[0].date == pair[1].date {
                prop_assert!(position(&pair[0].source_id) < position(&pair[1].source_id));
            }
        }
    }

    /// Supplier passbooks agree with the aggregated supplier balance.
    #[test]
    fn prop_supplier_ledger_matches_aggregate(
        trips in trip_strategy(),
        accounts in supplier_account_strategy(),
    ) {
        let trips = dated(trips);
        for supplier in SUPPLIERS {
            let supplier = SupplierId::new(supplier);
            let ledger = supplier_ledger(&supplier, &trips, &accounts);
            prop_assert!(ledger
                .reconcile(supplier_outstanding(&supplier, &trips, &accounts))
                .is_ok());
        }
    }

    /// Driver passbooks agree with the aggregated driver balance.
    #[test]
    fn prop_driver_ledger_matches_aggregate(
        accounts in driver_account_strategy(),
        payments in payment_strategy(),
        expenses in expense_strategy(),
    ) {
        for driver in DRIVERS {
            let driver = DriverId::new(driver);
            let ledger = driver_ledger(&driver, &accounts, &payments, &expenses);
            prop_assert_eq!(
                ledger.final_balance,
                driver_outstanding(&driver, &accounts, &payments, &expenses)
            );
        }
    }

    /// Party passbooks agree with the sum of trip balances less unallocated
    /// payments.
    #[test]
    fn prop_party_ledger_matches_aggregate(
        trips in trip_strategy(),
        charges in charge_strategy(),
        payments in payment_strategy(),
    ) {
        let trips = dated(trips);
        for party in PARTIES {
            let party = PartyId::new(party);
            let ledger = party_ledger(&party, &trips, &charges, &payments);
            prop_assert_eq!(
                ledger.final_balance,
                party_outstanding(&party, &trips, &charges, &payments)
            );
        }
    }
}

#[test]
fn test_supplier_payment_before_hire() {
    let d1 = NaiveDate::from_ymd_opt(2024, 3, 20);
    let d2 = NaiveDate::from_ymd_opt(2024, 3, 5);
    let trips = vec![make_trip(0, (0, Some(0), Some(dec!(12000)), Some(dec!(5000)), d1))];
    let accounts = vec![SupplierAccount {
        id: AccountEntryId::new("sa1"),
        supplier_id: SupplierId::new("s1"),
        trip_id: None,
        amount: Some(dec!(2000)),
        date: d2,
        payment_mode: None,
    }];

    let ledger = supplier_ledger(&SupplierId::new("s1"), &trips, &accounts);

    let kinds: Vec<EntryKind> = ledger.entries.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [EntryKind::SupplierPayment, EntryKind::TruckHire]);
    let running: Vec<Decimal> = ledger.entries.iter().map(|e| e.running_balance).collect();
    assert_eq!(running, [dec!(2000), dec!(-3000)]);
    assert_eq!(ledger.final_balance, dec!(-3000));
}
