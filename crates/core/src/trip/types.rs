//! Trip records and the charge/payment records that hang off a trip.

use chrono::NaiveDate;
use haulbook_shared::types::{
    ChargeId, DriverId, PartyId, PaymentId, SupplierId, TripId, TruckId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trip lifecycle milestone, stored as `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TripStatus {
    /// Booked and dispatched.
    #[default]
    Started,
    /// Goods delivered.
    Completed,
    /// Proof of delivery received from the driver.
    PodReceived,
    /// Proof of delivery submitted to the party.
    PodSubmitted,
    /// Freight settled with the party.
    Settled,
}

impl TryFrom<u8> for TripStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Started),
            1 => Ok(Self::Completed),
            2 => Ok(Self::PodReceived),
            3 => Ok(Self::PodSubmitted),
            4 => Ok(Self::Settled),
            other => Err(format!("Unknown trip status: {other}")),
        }
    }
}

impl From<TripStatus> for u8 {
    fn from(status: TripStatus) -> Self {
        match status {
            TripStatus::Started => 0,
            TripStatus::Completed => 1,
            TripStatus::PodReceived => 2,
            TripStatus::PodSubmitted => 3,
            TripStatus::Settled => 4,
        }
    }
}

/// A booked trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Trip identifier.
    pub id: TripId,
    /// Owning user.
    pub user_id: UserId,
    /// Freight owed by the party.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Date the trip started.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Party billed for the freight.
    pub party_id: PartyId,
    /// Driver on the trip.
    pub driver_id: DriverId,
    /// Truck used for the trip.
    pub truck_id: TruckId,
    /// Truck owner when the truck is market-hired.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Hire cost owed to the supplier.
    #[serde(default)]
    pub truck_hire_cost: Option<Decimal>,
    /// Lifecycle milestone.
    #[serde(default)]
    pub status: TripStatus,
}

/// A cost raised against a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCharge {
    /// Charge identifier.
    pub id: ChargeId,
    /// Trip the charge belongs to.
    pub trip_id: TripId,
    /// Charge amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// True when billed to the party, false when absorbed as a deduction.
    pub party_bill: bool,
    /// Charge label (e.g. "Detention", "Loading").
    #[serde(default)]
    pub expense_type: String,
    /// Date the charge was raised.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Money received from a party against freight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyPayment {
    /// Payment identifier.
    pub id: PaymentId,
    /// Trip the payment was taken against, if allocated.
    #[serde(default)]
    pub trip_id: Option<TripId>,
    /// Paying party.
    pub party_id: PartyId,
    /// Amount received.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Date received.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Payment type (e.g. "Advance", "Payment").
    #[serde(default)]
    pub payment_type: String,
    /// Driver who collected the cash, when collected on the road.
    #[serde(default)]
    pub driver_id: Option<DriverId>,
}
