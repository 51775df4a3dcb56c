//! Fleet master records: trucks, drivers, suppliers, parties and the manual
//! account entries kept against drivers and suppliers.

pub mod types;

pub use types::{Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck, TruckOwnership};
