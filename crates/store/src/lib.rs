//! Record storage for Haulbook.
//!
//! - `FleetStore` - async seam the API reads record sets through and writes
//!   source records and cached balances back through
//! - `MemoryStore` - in-process implementation over a JSON snapshot file

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use snapshot::{FleetSnapshot, RemovedTrip};
pub use traits::FleetStore;
