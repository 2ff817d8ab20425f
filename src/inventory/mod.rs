//! Input inventories produced by the collectors.
//!
//! Each inventory is a JSON array of one record variant, already normalized
//! through [`crate::path::normalize`]. `load` treats an absent artifact as an
//! empty inventory and a malformed one as fatal, so a run never reconciles a
//! partial, inconsistent set of records.

pub mod load;
pub mod model;

pub use load::{InventoryPaths, Inventories, load_inventory};
pub use model::{
    BaselineRecord, CappedVec, CaptureRecord, InventoryRecord, Method, REFERENCE_CAP, Reference,
    SAMPLE_CAP, Source, StaticRecord,
};
