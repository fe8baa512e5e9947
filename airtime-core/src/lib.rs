//! Airtime Core — allocation primitives for DMG channel access.
//!
//! This crate carries the data model shared by the access-point
//! scheduling engine (`airtime-sched`) and the embedding MAC: time
//! intervals, allocation records, the broadcast allocation table,
//! validated traffic specifications, and the unified error types.
//! It contains no admission policy and performs no IO.
//!
//! # Module Map
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`constants`] | Protocol field limits and scheduling defaults |
//! | [`errors`] | `TspecError` (fatal config class), `RejectReason` |
//! | [`types`] | `Allocation`, `TrafficSpec`, `ReservationRequest`, `AdmissionResult` |
//! | [`interval`] | `FreeSlotSet` — sorted disjoint free intervals |
//! | [`table`] | `AllocationTable` — the broadcast schedule |
//!
//! All times are microseconds; allocation offsets are relative to the
//! start of the data phase they are announced for.

/// Protocol constants — field limits and scheduling defaults.
pub mod constants;

/// Error types: configuration failures vs. admission rejections.
pub mod errors;

/// Free-slot interval arithmetic.
pub mod interval;

/// The broadcast allocation table.
pub mod table;

/// Allocation and reservation data types.
pub mod types;

pub use errors::{RejectReason, TspecError};
pub use interval::{FreeSlotSet, Interval};
pub use table::AllocationTable;
pub use types::{
    AdmissionResult, Allocation, AllocationId, AllocationKey, AllocationKind, ReservationRequest,
    StationId, TrafficFormat, TrafficSpec,
};
