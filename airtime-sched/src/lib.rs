//! Airtime Sched — admission control and slot management for DMG
//! channel access.
//!
//! An access-point role repeats a fixed-length cycle (beacon interval)
//! split into a header phase and a data phase. This crate decides which
//! reservation requests get time inside the data phase, keeps the
//! broadcast allocation table collision-free, and guarantees a minimum
//! of contention-based access every cycle. All decisions are
//! synchronous and batched at cycle boundaries; the crate performs no
//! IO and owns no clock — the embedding MAC drives it with explicit
//! phase events.
//!
//! # Module Map
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `SchedulerConfig`, `PolicyKind` |
//! | [`cycle`] | `Scheduler` — phase machine, request queue, boundary pipeline |
//! | [`errors`] | `SchedError` — engine-level failures |
//! | `policy` | CbapOnly / Basic / Periodic admission (crate-private) |
//! | `gap` | broadcast CBAP gap filling (crate-private) |
//!
//! The data model (`Allocation`, `FreeSlotSet`, `TrafficSpec`, the
//! admission outcomes) lives in `airtime-core` and is re-exported here
//! for convenience.

pub mod config;
pub mod cycle;
pub mod errors;

mod gap;
mod policy;

pub use config::{PolicyKind, SchedulerConfig};
pub use cycle::{Phase, Scheduler};
pub use errors::SchedError;

pub use airtime_core::{
    AdmissionResult, Allocation, AllocationId, AllocationKey, AllocationKind, FreeSlotSet,
    Interval, RejectReason, ReservationRequest, StationId, TrafficFormat, TrafficSpec, TspecError,
};
