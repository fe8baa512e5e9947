//! Conformance harness — scheduling invariant tests.
//!
//! Enforces the MUST-level properties of the admission engine against
//! full scheduler runs (phase events in, broadcast table out).
//!
//! Invariant coverage:
//! - Disjointness: guard-expanded allocations never overlap
//! - Coverage: every microsecond of the data phase is accounted for
//!   after each boundary
//! - Atomicity: a rejected request mutates nothing
//! - Round-trip: add then delete restores the free time
//! - Monotonic shrink: modify never grows an allocation
//! - Scenario suite A–E: exact placements, rejections, gap filling
//! - Lifecycle: persistence, cleanup, FIFO batching, result delivery

mod common;

mod invariants;
