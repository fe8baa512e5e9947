//! Admission policies — the closed set of request-evaluation strategies.
//!
//! One policy is selected at scheduler construction and dispatched by
//! match; there is no open-ended trait surface. Every policy honors the
//! same contract: evaluation of one request either commits completely
//! (allocation inserted, free slots carved) or leaves both structures
//! byte-for-byte untouched.
//!
//! Modification (same `(id, source, dest)` key as an existing
//! allocation) and deletion are shared across the admitting policies:
//! only shrink is supported, and deletion returns every block to the
//! free-slot set.

use airtime_core::{
    AdmissionResult, AllocationTable, FreeSlotSet, Interval, RejectReason, ReservationRequest,
    TrafficFormat, TrafficSpec,
};
use tracing::{debug, warn};

use crate::config::{PolicyKind, SchedulerConfig};

mod basic;
mod periodic;

use basic::BasicState;

/// Everything a policy may touch while evaluating one request.
pub(crate) struct EvalCtx<'a> {
    pub table: &'a mut AllocationTable,
    pub slots: &'a mut FreeSlotSet,
    pub config: &'a SchedulerConfig,
    /// Full cycle (beacon interval) duration — periodic repetition is
    /// derived from this, not from the data phase.
    pub cycle_us: u32,
    /// Data-phase duration of the cycle being scheduled.
    pub dti_us: u32,
}

/// The selected admission policy plus its per-cycle state.
#[derive(Debug)]
pub(crate) enum Policy {
    CbapOnly,
    Basic(BasicState),
    Periodic,
}

impl Policy {
    pub fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::CbapOnly => Policy::CbapOnly,
            PolicyKind::Basic => Policy::Basic(BasicState::new()),
            PolicyKind::Periodic => Policy::Periodic,
        }
    }

    /// Reset per-cycle state at the boundary, before the request batch
    /// is drained. The basic policy's cursor restarts after the last
    /// surviving reservation.
    pub fn begin_cycle(&mut self, table: &AllocationTable, guard_us: u32) {
        if let Policy::Basic(state) = self {
            state.reset_after(table, guard_us);
        }
    }

    /// Evaluate one queued request. A request whose key matches an
    /// existing allocation is a modification; anything else asks for a
    /// new allocation.
    pub fn evaluate(&mut self, request: &ReservationRequest, ctx: &mut EvalCtx<'_>) -> AdmissionResult {
        if let Policy::CbapOnly = self {
            debug!(source = request.source, "cbap-only policy rejects reservation");
            return AdmissionResult::Rejected(RejectReason::PolicyAdmitsNone);
        }
        if let Some(result) = modify_existing(request, ctx) {
            return result;
        }
        match self {
            Policy::CbapOnly => AdmissionResult::Rejected(RejectReason::PolicyAdmitsNone),
            Policy::Basic(state) => basic::evaluate_add(state, request, ctx),
            Policy::Periodic => periodic::evaluate_add(request, ctx),
        }
    }
}

/// Duration granted to a request: the desired maximum for isochronous
/// specs, the minimum for asynchronous specs (whose maximum field is
/// reserved by the protocol).
pub(crate) fn alloc_duration(tspec: &TrafficSpec) -> u32 {
    match tspec.format {
        TrafficFormat::Isochronous => tspec.max_duration_us,
        TrafficFormat::Asynchronous => tspec.min_duration_us,
    }
}

/// Shrink-only modification of an existing allocation, or `None` when
/// the request's key matches nothing and it is a plain Add. Every
/// block's freed tail goes back to the free-slot set, coalescing with
/// adjacent free intervals.
fn modify_existing(
    request: &ReservationRequest,
    ctx: &mut EvalCtx<'_>,
) -> Option<AdmissionResult> {
    let key = request.key();
    let new_duration = alloc_duration(&request.tspec);
    let guard = ctx.config.guard_time_us;

    let allocation = ctx.table.find_mut(key)?;
    let current = allocation.block_duration_us;

    if new_duration > current {
        warn!(
            ?key,
            current, new_duration, "growth on modify is unsupported, rejecting"
        );
        return Some(AdmissionResult::Rejected(RejectReason::GrowthUnsupported));
    }
    if new_duration == current {
        return Some(AdmissionResult::Accepted(key));
    }

    allocation.block_duration_us = new_duration;
    let block_starts: Vec<u32> = (0..allocation.block_count)
        .map(|n| allocation.block_start(n))
        .collect();

    for start in block_starts {
        let freed = Interval::new(start + new_duration + guard, start + current + guard);
        ctx.slots.release(freed);
    }
    debug!(?key, current, new_duration, "allocation shrunk");
    Some(AdmissionResult::Accepted(key))
}
