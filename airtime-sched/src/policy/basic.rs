//! Basic admission policy — first-fit at a monotonic cursor.
//!
//! The cursor starts each cycle right after the last surviving
//! reservation and only ever advances; earlier gaps in the data phase
//! are never revisited and end up as broadcast contention periods.
//! Periodic reservations are not handled here.

use airtime_core::{
    AdmissionResult, Allocation, AllocationKind, AllocationTable, Interval, RejectReason,
    ReservationRequest,
};
use tracing::{debug, warn};

use super::{alloc_duration, EvalCtx};

/// Per-cycle cursor of the basic policy.
#[derive(Debug, Default)]
pub(crate) struct BasicState {
    /// Next placement offset, relative to the data-phase start.
    pub cursor: u32,
}

impl BasicState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the cursor after the last busy block of the surviving
    /// reservations (0 on an empty table).
    pub fn reset_after(&mut self, table: &AllocationTable, guard_us: u32) {
        self.cursor = table
            .busy_blocks(guard_us)
            .iter()
            .map(|block| block.end)
            .max()
            .unwrap_or(0);
    }
}

pub(crate) fn evaluate_add(
    state: &mut BasicState,
    request: &ReservationRequest,
    ctx: &mut EvalCtx<'_>,
) -> AdmissionResult {
    if request.tspec.is_periodic() {
        warn!(
            source = request.source,
            "basic policy does not admit periodic reservations"
        );
        return AdmissionResult::Rejected(RejectReason::PeriodicUnsupported);
    }

    let duration = alloc_duration(&request.tspec);
    let guard = ctx.config.guard_time_us;
    let cost = duration + guard;

    let end = match state.cursor.checked_add(cost) {
        Some(end) if end <= ctx.dti_us => end,
        _ => return AdmissionResult::Rejected(RejectReason::InsufficientFreeTime),
    };
    // The trailing remainder of the data phase stays contention access.
    if ctx.dti_us - end < ctx.config.min_broadcast_cbap_us {
        return AdmissionResult::Rejected(RejectReason::ContentionFloor);
    }

    let start = state.cursor;
    ctx.slots.carve(Interval::new(start, end));
    ctx.table.push(Allocation {
        id: request.allocation_id,
        kind: AllocationKind::ReservedPeriod,
        persistent: request.tspec.persistent,
        source: request.source,
        dest: request.dest,
        start_us: start,
        block_duration_us: duration,
        block_period_us: 0,
        block_count: 1,
        announced: false,
    });
    state.cursor = end.saturating_add(ctx.config.inter_allocation_gap_us);

    debug!(
        source = request.source,
        dest = request.dest,
        start,
        duration,
        "reservation placed at cursor"
    );
    AdmissionResult::Accepted(request.key())
}
