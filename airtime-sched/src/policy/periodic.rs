//! Periodic admission policy — first-fit over fragmented free slots.
//!
//! Non-periodic requests take the earliest free slot with room for the
//! guard-expanded block. Periodic requests repeat every
//! `cycle / period_count` microseconds (the full beacon interval, not
//! the data phase): placement starts in the earliest slot that can host
//! the first block and then must hit a free slot at every multiple of
//! the repetition interval — a single miss stops the scan. Fewer than
//! two placeable blocks rejects the whole request with no mutation.

use airtime_core::constants::MAX_BLOCKS_PER_ALLOCATION;
use airtime_core::{
    AdmissionResult, Allocation, AllocationKind, Interval, RejectReason, ReservationRequest,
};
use tracing::{debug, warn};

use super::{alloc_duration, EvalCtx};

pub(crate) fn evaluate_add(
    request: &ReservationRequest,
    ctx: &mut EvalCtx<'_>,
) -> AdmissionResult {
    let duration = alloc_duration(&request.tspec);
    let guard = ctx.config.guard_time_us;
    let cost = duration + guard;

    if !request.tspec.is_periodic() {
        return add_single_block(request, duration, cost, ctx);
    }

    let sp_interval = ctx.cycle_us / u32::from(request.tspec.period_count);
    // Every repetition must leave the configured contention floor
    // between itself and the next.
    if sp_interval < cost.saturating_add(ctx.config.min_broadcast_cbap_us) {
        warn!(
            sp_interval,
            duration, "repetition interval cannot preserve the minimum broadcast CBAP"
        );
        return AdmissionResult::Rejected(RejectReason::ContentionFloor);
    }

    let max_blocks = request.tspec.period_count.min(MAX_BLOCKS_PER_ALLOCATION);
    let starts = placement_starts(ctx.slots.slots(), cost, sp_interval, max_blocks);
    if starts.len() < 2 {
        // A periodic grant that repeats fewer than twice per cycle is
        // not periodic at all.
        debug!(placed = starts.len(), "periodic placement infeasible");
        return AdmissionResult::Rejected(RejectReason::BrokenPeriodicity);
    }

    for &start in &starts {
        ctx.slots.carve(Interval::new(start, start + cost));
    }
    ctx.table.push(Allocation {
        id: request.allocation_id,
        kind: AllocationKind::ReservedPeriod,
        persistent: request.tspec.persistent,
        source: request.source,
        dest: request.dest,
        start_us: starts[0],
        block_duration_us: duration,
        block_period_us: sp_interval,
        block_count: starts.len() as u16,
        announced: false,
    });
    debug!(
        source = request.source,
        dest = request.dest,
        first = starts[0],
        blocks = starts.len(),
        sp_interval,
        "periodic reservation placed"
    );
    AdmissionResult::Accepted(request.key())
}

fn add_single_block(
    request: &ReservationRequest,
    duration: u32,
    cost: u32,
    ctx: &mut EvalCtx<'_>,
) -> AdmissionResult {
    let Some(slot) = ctx.slots.first_fit(cost) else {
        debug!(duration, "no free slot wide enough");
        return AdmissionResult::Rejected(RejectReason::InsufficientFreeTime);
    };
    ctx.slots.carve(Interval::new(slot.start, slot.start + cost));
    ctx.table.push(Allocation {
        id: request.allocation_id,
        kind: AllocationKind::ReservedPeriod,
        persistent: request.tspec.persistent,
        source: request.source,
        dest: request.dest,
        start_us: slot.start,
        block_duration_us: duration,
        block_period_us: 0,
        block_count: 1,
        announced: false,
    });
    debug!(
        source = request.source,
        dest = request.dest,
        start = slot.start,
        duration,
        "reservation placed in first fitting slot"
    );
    AdmissionResult::Accepted(request.key())
}

/// Greedy periodic placement scan over the sorted free slots.
///
/// While no block has been placed yet the candidate start snaps forward
/// to each next slot's start (per-slot restart). Once the first block is
/// placed, every subsequent candidate `first + n * sp_interval` must lie
/// inside a free slot with room for `cost`; the first miss ends the
/// scan. Returns the placed start offsets in order.
fn placement_starts(
    slots: &[Interval],
    cost: u32,
    sp_interval: u32,
    max_blocks: u16,
) -> Vec<u32> {
    let mut starts: Vec<u32> = Vec::new();
    let Some(first) = slots.first() else {
        return starts;
    };
    let mut candidate = first.start;
    let mut idx = 0;

    while idx < slots.len() && starts.len() < usize::from(max_blocks) {
        let slot = slots[idx];
        if slot.end <= candidate {
            // Candidate lies past this slot entirely.
            idx += 1;
            continue;
        }
        if candidate < slot.start {
            if starts.is_empty() {
                candidate = slot.start;
            } else {
                // The required offset falls in a reserved gap.
                break;
            }
        }
        if candidate + cost <= slot.end {
            starts.push(candidate);
            candidate += sp_interval;
        } else if starts.is_empty() {
            // Restart the search at the next slot.
            idx += 1;
            if let Some(next) = slots.get(idx) {
                candidate = next.start;
            }
        } else {
            break;
        }
    }
    starts
}
