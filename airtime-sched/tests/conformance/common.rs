//! Shared helpers for the conformance suite.

use airtime_core::constants::GUARD_TIME_US;
use airtime_sched::{
    Allocation, AllocationKind, PolicyKind, ReservationRequest, Scheduler, SchedulerConfig,
    TrafficFormat, TrafficSpec,
};

/// Cycle used throughout: no header phase, so the data phase spans the
/// whole 100 ms cycle and periodic intervals divide evenly.
pub const CYCLE_US: u32 = 100_000;
pub const GUARD: u32 = GUARD_TIME_US;

pub fn scheduler(kind: PolicyKind) -> Scheduler {
    Scheduler::new(SchedulerConfig::new(kind)).expect("default config is valid")
}

/// Drive the scheduler into its first data phase.
pub fn start(sched: &mut Scheduler) {
    sched.on_cycle_started(CYCLE_US, 0).expect("cycle start");
    sched.on_data_phase_started().expect("data phase start");
}

/// Cross one cycle boundary: the admission pipeline runs, then the next
/// data phase begins.
pub fn boundary(sched: &mut Scheduler) {
    sched.on_cycle_started(CYCLE_US, 0).expect("cycle start");
    sched.on_data_phase_started().expect("data phase start");
}

/// Isochronous reservation request.
pub fn iso(
    id: u8,
    source: u8,
    dest: u8,
    min: u32,
    max: u32,
    periods: u16,
    persistent: bool,
) -> ReservationRequest {
    ReservationRequest {
        source,
        dest,
        allocation_id: id,
        tspec: TrafficSpec::new(TrafficFormat::Isochronous, min, max, periods, persistent)
            .expect("test tspec is valid"),
    }
}

/// Reserved-period entries of the broadcast table, in table order.
pub fn reservations(sched: &Scheduler) -> Vec<Allocation> {
    sched
        .allocation_table()
        .iter()
        .filter(|a| a.kind == AllocationKind::ReservedPeriod)
        .copied()
        .collect()
}

/// Broadcast contention fillers as `(start, end)` spans, in table order.
pub fn fillers(sched: &Scheduler) -> Vec<(u32, u32)> {
    sched
        .allocation_table()
        .iter()
        .filter(|a| a.is_broadcast_filler())
        .map(|a| (a.start_us, a.start_us + a.block_duration_us))
        .collect()
}

/// Total width accounted by the table: guard-expanded reserved blocks
/// plus exact contention spans.
pub fn accounted_width(sched: &Scheduler) -> u32 {
    sched
        .allocation_table()
        .iter()
        .map(|a| {
            let guard = match a.kind {
                AllocationKind::ReservedPeriod => GUARD,
                AllocationKind::ContentionPeriod => 0,
            };
            (a.block_duration_us + guard) * u32::from(a.block_count)
        })
        .sum()
}

/// Assert that no two busy blocks of the table overlap.
pub fn assert_disjoint(sched: &Scheduler) {
    let mut blocks: Vec<(u32, u32)> = Vec::new();
    for a in sched.allocation_table() {
        let guard = match a.kind {
            AllocationKind::ReservedPeriod => GUARD,
            AllocationKind::ContentionPeriod => 0,
        };
        for block in a.busy_blocks(guard) {
            blocks.push((block.start, block.end));
        }
    }
    blocks.sort();
    for pair in blocks.windows(2) {
        assert!(
            pair[0].1 <= pair[1].0,
            "overlapping blocks: {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}
