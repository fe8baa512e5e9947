//! Cross-cutting invariants checked over full scheduler runs.

use airtime_sched::{AdmissionResult, AllocationKey, PolicyKind, RejectReason};

use crate::common::{
    accounted_width, boundary, fillers, iso, reservations, scheduler, start, CYCLE_US,
};

// ─── Disjointness and coverage ────────────────────────────────────────

#[test]
fn disjointness_holds_across_mixed_admissions() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);

    sched.on_add_request(iso(1, 10, 20, 20_000, 20_000, 0, true));
    sched.on_add_request(iso(2, 11, 20, 5_000, 5_000, 10, true));
    sched.on_add_request(iso(3, 12, 21, 3_000, 4_000, 0, false));
    boundary(&mut sched);

    crate::common::assert_disjoint(&sched);
    assert_eq!(accounted_width(&sched), CYCLE_US);
}

#[test]
fn coverage_holds_after_every_boundary() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);

    for round in 0..4u8 {
        sched.on_add_request(iso(round + 1, 10 + round, 20, 2_000, 3_000, 0, round % 2 == 0));
        boundary(&mut sched);
        assert_eq!(
            accounted_width(&sched),
            CYCLE_US,
            "coverage broken after boundary {round}"
        );
        crate::common::assert_disjoint(&sched);
        sched.drain_results();
    }
}

// ─── Atomicity of rejection ───────────────────────────────────────────

#[test]
fn rejected_periodic_request_mutates_nothing() {
    // Twin schedulers: one receives a doomed periodic request, the
    // other does not. Their broadcast tables must come out identical.
    let mut with_reject = scheduler(PolicyKind::Periodic);
    let mut control = scheduler(PolicyKind::Periodic);
    for sched in [&mut with_reject, &mut control] {
        sched.on_cycle_started(40_000, 0).unwrap();
        sched.on_data_phase_started().unwrap();
        sched.on_add_request(iso(1, 10, 20, 20_000, 20_000, 0, true));
        sched.on_cycle_started(40_000, 0).unwrap();
        sched.on_data_phase_started().unwrap();
        sched.drain_results();
    }

    // Only one repetition can fit: rejected, nothing committed.
    with_reject.on_add_request(iso(2, 11, 20, 5_000, 5_000, 2, true));
    for sched in [&mut with_reject, &mut control] {
        sched.on_cycle_started(40_000, 0).unwrap();
        sched.on_data_phase_started().unwrap();
    }

    assert_eq!(
        with_reject.drain_results(),
        vec![AdmissionResult::Rejected(RejectReason::BrokenPeriodicity)]
    );
    assert_eq!(with_reject.allocation_table(), control.allocation_table());
}

// ─── Round-trip: add then delete ──────────────────────────────────────

#[test]
fn add_then_delete_restores_the_free_time() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);
    sched.on_add_request(iso(1, 10, 20, 20_000, 20_000, 0, true));
    boundary(&mut sched);
    assert!(sched.drain_results()[0].is_accepted());

    sched
        .on_delete_request(AllocationKey {
            id: 1,
            source: 10,
            dest: 20,
        })
        .unwrap();
    boundary(&mut sched);

    // Back to the pristine layout: one contention period over the whole
    // data phase (split only by the CBAP field limit).
    assert!(reservations(&sched).is_empty());
    assert_eq!(fillers(&sched), vec![(0, 65_535), (65_535, 100_000)]);
}

#[test]
fn delete_of_a_periodic_allocation_frees_every_block() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);
    sched.on_add_request(iso(2, 11, 20, 5_000, 5_000, 10, true));
    boundary(&mut sched);
    assert!(sched.drain_results()[0].is_accepted());
    let placed = reservations(&sched)[0];
    assert!(placed.block_count >= 2);

    sched
        .on_delete_request(AllocationKey {
            id: 2,
            source: 11,
            dest: 20,
        })
        .unwrap();
    boundary(&mut sched);

    assert!(reservations(&sched).is_empty());
    assert_eq!(accounted_width(&sched), CYCLE_US);
    assert_eq!(fillers(&sched), vec![(0, 65_535), (65_535, 100_000)]);
}

// ─── Monotonic shrink ─────────────────────────────────────────────────

#[test]
fn shrink_grows_free_width_by_exactly_the_difference() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);
    sched.on_add_request(iso(1, 10, 20, 20_000, 20_000, 0, true));
    boundary(&mut sched);
    sched.drain_results();
    let free_before: u32 = fillers(&sched).iter().map(|(s, e)| e - s).sum();

    sched.on_add_request(iso(1, 10, 20, 15_000, 15_000, 0, true));
    boundary(&mut sched);
    assert!(sched.drain_results()[0].is_accepted());
    let free_after: u32 = fillers(&sched).iter().map(|(s, e)| e - s).sum();

    assert_eq!(free_after - free_before, 5_000);
}

#[test]
fn shrink_of_a_periodic_allocation_frees_every_tail() {
    let mut sched = scheduler(PolicyKind::Periodic);
    start(&mut sched);
    sched.on_add_request(iso(2, 11, 20, 5_000, 5_000, 10, true));
    boundary(&mut sched);
    assert!(sched.drain_results()[0].is_accepted());
    let blocks = u32::from(reservations(&sched)[0].block_count);
    let free_before: u32 = fillers(&sched).iter().map(|(s, e)| e - s).sum();

    sched.on_add_request(iso(2, 11, 20, 4_000, 4_000, 10, true));
    boundary(&mut sched);
    assert!(sched.drain_results()[0].is_accepted());
    let free_after: u32 = fillers(&sched).iter().map(|(s, e)| e - s).sum();

    assert_eq!(free_after - free_before, 1_000 * blocks);
    crate::common::assert_disjoint(&sched);
}
