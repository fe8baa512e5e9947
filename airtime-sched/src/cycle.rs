//! Cycle phase control and the scheduler facade.
//!
//! The access point repeats a fixed-length cycle (beacon interval):
//! a header phase for beaconing and association, then a data phase for
//! reserved and contention access. [`Scheduler`] consumes explicit phase
//! events from the embedding MAC, queues reservation requests during
//! the data phase, and runs the whole admission pipeline exactly once
//! per cycle boundary:
//!
//! 1. drop the previous cycle's broadcast contention fillers,
//! 2. remove every non-persistent allocation already announced,
//! 3. rederive the free-slot set from the survivors,
//! 4. drain the request queue through the admission policy (FIFO),
//! 5. convert the remaining free slots to broadcast CBAPs,
//! 6. sort and mark the table announced, ready for broadcast.
//!
//! Between boundaries nothing mutates the table except an immediate
//! delete, which the protocol does not batch.

use std::collections::VecDeque;

use airtime_core::{
    AdmissionResult, Allocation, AllocationKey, AllocationKind, AllocationTable, FreeSlotSet,
    ReservationRequest,
};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::errors::SchedError;
use crate::gap;
use crate::policy::{EvalCtx, Policy};

/// Where the recurring cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No cycle has started yet.
    Idle,
    /// Beaconing/association phase; the table finalized at the last
    /// boundary is being broadcast.
    HeaderPhase,
    /// Reservation and contention access; incoming requests queue here.
    DataPhase,
}

/// The allocation admission-control and slot-management engine of one
/// access-point role.
#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    policy: Policy,
    phase: Phase,
    cycle_us: u32,
    dti_us: u32,
    table: AllocationTable,
    slots: FreeSlotSet,
    queue: VecDeque<ReservationRequest>,
    results: Vec<AdmissionResult>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: Policy::new(config.policy),
            phase: Phase::Idle,
            cycle_us: 0,
            dti_us: 0,
            table: AllocationTable::new(),
            slots: FreeSlotSet::empty(),
            queue: VecDeque::new(),
            results: Vec::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Data-phase duration of the current cycle, microseconds.
    pub fn data_phase_us(&self) -> u32 {
        self.dti_us
    }

    /// The canonical allocation table, ordered by start offset once a
    /// boundary has run. Read-only: broadcast it, do not keep it across
    /// boundaries.
    pub fn allocation_table(&self) -> &[Allocation] {
        self.table.entries()
    }

    /// Current free slots of the data phase.
    pub fn free_slots(&self) -> &FreeSlotSet {
        &self.slots
    }

    /// Number of requests waiting for the next boundary.
    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    /// Admission outcomes of the last boundary batch, in arrival order.
    /// Each maps to the protocol status code of one ADDTS response.
    pub fn drain_results(&mut self) -> Vec<AdmissionResult> {
        std::mem::take(&mut self.results)
    }

    /// A new cycle begins its header phase. `bhi_us` is the
    /// non-reservable beaconing/association prefix; the rest of the
    /// cycle is the data phase. If a data phase was running, this is the
    /// cycle boundary: the admission pipeline runs here, against the new
    /// cycle's dimensions.
    pub fn on_cycle_started(&mut self, cycle_us: u32, bhi_us: u32) -> Result<(), SchedError> {
        if bhi_us >= cycle_us {
            return Err(SchedError::Config(
                "header phase must be shorter than the cycle",
            ));
        }
        if self.phase == Phase::HeaderPhase {
            return Err(SchedError::PhaseViolation(
                "cycle started again before any data phase",
            ));
        }
        let ending = self.phase == Phase::DataPhase;
        self.cycle_us = cycle_us;
        self.dti_us = cycle_us - bhi_us;
        if ending {
            self.cycle_boundary();
        }
        self.phase = Phase::HeaderPhase;
        info!(cycle_us, bhi_us, dti_us = self.dti_us, "header phase started");
        Ok(())
    }

    /// The data phase of the current cycle begins.
    pub fn on_data_phase_started(&mut self) -> Result<(), SchedError> {
        if self.phase != Phase::HeaderPhase {
            return Err(SchedError::PhaseViolation(
                "data phase may only follow a header phase",
            ));
        }
        self.phase = Phase::DataPhase;
        if self.table.is_empty() {
            self.slots = FreeSlotSet::spanning(self.dti_us);
        }
        info!(dti_us = self.dti_us, "data phase started");
        Ok(())
    }

    /// Queue a reservation request for the next boundary. Requests are
    /// evaluated in arrival order; a request whose key matches an
    /// existing allocation asks for a (shrink-only) modification.
    pub fn on_add_request(&mut self, request: ReservationRequest) {
        debug!(
            source = request.source,
            dest = request.dest,
            id = request.allocation_id,
            "reservation request queued"
        );
        self.queue.push_back(request);
    }

    /// Remove an allocation immediately (deletes are not batched) and
    /// return its time to the free-slot set.
    pub fn on_delete_request(&mut self, key: AllocationKey) -> Result<(), SchedError> {
        let Some(removed) = self.table.remove(key) else {
            warn!(?key, "delete for unknown allocation");
            return Err(SchedError::UnknownAllocation {
                id: key.id,
                source: key.source,
                dest: key.dest,
            });
        };
        let guard = match removed.kind {
            AllocationKind::ReservedPeriod => self.config.guard_time_us,
            AllocationKind::ContentionPeriod => 0,
        };
        for block in removed.busy_blocks(guard) {
            self.slots.release(block);
        }
        info!(?key, blocks = removed.block_count, "allocation deleted");
        Ok(())
    }

    /// The once-per-boundary admission pipeline.
    fn cycle_boundary(&mut self) {
        let guard = self.config.guard_time_us;

        // Fillers are regenerated every cycle; non-persistent
        // reservations live for exactly one announcement.
        self.table.retain(|a| !a.is_broadcast_filler());
        self.table.retain(|a| a.persistent || !a.announced);
        self.slots = FreeSlotSet::rederive(self.dti_us, self.table.busy_blocks(guard));
        self.policy.begin_cycle(&self.table, guard);

        let batch = self.queue.len();
        self.results.clear();
        while let Some(request) = self.queue.pop_front() {
            let mut ctx = EvalCtx {
                table: &mut self.table,
                slots: &mut self.slots,
                config: &self.config,
                cycle_us: self.cycle_us,
                dti_us: self.dti_us,
            };
            let result = self.policy.evaluate(&request, &mut ctx);
            debug!(
                source = request.source,
                dest = request.dest,
                id = request.allocation_id,
                accepted = result.is_accepted(),
                "request evaluated"
            );
            self.results.push(result);
        }

        gap::fill(&mut self.table, &mut self.slots);
        self.table.sort_by_start();
        self.table.mark_all_announced();
        debug_assert!(self.table.is_disjoint(guard));

        info!(
            batch,
            allocations = self.table.len(),
            "cycle boundary complete, table ready for broadcast"
        );
    }
}
