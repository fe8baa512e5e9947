//! Scheduler configuration.

use airtime_core::constants::{
    DEFAULT_INTER_ALLOCATION_GAP_US, DEFAULT_MIN_BROADCAST_CBAP_US, GUARD_TIME_US,
    MAX_CBAP_BLOCK_US,
};

use crate::errors::SchedError;

/// Which admission policy the scheduler runs. Closed set, chosen at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// No reservations; the whole data phase is contention access.
    CbapOnly,
    /// First-fit at a monotonically advancing cursor, non-periodic only.
    Basic,
    /// First-fit over fragmented free slots, periodic reservations
    /// supported.
    Periodic,
}

/// Tunables of the scheduling engine. Values are microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub policy: PolicyKind,
    /// Fixed spacing appended after every allocation block, never
    /// schedulable.
    pub guard_time_us: u32,
    /// Minimum unreserved time the data phase must keep for broadcast
    /// contention access.
    pub min_broadcast_cbap_us: u32,
    /// Extra spacing the basic policy leaves between consecutive
    /// placements; left free and converted to broadcast CBAP. 0 places
    /// accepts back to back.
    pub inter_allocation_gap_us: u32,
}

impl SchedulerConfig {
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            guard_time_us: GUARD_TIME_US,
            min_broadcast_cbap_us: DEFAULT_MIN_BROADCAST_CBAP_US,
            inter_allocation_gap_us: DEFAULT_INTER_ALLOCATION_GAP_US,
        }
    }

    /// Range-check the configuration. Called once by the scheduler
    /// constructor; a failure here is a deployment mistake, not a
    /// runtime condition.
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.guard_time_us == 0 {
            return Err(SchedError::Config("guard time must be non-zero"));
        }
        if self.inter_allocation_gap_us > MAX_CBAP_BLOCK_US {
            return Err(SchedError::Config(
                "inter-allocation gap exceeds the CBAP block field",
            ));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(PolicyKind::Periodic)
    }
}
