//! Allocation and reservation types.
//!
//! These are plain data carriers: the engine in `airtime-sched` owns all
//! policy. Fields map one-to-one onto the protocol's allocation-field
//! information element, which is encoded by the embedding MAC — no wire
//! format lives here.
//!
//! All times are microseconds. Allocation start offsets are relative to
//! the beginning of the data phase of the cycle they are broadcast in.

use crate::constants::{
    BROADCAST_AID, FILLER_ALLOCATION_ID, MAX_BLOCKS_PER_ALLOCATION, MAX_SP_BLOCK_US,
};
use crate::errors::{RejectReason, TspecError};
use crate::interval::Interval;

/// Association id of a station, caller-owned. The engine never inspects
/// it beyond equality and the broadcast sentinel.
pub type StationId = u8;

/// Identifier of an allocation, unique per (source, destination) pair.
pub type AllocationId = u8;

/// Kind of channel access granted by an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocationKind {
    /// Contention-free service period granted to one source/destination
    /// pair (SP).
    ReservedPeriod,
    /// Shared contention-based access window (CBAP).
    ContentionPeriod,
}

/// Reservation semantics of a traffic spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrafficFormat {
    /// Both duration bounds apply; the policy picks the granted duration
    /// between them.
    Isochronous,
    /// Only the minimum bound applies; the maximum field is reserved by
    /// the protocol in this mode.
    Asynchronous,
}

/// Validated numeric portion of a reservation request.
///
/// Construction is the configuration gate of the engine: a spec that
/// fails [`TrafficSpec::new`] never reaches a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficSpec {
    pub format: TrafficFormat,
    /// Minimum acceptable duration per block, microseconds.
    pub min_duration_us: u32,
    /// Desired duration per block, microseconds. Ignored for
    /// asynchronous specs.
    pub max_duration_us: u32,
    /// Number of repetitions per cycle; 0 requests a single block.
    pub period_count: u16,
    /// Whether the allocation survives cycle boundaries without
    /// re-admission.
    pub persistent: bool,
}

impl TrafficSpec {
    /// Validate and build a traffic spec.
    ///
    /// Rejected configurations (see [`TspecError`]): zero minimum
    /// duration, `min > max` for isochronous specs, durations beyond the
    /// reserved-period block field, and period counts beyond the
    /// block-count field.
    pub fn new(
        format: TrafficFormat,
        min_duration_us: u32,
        max_duration_us: u32,
        period_count: u16,
        persistent: bool,
    ) -> Result<Self, TspecError> {
        if min_duration_us == 0 {
            return Err(TspecError::ZeroDuration);
        }
        if format == TrafficFormat::Isochronous && min_duration_us > max_duration_us {
            return Err(TspecError::MinExceedsMax {
                min: min_duration_us,
                max: max_duration_us,
            });
        }
        let widest = match format {
            TrafficFormat::Isochronous => max_duration_us,
            TrafficFormat::Asynchronous => min_duration_us,
        };
        if widest > MAX_SP_BLOCK_US {
            return Err(TspecError::BlockTooLarge {
                duration: widest,
                limit: MAX_SP_BLOCK_US,
            });
        }
        if period_count > MAX_BLOCKS_PER_ALLOCATION {
            return Err(TspecError::TooManyPeriods(period_count));
        }
        Ok(Self {
            format,
            min_duration_us,
            max_duration_us,
            period_count,
            persistent,
        })
    }

    /// True when the spec asks for periodic repetition within the cycle.
    pub fn is_periodic(&self) -> bool {
        self.period_count > 0
    }
}

/// A reservation request as received from a station, queued until the
/// next cycle boundary.
///
/// A request whose [`key`](Self::key) matches an existing allocation is
/// treated as a modification of that allocation; otherwise it requests a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationRequest {
    pub source: StationId,
    pub dest: StationId,
    pub allocation_id: AllocationId,
    pub tspec: TrafficSpec,
}

impl ReservationRequest {
    pub fn key(&self) -> AllocationKey {
        AllocationKey {
            id: self.allocation_id,
            source: self.source,
            dest: self.dest,
        }
    }
}

/// Identity of an allocation: `(id, source, dest)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationKey {
    pub id: AllocationId,
    pub source: StationId,
    pub dest: StationId,
}

/// One entry of the broadcast allocation table.
///
/// A single record may cover several equally spaced blocks:
/// block `n` starts at `start_us + n * block_period_us` and runs for
/// `block_duration_us`, followed by the guard time. `block_period_us`
/// is 0 when the record carries a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    pub id: AllocationId,
    pub kind: AllocationKind,
    /// Survives cycle boundaries without re-admission.
    pub persistent: bool,
    pub source: StationId,
    pub dest: StationId,
    /// Start of the first block, relative to the data-phase start.
    pub start_us: u32,
    pub block_duration_us: u32,
    pub block_period_us: u32,
    pub block_count: u16,
    /// Set once the record has been handed out for broadcast.
    pub announced: bool,
}

impl Allocation {
    pub fn key(&self) -> AllocationKey {
        AllocationKey {
            id: self.id,
            source: self.source,
            dest: self.dest,
        }
    }

    /// Start offset of block `n`.
    pub fn block_start(&self, n: u16) -> u32 {
        self.start_us + u32::from(n) * self.block_period_us
    }

    /// Guard-expanded busy ranges of every block, in start order.
    pub fn busy_blocks(&self, guard_us: u32) -> impl Iterator<Item = Interval> + '_ {
        let duration = self.block_duration_us + guard_us;
        (0..self.block_count).map(move |n| {
            let start = self.block_start(n);
            Interval::new(start, start + duration)
        })
    }

    /// True for broadcast contention fillers produced by the gap filler.
    pub fn is_broadcast_filler(&self) -> bool {
        self.kind == AllocationKind::ContentionPeriod
            && self.id == FILLER_ALLOCATION_ID
            && self.source == BROADCAST_AID
            && self.dest == BROADCAST_AID
    }
}

/// Outcome of evaluating one reservation request, surfaced to the
/// requesting station as the ADDTS status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionResult {
    /// Request granted; the key identifies the resulting allocation.
    Accepted(AllocationKey),
    /// Request refused; both the table and the free-slot set are
    /// untouched.
    Rejected(RejectReason),
}

impl AdmissionResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AdmissionResult::Accepted(_))
    }
}
