//! Error types for airtime-core.
//!
//! Two failure classes, kept deliberately separate:
//!
//! - [`TspecError`] — configuration mistakes in a traffic spec. Fatal in
//!   the sense of the protocol: the request is refused before any
//!   scheduling attempt and never reaches a policy.
//! - [`RejectReason`] — admission failures. Recoverable: the request was
//!   well formed but could not be granted; the requester may retry with
//!   different parameters. Carried inside `AdmissionResult::Rejected`,
//!   never as a Rust error.
//!
//! Engine-level failures (unknown allocation on delete, out-of-order
//! phase events) live in `airtime-sched`, next to the code that raises
//! them.

/// Validation failure of a traffic specification.
///
/// Raised at request construction, before the request is queued. A spec
/// that fails here would be a programming or configuration mistake on
/// the requesting station, not a schedulable condition.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TspecError {
    /// Minimum duration must be strictly positive.
    #[error("minimum allocation duration must be non-zero")]
    ZeroDuration,

    /// Isochronous specs carry both bounds; min must not exceed max.
    #[error("minimum allocation {min} exceeds maximum allocation {max}")]
    MinExceedsMax { min: u32, max: u32 },

    /// Duration does not fit the protocol's block-duration field.
    #[error("allocation duration {duration} exceeds the representable block size {limit}")]
    BlockTooLarge { duration: u32, limit: u32 },

    /// The block-count field cannot represent the requested periodicity.
    #[error("period count {0} exceeds the representable number of blocks")]
    TooManyPeriods(u16),
}

/// Why an otherwise valid request was not admitted.
///
/// Surfaced to the requesting station as the failure status of the
/// ADDTS response. No partial mutation accompanies any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The active policy admits no reservations at all.
    PolicyAdmitsNone,
    /// The active policy does not handle periodic reservations.
    PeriodicUnsupported,
    /// No free slot wide enough for the requested duration plus guard.
    InsufficientFreeTime,
    /// Fewer than two periodic blocks could be placed without breaking
    /// periodicity.
    BrokenPeriodicity,
    /// Granting the request would leave less than the configured minimum
    /// broadcast contention time.
    ContentionFloor,
    /// Modify asked for a longer duration; only shrink is supported.
    GrowthUnsupported,
}
