//! Protocol constants for DMG channel-access scheduling.
//!
//! Numeric limits come straight from the 802.11ad information-element
//! field widths: block durations are carried in 15/16-bit fields and the
//! block count in an 8-bit field, so nothing the engine produces may
//! exceed them.

/// Fixed guard time appended after every allocation block, in
/// microseconds. Never itself schedulable; it separates adjacent
/// reservations on air.
pub const GUARD_TIME_US: u32 = 10;

/// Maximum block duration of a reserved period (SP), microseconds.
/// The SP duration field is 15 bits.
pub const MAX_SP_BLOCK_US: u32 = 32_767;

/// Maximum block duration of a contention period (CBAP), microseconds.
/// The CBAP duration field is 16 bits.
pub const MAX_CBAP_BLOCK_US: u32 = 65_535;

/// Maximum number of blocks a single allocation may carry (8-bit field).
pub const MAX_BLOCKS_PER_ALLOCATION: u16 = 255;

/// Association id addressing every station at once. Broadcast contention
/// periods use this as both source and destination.
pub const BROADCAST_AID: u8 = 255;

/// Allocation id reserved for broadcast contention fillers produced by
/// the gap filler. Station reservations must use a non-zero id.
pub const FILLER_ALLOCATION_ID: u8 = 0;

/// Default minimum amount of the data phase, in microseconds, that must
/// stay available as broadcast contention access.
pub const DEFAULT_MIN_BROADCAST_CBAP_US: u32 = 4_096;

/// Default spacing between two consecutive cursor placements of the
/// basic policy, microseconds. When non-zero, the gap is left free and
/// later becomes broadcast CBAP; 0 places accepts back to back.
pub const DEFAULT_INTER_ALLOCATION_GAP_US: u32 = 0;
