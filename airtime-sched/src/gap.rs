//! Gap filling — converting leftover free time into broadcast CBAPs.
//!
//! Runs after the boundary request batch has been evaluated. Every
//! remaining free interval becomes one or more broadcast contention
//! allocations spanning exactly that interval; intervals wider than the
//! protocol's CBAP duration field are split into consecutive maximal
//! blocks. Afterwards the free-slot set is empty and every microsecond
//! of the data phase belongs to exactly one allocation.

use airtime_core::constants::{BROADCAST_AID, FILLER_ALLOCATION_ID, MAX_CBAP_BLOCK_US};
use airtime_core::{Allocation, AllocationKind, AllocationTable, FreeSlotSet};
use tracing::debug;

pub(crate) fn fill(table: &mut AllocationTable, slots: &mut FreeSlotSet) {
    let mut filled = 0u32;
    for slot in slots.slots() {
        let mut start = slot.start;
        while start < slot.end {
            let width = (slot.end - start).min(MAX_CBAP_BLOCK_US);
            table.push(Allocation {
                id: FILLER_ALLOCATION_ID,
                kind: AllocationKind::ContentionPeriod,
                persistent: true,
                source: BROADCAST_AID,
                dest: BROADCAST_AID,
                start_us: start,
                block_duration_us: width,
                block_period_us: 0,
                block_count: 1,
                announced: false,
            });
            start += width;
            filled += width;
        }
    }
    *slots = FreeSlotSet::empty();
    debug!(filled, "free slots converted to broadcast CBAP");
}
