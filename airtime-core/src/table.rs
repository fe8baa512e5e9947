//! The broadcast allocation table.
//!
//! Ordered collection of [`Allocation`] records — the single source of
//! truth announced to every station each cycle. Only the scheduling
//! engine mutates it; everything else reads snapshots.

use crate::interval::Interval;
use crate::types::{Allocation, AllocationKey, AllocationKind};

/// Ordered collection of allocation records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationTable {
    entries: Vec<Allocation>,
}

impl AllocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Allocation] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.entries.iter()
    }

    pub fn push(&mut self, allocation: Allocation) {
        self.entries.push(allocation);
    }

    pub fn find(&self, key: AllocationKey) -> Option<&Allocation> {
        self.entries.iter().find(|a| a.key() == key)
    }

    pub fn find_mut(&mut self, key: AllocationKey) -> Option<&mut Allocation> {
        self.entries.iter_mut().find(|a| a.key() == key)
    }

    /// Remove the record with the given key, returning it.
    pub fn remove(&mut self, key: AllocationKey) -> Option<Allocation> {
        let pos = self.entries.iter().position(|a| a.key() == key)?;
        Some(self.entries.remove(pos))
    }

    pub fn retain(&mut self, keep: impl FnMut(&Allocation) -> bool) {
        self.entries.retain(keep);
    }

    /// Sort records by the start offset of their first block, the order
    /// the beacon announces them in.
    pub fn sort_by_start(&mut self) {
        self.entries.sort_by_key(|a| a.start_us);
    }

    /// Flag every record as having been broadcast. Non-persistent
    /// records flagged here are removed at the next cycle boundary.
    pub fn mark_all_announced(&mut self) {
        for entry in &mut self.entries {
            entry.announced = true;
        }
    }

    /// Busy ranges of every block of every record, unsorted. Reserved
    /// periods are guard-expanded; contention periods span exactly their
    /// interval (contention access needs no on-air separation).
    pub fn busy_blocks(&self, guard_us: u32) -> Vec<Interval> {
        self.entries
            .iter()
            .flat_map(|a| {
                let guard = match a.kind {
                    AllocationKind::ReservedPeriod => guard_us,
                    AllocationKind::ContentionPeriod => 0,
                };
                a.busy_blocks(guard)
            })
            .collect()
    }

    /// Total guard-expanded busy width across all blocks, microseconds.
    pub fn total_busy(&self, guard_us: u32) -> u32 {
        self.busy_blocks(guard_us).iter().map(Interval::width).sum()
    }

    /// True when every pair of guard-expanded blocks is disjoint — the
    /// table invariant. Used by tests and debug audits.
    pub fn is_disjoint(&self, guard_us: u32) -> bool {
        let mut blocks = self.busy_blocks(guard_us);
        blocks.sort_by_key(|b| b.start);
        blocks.windows(2).all(|w| w[0].end <= w[1].start)
    }
}
