//! Free-slot bookkeeping for the data phase.
//!
//! [`FreeSlotSet`] is the complement of the allocation table within the
//! data-phase window: a sorted set of disjoint `[start, end)` intervals,
//! microseconds relative to the data-phase start. Between cycle
//! boundaries the set and the table together account for every
//! microsecond of the data phase.
//!
//! Invariants maintained by every operation:
//! - intervals are sorted by start;
//! - intervals are pairwise disjoint and non-adjacent (adjacent ranges
//!   are merged on release);
//! - `start < end` for every interval.

/// Half-open time range `[start, end)`, microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start < end, "empty interval [{start}, {end})");
        Self { start, end }
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    pub fn overlaps(&self, other: Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Sorted set of disjoint free intervals inside the data phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeSlotSet {
    slots: Vec<Interval>,
}

impl FreeSlotSet {
    /// Empty set — no schedulable time.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The whole data phase `[0, span_us)` as one free slot.
    pub fn spanning(span_us: u32) -> Self {
        let slots = if span_us == 0 {
            Vec::new()
        } else {
            vec![Interval::new(0, span_us)]
        };
        Self { slots }
    }

    /// Rebuild the set as the complement of the given busy ranges within
    /// `[0, span_us)`. Busy ranges need not arrive sorted; ranges beyond
    /// the span are clipped.
    pub fn rederive(span_us: u32, busy: impl IntoIterator<Item = Interval>) -> Self {
        let mut busy: Vec<Interval> = busy.into_iter().collect();
        busy.sort_by_key(|b| b.start);

        let mut slots = Vec::new();
        let mut cursor = 0u32;
        for range in busy {
            if cursor < range.start && cursor < span_us {
                slots.push(Interval::new(cursor, range.start.min(span_us)));
            }
            cursor = cursor.max(range.end);
        }
        if cursor < span_us {
            slots.push(Interval::new(cursor, span_us));
        }
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Interval] {
        &self.slots
    }

    /// Total free width, microseconds.
    pub fn total_free(&self) -> u32 {
        self.slots.iter().map(Interval::width).sum()
    }

    /// First slot, in start order, at least `width` wide.
    pub fn first_fit(&self, width: u32) -> Option<Interval> {
        self.slots.iter().copied().find(|s| s.width() >= width)
    }

    /// The free slot covering instant `at_us`, if any.
    pub fn slot_containing(&self, at_us: u32) -> Option<Interval> {
        self.slots
            .iter()
            .copied()
            .find(|s| s.start <= at_us && at_us < s.end)
    }

    /// Remove a busy range from the set, splitting the slot it falls in
    /// into zero, one or two remaining pieces. Ranges overlapping
    /// multiple slots are subtracted from each.
    pub fn carve(&mut self, range: Interval) {
        let mut next = Vec::with_capacity(self.slots.len() + 1);
        for slot in &self.slots {
            if !slot.overlaps(range) {
                next.push(*slot);
                continue;
            }
            if slot.start < range.start {
                next.push(Interval::new(slot.start, range.start));
            }
            if range.end < slot.end {
                next.push(Interval::new(range.end, slot.end));
            }
        }
        self.slots = next;
    }

    /// Return a freed range to the set, coalescing with adjacent or
    /// overlapping free intervals.
    pub fn release(&mut self, range: Interval) {
        let mut merged = range;
        let mut next = Vec::with_capacity(self.slots.len() + 1);
        let mut placed = false;
        for slot in &self.slots {
            if slot.end < merged.start {
                next.push(*slot);
            } else if merged.end < slot.start {
                if !placed {
                    next.push(merged);
                    placed = true;
                }
                next.push(*slot);
            } else {
                // Touching or overlapping: absorb into the released range.
                merged = Interval::new(merged.start.min(slot.start), merged.end.max(slot.end));
            }
        }
        if !placed {
            next.push(merged);
        }
        self.slots = next;
    }
}
