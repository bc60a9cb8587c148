//! Min-heap of scheduled ignition events
//!
//! Binary heap keyed by scheduled time with the point id as tiebreak. The
//! relaxation loop depends on the queue always yielding the globally
//! minimum time next; equal times popping in id order keeps whole runs
//! reproducible.

use crate::core_types::point::PointId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// One scheduled ignition: the point and its committed ignition time
#[derive(Debug, Clone, Copy)]
pub struct QueueEntry {
    pub time_secs: f64,
    pub id: PointId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time_secs.total_cmp(&other.time_secs) == Ordering::Equal && self.id == other.id
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_secs
            .total_cmp(&other.time_secs)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Event queue yielding entries in non-decreasing scheduled time
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
}

impl EventQueue {
    pub fn push(&mut self, id: PointId, time_secs: f64) {
        self.heap.push(Reverse(QueueEntry { time_secs, id }));
    }

    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
