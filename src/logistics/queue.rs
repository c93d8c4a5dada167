//! Order queue - pending orders, oldest first

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::error::{Result, WarehouseError};
use crate::core::types::Tick;
use crate::logistics::order::Order;

/// Heap entry. `seq` breaks ties between orders created on the same tick
/// so that the earlier insertion always wins.
#[derive(Debug)]
struct QueuedOrder {
    created_at: Tick,
    seq: u64,
    order: Order,
}

impl PartialEq for QueuedOrder {
    fn eq(&self, other: &Self) -> bool {
        self.created_at == other.created_at && self.seq == other.seq
    }
}

impl Eq for QueuedOrder {}

impl Ord for QueuedOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending orders ordered by creation time, ties by insertion
#[derive(Debug, Default)]
pub struct OrderQueue {
    heap: BinaryHeap<QueuedOrder>,
    next_seq: u64,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_order(&mut self, order: Order) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedOrder {
            created_at: order.created_at(),
            seq,
            order,
        });
    }

    /// Remove the oldest order and mark it complete
    pub fn complete_order(&mut self) -> Result<Order> {
        let mut entry = self.heap.pop().ok_or(WarehouseError::EmptyOrderQueue)?;
        entry.order.mark_complete();
        Ok(entry.order)
    }

    /// The order `complete_order` would return next
    pub fn peek(&self) -> Option<&Order> {
        self.heap.peek().map(|entry| &entry.order)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pending orders in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.heap.iter().map(|entry| &entry.order)
    }
}
