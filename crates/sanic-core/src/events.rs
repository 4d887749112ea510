use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Same-thread FIFO queue for simulation events.
///
/// The simulation pushes while it ticks; the owning scene drains once per
/// frame. Nothing here is shared across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: Deserialize<'de>"))]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Remove and return every queued event in posting order.
    pub fn drain(&mut self) -> Vec<E> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_fifo_order() {
        let mut q = EventQueue::new();
        q.push("death");
        q.push("checkpoint");
        q.push("exit");
        assert_eq!(q.len(), 3);
        assert_eq!(q.drain(), vec!["death", "checkpoint", "exit"]);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_is_empty() {
        let mut q: EventQueue<u8> = EventQueue::default();
        assert!(q.drain().is_empty());
    }

    #[test]
    fn events_pushed_after_drain_are_kept() {
        let mut q = EventQueue::new();
        q.push(1);
        let _ = q.drain();
        q.push(2);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2]);
    }
}
