use std::collections::VecDeque;
use std::sync::Mutex;

use crate::handle::{Handle, Priority};

const LEVELS: usize = 3;

/// Three independent FIFO queues of handles, one per priority level.
/// Pure data structure — it knows nothing about process state beyond the
/// handles it is holding.
pub struct QueueSet {
    levels: [Mutex<VecDeque<Handle>>; LEVELS],
}

impl QueueSet {
    pub fn new() -> Self {
        Self {
            levels: [
                Mutex::new(VecDeque::new()),
                Mutex::new(VecDeque::new()),
                Mutex::new(VecDeque::new()),
            ],
        }
    }

    /// Append `handle` to the back of the queue for `priority`.
    pub fn push(&self, priority: Priority, handle: Handle) {
        self.levels[priority.level_index()]
            .lock()
            .unwrap()
            .push_back(handle);
    }

    /// Pop the head of the highest-priority nonempty queue (level 1, then
    /// 2, then 3). `None` if all three are empty.
    pub fn pop_highest(&self) -> Option<Handle> {
        for level in &self.levels {
            let mut level = level.lock().unwrap();
            if let Some(handle) = level.pop_front() {
                return Some(handle);
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|l| l.lock().unwrap().is_empty())
    }

    /// A snapshot of each level's contents, front-to-back, for logging.
    pub fn snapshot(&self) -> [Vec<Handle>; LEVELS] {
        [
            self.levels[0].lock().unwrap().iter().copied().collect(),
            self.levels[1].lock().unwrap().iter().copied().collect(),
            self.levels[2].lock().unwrap().iter().copied().collect(),
        ]
    }
}

impl Default for QueueSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_highest_prefers_lower_level_number() {
        let q = QueueSet::new();
        q.push(Priority::P4, Handle(0));
        q.push(Priority::P1, Handle(1));
        q.push(Priority::P2, Handle(2));
        assert_eq!(q.pop_highest(), Some(Handle(1)));
        assert_eq!(q.pop_highest(), Some(Handle(2)));
        assert_eq!(q.pop_highest(), Some(Handle(0)));
        assert_eq!(q.pop_highest(), None);
    }

    #[test]
    fn fifo_order_within_a_level() {
        let q = QueueSet::new();
        q.push(Priority::P1, Handle(0));
        q.push(Priority::P1, Handle(1));
        q.push(Priority::P1, Handle(2));
        assert_eq!(q.pop_highest(), Some(Handle(0)));
        assert_eq!(q.pop_highest(), Some(Handle(1)));
        assert_eq!(q.pop_highest(), Some(Handle(2)));
    }

    #[test]
    fn push_then_pop_round_trips_when_higher_levels_empty() {
        let q = QueueSet::new();
        q.push(Priority::P2, Handle(7));
        assert_eq!(q.pop_highest(), Some(Handle(7)));
    }

    #[test]
    fn is_empty_reflects_all_levels() {
        let q = QueueSet::new();
        assert!(q.is_empty());
        q.push(Priority::P4, Handle(3));
        assert!(!q.is_empty());
    }
}
