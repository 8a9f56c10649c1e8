use std::sync::RwLock;

use nix::unistd::Pid;

use crate::handle::Handle;
use crate::record::{ProcessRecord, ProcessState};

/// Fixed-capacity registry mapping a `Handle` to its `ProcessRecord`.
/// Insertion is append-only; handles are never reused and the table never
/// shrinks. Lookup by OS pid is a linear scan, which is fine at the
/// default capacity (64) and only ever runs on signal delivery or
/// admission, not in a hot loop.
pub struct ProcessTable {
    capacity: usize,
    records: RwLock<Vec<ProcessRecord>>,
}

impl ProcessTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.records.read().unwrap().len() >= self.capacity
    }

    /// Append a new record for `os_pid`/`program_path` at priority 1.
    /// Caller must have already checked `is_full()` and `contains_path()`.
    pub fn register(&self, os_pid: Pid, program_path: String) -> Handle {
        let mut records = self.records.write().unwrap();
        let handle = Handle(records.len() as u32);
        records.push(ProcessRecord::new(handle, os_pid, program_path));
        handle
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.records
            .read()
            .unwrap()
            .iter()
            .any(|r| r.state != ProcessState::Terminated && r.program_path == path)
    }

    pub fn lookup_by_pid(&self, os_pid: Pid) -> Option<Handle> {
        self.records
            .read()
            .unwrap()
            .iter()
            .find(|r| r.os_pid == os_pid && r.state != ProcessState::Terminated)
            .map(|r| r.handle)
    }

    pub fn with_record<R>(&self, handle: Handle, f: impl FnOnce(&ProcessRecord) -> R) -> Option<R> {
        self.records.read().unwrap().get(handle.0 as usize).map(f)
    }

    pub fn set_priority(&self, handle: Handle, priority: crate::handle::Priority) {
        if let Some(r) = self.records.write().unwrap().get_mut(handle.0 as usize) {
            r.priority = priority;
        }
    }

    pub fn set_state(&self, handle: Handle, state: ProcessState) {
        if let Some(r) = self.records.write().unwrap().get_mut(handle.0 as usize) {
            r.state = state;
        }
    }

    pub fn mark_terminated(&self, handle: Handle) {
        self.set_state(handle, ProcessState::Terminated);
    }
}
