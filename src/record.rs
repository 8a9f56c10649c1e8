use nix::unistd::Pid;

use crate::handle::{Handle, Priority};

/// Lifecycle state of an admitted worker, as seen by the scheduler.
/// Kept explicit on the record rather than re-derived from queue
/// membership on every observation; the invariants in the data model
/// still hold (a `Ready` record is in exactly one queue, a `Running` one
/// in none, and so on) — this field exists purely to make that state
/// cheap to read from the dispatcher and from logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    BlockedOnIo,
    Terminated,
}

/// Everything the process table knows about one admitted worker.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub handle: Handle,
    pub os_pid: Pid,
    pub priority: Priority,
    pub program_path: String,
    pub state: ProcessState,
}

impl ProcessRecord {
    pub fn new(handle: Handle, os_pid: Pid, program_path: String) -> Self {
        Self {
            handle,
            os_pid,
            priority: Priority::P1,
            program_path,
            state: ProcessState::Ready,
        }
    }
}
