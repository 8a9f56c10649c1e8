use std::path::PathBuf;
use std::time::Duration;

/// Quantum granted at priority 1; quantum at priority `p` is
/// `BASE_QUANTUM * p.multiplier()`.
pub const BASE_QUANTUM: Duration = Duration::from_secs(2);

/// Fixed capacity of the process table.
pub const MAX_PROCS: usize = 64;

/// Max admission-channel message size, including the NUL terminator.
pub const BUF_SIZE: usize = 255;

/// Dispatcher tick granularity while busy-waiting within a run-slice.
pub const TICK: Duration = Duration::from_millis(5);

/// How long the admission thread sleeps before retrying a failed FIFO
/// open/read.
pub const ADMISSION_RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// How long the dispatcher sleeps when all three queues are empty.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime configuration. Built from compile-time defaults, overridable
/// through environment variables so the demo binaries and integration
/// tests can point several scheduler instances at different FIFOs without
/// colliding.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_pipe_path: PathBuf,
    pub base_quantum: Duration,
    pub max_procs: usize,
    pub buf_size: usize,
}

impl Config {
    /// Compile-time defaults, as specified: `./input.pipe`, 2s base
    /// quantum, 64 processes, 255-byte buffer.
    pub fn defaults() -> Self {
        Self {
            input_pipe_path: PathBuf::from("./input.pipe"),
            base_quantum: BASE_QUANTUM,
            max_procs: MAX_PROCS,
            buf_size: BUF_SIZE,
        }
    }

    /// Defaults, overridden by `MLFQ_INPUT_PIPE` / `MLFQ_MAX_PROCS` when
    /// present. Neither variable is required by the spec; they exist so
    /// the scheduler can be run more than once on the same host (e.g. in
    /// the integration tests) without hand-editing constants.
    pub fn from_env() -> Self {
        let mut cfg = Self::defaults();
        if let Ok(path) = std::env::var("MLFQ_INPUT_PIPE") {
            cfg.input_pipe_path = PathBuf::from(path);
        }
        if let Ok(n) = std::env::var("MLFQ_MAX_PROCS") {
            if let Ok(n) = n.parse() {
                cfg.max_procs = n;
            }
        }
        cfg
    }

    pub fn quantum_for(&self, priority: crate::handle::Priority) -> Duration {
        self.base_quantum * priority.multiplier()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Priority;

    #[test]
    fn quantum_scales_with_priority() {
        let cfg = Config::defaults();
        assert_eq!(cfg.quantum_for(Priority::P1), Duration::from_secs(2));
        assert_eq!(cfg.quantum_for(Priority::P2), Duration::from_secs(4));
        assert_eq!(cfg.quantum_for(Priority::P4), Duration::from_secs(8));
    }
}
