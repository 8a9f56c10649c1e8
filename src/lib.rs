//! Core of a teaching-grade multi-level feedback queue scheduler.
//!
//! Supervises externally supplied worker programs: admits new workers
//! from a named FIFO, time-slices them across three priority queues, and
//! reacts to cooperative stop/run/I/O events exchanged over `SIGUSR1`,
//! `SIGUSR2`, and `SIGCHLD`. See `SPEC_FULL.md` for the full design.

pub mod admission;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod logging;
pub mod queue;
pub mod record;
pub mod signals;
pub mod spawn;
pub mod state;
pub mod table;
pub mod worker_demo;

pub use config::Config;
pub use error::{Result, SchedulerError};
pub use handle::{Handle, Priority};
pub use state::SchedulerState;

use std::sync::Arc;
use std::thread;

/// Wires the admission worker and dispatcher together and runs until a
/// shutdown signal arrives. This is the whole of component C + D from
/// spec.md §2, assembled.
pub fn run(config: Config) -> Result<()> {
    // FIFO creation is a spawn-subsystem failure per spec.md §6's CLI
    // contract: it must abort the scheduler with a nonzero exit, not just
    // silently disable admission, so it happens here rather than inside
    // the admission thread.
    admission::create_input_pipe(&config.input_pipe_path)?;

    let state = Arc::new(SchedulerState::new(config.clone()));

    let admission_state = Arc::clone(&state);
    thread::spawn(move || admission::admission_loop(admission_state, config));

    dispatcher::run(state)
}
