//! Demo CPU-bound worker: one burst, no I/O. Models
//! `original_source/lab6-scheduler/prog1.c`. Not part of the specified
//! scheduler core — an external collaborator used to exercise it.
//!
//! Usage: `worker_burst [burst_units]` (default 10, matching scenario 1).

use mlfq_scheduler::worker_demo::{install_stop_cont_handlers, run_burst, self_park_until_first_resume};

fn main() {
    let units: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    install_stop_cont_handlers();
    self_park_until_first_resume();
    run_burst(units);
}
