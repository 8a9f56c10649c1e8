//! Demo I/O-bound worker: burst/IO/burst/IO/burst. Models
//! `original_source/lab6-scheduler/prog4.c`. Not part of the specified
//! scheduler core — an external collaborator used to exercise it.
//!
//! Usage: `worker_io [b1 io1 b2 io2 b3]`, all in UT, defaulting to
//! `5 3 3 3 4` (scenario 2's `5,3,3,3,4` trace).

use mlfq_scheduler::worker_demo::{install_stop_cont_handlers, run_burst, run_io, self_park_until_first_resume};

fn main() {
    let args: Vec<u32> = std::env::args()
        .skip(1)
        .filter_map(|s| s.parse().ok())
        .collect();
    let phases: [u32; 5] = if args.len() == 5 {
        [args[0], args[1], args[2], args[3], args[4]]
    } else {
        [5, 3, 3, 3, 4]
    };

    install_stop_cont_handlers();
    self_park_until_first_resume();

    run_burst(phases[0]);
    run_io(phases[1]);
    run_burst(phases[2]);
    run_io(phases[3]);
    run_burst(phases[4]);
}
