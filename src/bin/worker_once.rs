//! Demo worker that exits partway through its first quantum: a half-UT
//! burst against a priority-1 (two-UT = `BASE_QUANTUM`) quantum. Used to
//! exercise spec.md §8 scenario 5 (worker exit mid-quantum). Takes no
//! arguments, matching the admission channel's "one executable path, no
//! extra arguments" contract (§6).

use std::time::Duration;

use mlfq_scheduler::worker_demo::{install_stop_cont_handlers, run_burst_for, self_park_until_first_resume};

fn main() {
    install_stop_cont_handlers();
    self_park_until_first_resume();
    run_burst_for(Duration::from_millis(500));
}
