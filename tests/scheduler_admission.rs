//! Admission-side scenarios from spec.md §8 that don't require a real
//! child process: ordering of concurrently-admitted work, and duplicate
//! rejection. Both operate directly on `QueueSet`/`ProcessTable`, the
//! same objects the admission worker drives, standing in for "fork a
//! real child" with a fixed fake pid since these scenarios are about
//! bookkeeping, not process lifetime.

use mlfq_scheduler::handle::{Handle, Priority};
use mlfq_scheduler::table::ProcessTable;
use mlfq_scheduler::queue::QueueSet;

use nix::unistd::Pid;

fn fake_admit(table: &ProcessTable, queues: &QueueSet, pid: i32, path: &str) -> Option<Handle> {
    if table.contains_path(path) || table.is_full() {
        return None;
    }
    let handle = table.register(Pid::from_raw(pid), path.to_string());
    queues.push(Priority::P1, handle);
    Some(handle)
}

#[test]
fn two_workers_admitted_in_order_land_in_q1_in_order() {
    let table = ProcessTable::new(8);
    let queues = QueueSet::new();

    let h0 = fake_admit(&table, &queues, 100, "./prog1").unwrap();
    let h1 = fake_admit(&table, &queues, 101, "./prog2").unwrap();

    assert_eq!(h0, Handle(0));
    assert_eq!(h1, Handle(1));
    assert_eq!(queues.pop_highest(), Some(h0));
    assert_eq!(queues.pop_highest(), Some(h1));
}

#[test]
fn duplicate_program_path_is_admitted_once() {
    let table = ProcessTable::new(8);
    let queues = QueueSet::new();

    let h0 = fake_admit(&table, &queues, 200, "./prog1");
    let h1 = fake_admit(&table, &queues, 201, "./prog1");

    assert!(h0.is_some());
    assert!(h1.is_none(), "second admission of the same path must be silently dropped");
    assert_eq!(queues.pop_highest(), h0);
    assert_eq!(queues.pop_highest(), None);
}

#[test]
fn admission_beyond_capacity_is_rejected() {
    let table = ProcessTable::new(1);
    let queues = QueueSet::new();

    let h0 = fake_admit(&table, &queues, 300, "./prog1");
    let h1 = fake_admit(&table, &queues, 301, "./prog2");

    assert!(h0.is_some());
    assert!(h1.is_none());
}
