//! Live, process-spawning versions of spec.md §8 scenario 5 (worker exit
//! mid-quantum) and a smoke check standing in for scenario 6 (the
//! dispatcher stays responsive with nothing admitted). These spawn the
//! real `mlfq-scheduler` binary plus a demo worker over a temporary FIFO,
//! so they are timing- and signal-sensitive and depend on the
//! workspace's own binaries being built — `#[ignore]`d by default, run
//! with `cargo test -- --ignored`.

use std::fs::File;
use std::io::Write;
use std::process::{Child, Command};
use std::time::Duration;

fn spawn_scheduler(pipe_path: &std::path::Path) -> Child {
    Command::new(env!("CARGO_BIN_EXE_mlfq-scheduler"))
        .env("MLFQ_INPUT_PIPE", pipe_path)
        .spawn()
        .expect("scheduler binary should spawn")
}

fn write_exec_message(pipe_path: &std::path::Path, program: &str) {
    // The FIFO only exists once the scheduler's admission thread has
    // created it; poll briefly rather than assuming it's already there.
    for _ in 0..50 {
        if pipe_path.exists() {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    let mut f = File::options()
        .write(true)
        .open(pipe_path)
        .expect("fifo should be openable for writing once the scheduler is up");
    f.write_all(program.as_bytes()).unwrap();
    f.write_all(&[0u8]).unwrap();
}

#[test]
#[ignore]
fn scheduler_stays_responsive_with_no_admissions() {
    let dir = tempfile::tempdir().unwrap();
    let pipe_path = dir.path().join("input.pipe");
    let mut scheduler = spawn_scheduler(&pipe_path);

    std::thread::sleep(Duration::from_millis(500));
    assert!(
        scheduler.try_wait().unwrap().is_none(),
        "scheduler should still be running with nothing admitted"
    );

    scheduler.kill().ok();
    scheduler.wait().ok();
}

#[test]
#[ignore]
fn worker_exit_mid_quantum_is_retired_and_not_resumed_again() {
    let dir = tempfile::tempdir().unwrap();
    let pipe_path = dir.path().join("input.pipe");
    let mut scheduler = spawn_scheduler(&pipe_path);

    // A half-UT burst finishes well inside its first (two-UT) quantum.
    let worker = env!("CARGO_BIN_EXE_worker_once");
    write_exec_message(&pipe_path, worker);

    // Give the scheduler time to admit, resume, and observe the exit.
    std::thread::sleep(Duration::from_secs(4));

    assert!(
        scheduler.try_wait().unwrap().is_none(),
        "scheduler itself must still be alive after retiring the worker"
    );

    scheduler.kill().ok();
    scheduler.wait().ok();
}
