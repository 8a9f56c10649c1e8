//! Shared support for the demo worker binaries (`worker_burst`,
//! `worker_io`). Not part of the scheduler core — spec.md treats workers
//! as external collaborators and only specifies the contract in §6; this
//! module is one faithful implementation of that contract, factored out
//! so both demo binaries can share it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::{getpid, getppid};

/// One "unit of time", matching `BASE_QUANTUM_SEC` in the scheduler.
pub const UT: Duration = Duration::from_secs(2);

static START: OnceLock<Instant> = OnceLock::new();
static STOPPED: AtomicBool = AtomicBool::new(false);
static STOPPED_AT_NS: AtomicU64 = AtomicU64::new(0);
static STOP_TIME_ACCUM_NS: AtomicU64 = AtomicU64::new(0);

fn now_ns() -> u64 {
    START
        .get()
        .expect("install_stop_cont_handlers must run first")
        .elapsed()
        .as_nanos() as u64
}

extern "C" fn on_suspend(_: libc::c_int) {
    STOPPED_AT_NS.store(now_ns(), Ordering::SeqCst);
    STOPPED.store(true, Ordering::SeqCst);
    println!("[pid {}] received SUSPEND", std::process::id());
}

extern "C" fn on_resume(_: libc::c_int) {
    if STOPPED.swap(false, Ordering::SeqCst) {
        let stopped_at = STOPPED_AT_NS.load(Ordering::SeqCst);
        STOP_TIME_ACCUM_NS.fetch_add(now_ns().saturating_sub(stopped_at), Ordering::SeqCst);
    }
    println!("[pid {}] received RESUME", std::process::id());
}

/// Installs the two handlers every worker must have (§6 worker contract,
/// item 1) and records the process start time used to exclude parked
/// time from burst measurements.
pub fn install_stop_cont_handlers() {
    START.set(Instant::now()).ok();
    let handler = SigAction::new(SigHandler::Handler(on_suspend), SaFlags::empty(), SigSet::empty());
    unsafe { signal::sigaction(Signal::SIGUSR1, &handler) }.expect("install SIGUSR1 handler");
    let handler = SigAction::new(SigHandler::Handler(on_resume), SaFlags::empty(), SigSet::empty());
    unsafe { signal::sigaction(Signal::SIGUSR2, &handler) }.expect("install SIGUSR2 handler");
}

/// Self-delivers SUSPEND and parks until the first RESUME (§6 item 2):
/// a race-free rendezvous because `pause()` blocks until any signal is
/// caught, so a RESUME that arrives between the self-signal and the
/// `pause()` call is not lost.
pub fn self_park_until_first_resume() {
    let _ = signal::kill(getpid(), Signal::SIGUSR1);
    nix::unistd::pause();
}

/// Runs a CPU-bound burst of `units` UT, excluding any time spent
/// parked, logging once per UT elapsed (§6 item 3).
pub fn run_burst(units: u32) {
    run_burst_for(UT * units);
}

/// Same as `run_burst`, but for an arbitrary wall-clock duration rather
/// than a whole number of UT. Lets a worker exercise a burst shorter than
/// one UT (e.g. to exit partway through its first quantum) — `run_burst`
/// alone can't express that since it only takes whole-UT units.
pub fn run_burst_for(max: Duration) {
    let pid = std::process::id();
    let burst_start = now_ns();
    STOP_TIME_ACCUM_NS.store(0, Ordering::SeqCst);
    let max_ns = max.as_nanos() as u64;

    println!("[pid {pid}] started burst of {max:?}");
    let mut last_ut_logged = 0u64;
    loop {
        if STOPPED.load(Ordering::SeqCst) {
            // SUSPEND landed mid-burst: park for real instead of spinning
            // through it, so the dispatcher's quantum accounting (which
            // assumes a suspended worker consumes no wall-clock) holds.
            nix::unistd::pause();
            continue;
        }
        let elapsed_ns = now_ns()
            .saturating_sub(burst_start)
            .saturating_sub(STOP_TIME_ACCUM_NS.load(Ordering::SeqCst));
        let ut_so_far = elapsed_ns / UT.as_nanos() as u64;
        if ut_so_far > last_ut_logged {
            last_ut_logged = ut_so_far;
            println!("[pid {pid}] completed {ut_so_far} UT of burst");
        }
        if elapsed_ns >= max_ns {
            break;
        }
    }
    println!("[pid {pid}] finished burst");
}

/// Runs an I/O phase of `units` UT: announces IO_BEGIN/IO_END to the
/// parent via `SIGUSR1`/`SIGUSR2`, runs the duration without excluding
/// parked time, then parks for the next RESUME (§6 item 4).
pub fn run_io(units: u32) {
    let pid = std::process::id();
    let parent = getppid();
    let max_ns = (UT.as_nanos() as u64).saturating_mul(units as u64);

    let _ = signal::kill(parent, Signal::SIGUSR1); // IO_BEGIN
    println!("[pid {pid}] started I/O of {units} UT");

    let io_start = now_ns();
    let mut last_ut_logged = 0u64;
    loop {
        let elapsed_ns = now_ns().saturating_sub(io_start);
        let ut_so_far = elapsed_ns / UT.as_nanos() as u64;
        if ut_so_far > last_ut_logged {
            last_ut_logged = ut_so_far;
            println!("[pid {pid}] completed {ut_so_far} UT of I/O");
        }
        if elapsed_ns >= max_ns {
            break;
        }
    }
    println!("[pid {pid}] finished I/O");

    let _ = signal::kill(parent, Signal::SIGUSR2); // IO_END
    nix::unistd::pause();
}
