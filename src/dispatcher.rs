use std::sync::atomic::Ordering;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::config::TICK;
use crate::error::Result;
use crate::handle::{Handle, Priority};
use crate::record::ProcessState;
use crate::signals::{self, SchedulerEvent};
use crate::state::SchedulerState;

/// Why a run-slice ended — the three possibilities spec.md's dispatcher
/// pseudocode distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    QuantumExpired,
    IoBegin,
    ChildExit,
}

/// What the dispatcher should do once a run-slice has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Process exited; drop it, send no further signals, do not re-enqueue.
    Retire,
    /// Process is blocked on I/O at the given (possibly promoted) priority.
    /// Not enqueued — the I/O-end event will do that.
    ParkOnIo { priority: Priority },
    /// Process exhausted its quantum; suspend it and re-enqueue at the
    /// given (demoted) priority.
    Requeue { priority: Priority },
}

/// The pure heart of the dispatcher: given how long a run-slice actually
/// ran, how long it was allowed to run, the process's priority going in,
/// and why the slice ended, decide the new priority and placement.
///
/// This is spec.md §4.D's run-slice body minus the I/O side effects
/// (sending signals, touching the table/queues) — kept side-effect-free
/// so the half-quantum promotion rule and the demotion/retirement logic
/// can be checked directly, per §8's testable properties.
pub fn classify_outcome(
    elapsed: Duration,
    quantum: Duration,
    current_priority: Priority,
    half_base_quantum: Duration,
    outcome: RunOutcome,
) -> Verdict {
    match outcome {
        RunOutcome::ChildExit => Verdict::Retire,
        RunOutcome::IoBegin => {
            let unused = quantum.saturating_sub(elapsed);
            let priority = if unused > half_base_quantum {
                current_priority.promoted()
            } else {
                current_priority
            };
            Verdict::ParkOnIo { priority }
        }
        RunOutcome::QuantumExpired => Verdict::Requeue {
            priority: current_priority.demoted(),
        },
    }
}

/// Runs the dispatcher loop until a shutdown signal (`SIGINT`/`SIGTERM`)
/// is observed. Never returns `Err` for routine scheduling conditions —
/// only for failures that make further scheduling impossible (signal
/// installation).
pub fn run(state: Arc<SchedulerState>) -> Result<()> {
    let events = signals::install()?;
    let shutdown = signals::install_shutdown_flag()?;
    let half_base_quantum = state.config.base_quantum / 2;

    log::info!("dispatcher: started, pid={}", std::process::id());

    while !shutdown.load(Ordering::Relaxed) {
        drain_pending(&state, &events);

        let snapshot = state.queues.snapshot();
        log::debug!(
            "dispatcher: queues Q1={:?} Q2={:?} Q3={:?}",
            snapshot[0],
            snapshot[1],
            snapshot[2]
        );

        let handle = match state.queues.pop_highest() {
            Some(h) => h,
            None => {
                std::thread::sleep(crate::config::IDLE_POLL_INTERVAL);
                continue;
            }
        };

        run_slice(&state, &events, handle, half_base_quantum);
    }

    log::info!("dispatcher: shutdown signal received, exiting");
    Ok(())
}

fn run_slice(
    state: &SchedulerState,
    events: &Receiver<SchedulerEvent>,
    handle: Handle,
    half_base_quantum: Duration,
) {
    let Some((os_pid, priority)) = state
        .table
        .with_record(handle, |r| (r.os_pid, r.priority))
    else {
        return;
    };

    state.table.set_state(handle, ProcessState::Running);
    let quantum = state.config.quantum_for(priority);

    log::info!("dispatcher: resuming {handle} pid={os_pid} priority={priority} quantum={quantum:?}");
    let _ = signal::kill(os_pid, Signal::SIGUSR2); // RESUME

    let t0 = Instant::now();
    let outcome = loop {
        let elapsed = t0.elapsed();
        if elapsed >= quantum {
            break RunOutcome::QuantumExpired;
        }
        match events.recv_timeout(TICK) {
            Ok(SchedulerEvent::IoBegin { .. }) => break RunOutcome::IoBegin,
            Ok(SchedulerEvent::ChildExit { sender }) => {
                if sender == os_pid {
                    break RunOutcome::ChildExit;
                }
                retire_other(state, sender);
            }
            Ok(SchedulerEvent::IoEnd { sender }) => requeue_blocked(state, sender),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break RunOutcome::QuantumExpired,
        }
    };
    let elapsed = t0.elapsed();

    match classify_outcome(elapsed, quantum, priority, half_base_quantum, outcome) {
        Verdict::Retire => {
            log::info!("dispatcher: {handle} pid={os_pid} exited, retiring");
            state.table.mark_terminated(handle);
            let _ = nix::sys::wait::waitpid(os_pid, None);
        }
        Verdict::ParkOnIo { priority } => {
            log::info!("dispatcher: {handle} pid={os_pid} blocked on I/O, priority -> {priority}");
            state.table.set_priority(handle, priority);
            state.table.set_state(handle, ProcessState::BlockedOnIo);
        }
        Verdict::Requeue { priority } => {
            log::info!("dispatcher: {handle} pid={os_pid} quantum expired, priority -> {priority}");
            let _ = signal::kill(os_pid, Signal::SIGUSR1); // SUSPEND
            state.table.set_priority(handle, priority);
            state.table.set_state(handle, ProcessState::Ready);
            state.queues.push(priority, handle);
        }
    }
}

/// Drains any events that arrived while the dispatcher wasn't inside a
/// run-slice (e.g. while idle, or between slices). `IoEnd` must become
/// visible before the next `pop_highest`, per spec.md §5's ordering
/// guarantee, so this runs at the top of every outer-loop iteration.
fn drain_pending(state: &SchedulerState, events: &Receiver<SchedulerEvent>) {
    loop {
        match events.try_recv() {
            Ok(SchedulerEvent::IoEnd { sender }) => requeue_blocked(state, sender),
            Ok(SchedulerEvent::ChildExit { sender }) => retire_other(state, sender),
            Ok(SchedulerEvent::IoBegin { sender }) => {
                log::warn!("dispatcher: unexpected IO_BEGIN from pid={sender} with no process running");
            }
            Err(_) => break,
        }
    }
}

fn requeue_blocked(state: &SchedulerState, sender: Pid) {
    let Some(handle) = state.table.lookup_by_pid(sender) else {
        return;
    };
    let Some(priority) = state.table.with_record(handle, |r| r.priority) else {
        return;
    };
    log::info!("dispatcher: {handle} pid={sender} I/O finished, re-enqueuing at priority={priority}");
    state.table.set_state(handle, ProcessState::Ready);
    state.queues.push(priority, handle);
}

fn retire_other(state: &SchedulerState, sender: Pid) {
    let Some(handle) = state.table.lookup_by_pid(sender) else {
        return;
    };
    log::info!("dispatcher: {handle} pid={sender} exited while not running, retiring");
    state.table.mark_terminated(handle);
    let _ = nix::sys::wait::waitpid(sender, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_secs(2);
    const HALF_BASE: Duration = Duration::from_secs(1);

    #[test]
    fn child_exit_always_retires_regardless_of_elapsed() {
        let verdict = classify_outcome(
            Duration::from_millis(10),
            BASE,
            Priority::P1,
            HALF_BASE,
            RunOutcome::ChildExit,
        );
        assert_eq!(verdict, Verdict::Retire);
    }

    #[test]
    fn full_quantum_demotes_one_level() {
        let verdict = classify_outcome(BASE, BASE, Priority::P1, HALF_BASE, RunOutcome::QuantumExpired);
        assert_eq!(verdict, Verdict::Requeue { priority: Priority::P2 });

        let verdict = classify_outcome(BASE * 2, BASE * 2, Priority::P2, HALF_BASE, RunOutcome::QuantumExpired);
        assert_eq!(verdict, Verdict::Requeue { priority: Priority::P4 });
    }

    #[test]
    fn priority_four_stays_at_four_on_quantum_expiry() {
        let verdict = classify_outcome(
            BASE * 4,
            BASE * 4,
            Priority::P4,
            HALF_BASE,
            RunOutcome::QuantumExpired,
        );
        assert_eq!(verdict, Verdict::Requeue { priority: Priority::P4 });
    }

    #[test]
    fn early_io_with_more_than_half_quantum_unused_promotes() {
        // quantum 2s, blocked after 0.5s -> 1.5s unused, > half_base (1s) -> promote
        let verdict = classify_outcome(
            Duration::from_millis(500),
            BASE,
            Priority::P2,
            HALF_BASE,
            RunOutcome::IoBegin,
        );
        assert_eq!(verdict, Verdict::ParkOnIo { priority: Priority::P1 });
    }

    #[test]
    fn late_io_with_less_than_half_quantum_unused_does_not_promote() {
        // quantum 2s, blocked after 1.5s -> 0.5s unused, <= half_base (1s) -> no promotion
        let verdict = classify_outcome(
            Duration::from_millis(1500),
            BASE,
            Priority::P2,
            HALF_BASE,
            RunOutcome::IoBegin,
        );
        assert_eq!(verdict, Verdict::ParkOnIo { priority: Priority::P2 });
    }

    #[test]
    fn io_at_exactly_the_half_quantum_boundary_does_not_promote() {
        // unused == half_base exactly -> spec's strict "<" means not promoted
        let verdict = classify_outcome(
            Duration::from_secs(1),
            BASE,
            Priority::P4,
            HALF_BASE,
            RunOutcome::IoBegin,
        );
        assert_eq!(verdict, Verdict::ParkOnIo { priority: Priority::P4 });
    }

    #[test]
    fn priority_one_io_promotion_saturates_at_one() {
        let verdict = classify_outcome(
            Duration::from_millis(100),
            BASE,
            Priority::P1,
            HALF_BASE,
            RunOutcome::IoBegin,
        );
        assert_eq!(verdict, Verdict::ParkOnIo { priority: Priority::P1 });
    }
}
