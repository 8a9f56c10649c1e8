use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use nix::unistd::Pid;
use signal_hook::consts::{SIGCHLD, SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook::iterator::exfiltrator::WithOrigin;
use signal_hook::iterator::SignalsInfo;

use crate::error::{Result, SchedulerError};

/// One scheduler-visible signal event, already resolved to the sender's
/// pid where the protocol carries one.
///
/// `SIGUSR1` from a worker means IO_BEGIN, `SIGUSR2` means IO_END,
/// `SIGCHLD` means CHILD_EXIT — the dual meaning spec.md §6 calls out
/// (the same two user signals, worker-to-scheduler direction, with the
/// roles reversed from the scheduler-to-worker direction).
#[derive(Debug, Clone, Copy)]
pub enum SchedulerEvent {
    IoBegin { sender: Pid },
    IoEnd { sender: Pid },
    ChildExit { sender: Pid },
}

/// Installs the three signal watchers on a dedicated background thread
/// and returns the receiving end of the channel the dispatcher polls.
///
/// This stands in for spec.md's `extern "C"` handlers: real signal
/// handlers can't safely touch a mutex-guarded process table or queue,
/// so `signal-hook`'s `SignalsInfo` iterator does the equivalent job from
/// ordinary thread context — it blocks in `sigtimedwait`-style delivery
/// and hands back each signal's originating pid, which the dispatcher
/// then treats exactly like spec.md's `si_pid`.
pub fn install() -> Result<Receiver<SchedulerEvent>> {
    let mut signals = SignalsInfo::<WithOrigin>::new([SIGUSR1, SIGUSR2, SIGCHLD])
        .map_err(SchedulerError::SignalInstall)?;
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for info in &mut signals {
            let sender = info
                .process
                .map(|p| Pid::from_raw(p.pid))
                .unwrap_or_else(|| Pid::from_raw(0));
            let event = match info.signal {
                SIGUSR1 => SchedulerEvent::IoBegin { sender },
                SIGUSR2 => SchedulerEvent::IoEnd { sender },
                SIGCHLD => SchedulerEvent::ChildExit { sender },
                _ => continue,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// Registers a shared flag that flips to `true` on `SIGINT`/`SIGTERM`.
/// Unlike the worker-protocol signals above this doesn't need a sender
/// pid or FIFO ordering with queue mutation, so the simple
/// `signal_hook::flag` helper (a single atomic store, fully
/// async-signal-safe) is enough — no background thread required.
pub fn install_shutdown_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&flag)).map_err(SchedulerError::SignalInstall)?;
    signal_hook::flag::register(SIGTERM, Arc::clone(&flag)).map_err(SchedulerError::SignalInstall)?;
    Ok(flag)
}
