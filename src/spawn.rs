use std::ffi::CString;
use std::path::Path;

use nix::sys::signal::{self, SigHandler, Signal};
use nix::unistd::{execv, fork, ForkResult, Pid};

use crate::error::{Result, SchedulerError};

/// Fork a child that execs `program_path` with no extra arguments.
///
/// The child is expected to self-suspend immediately (the worker
/// contract, §6) — this function does not wait for that; it only
/// performs the fork/exec and returns the child's pid to the caller. On
/// `exec` failure the child logs and exits immediately; the parent never
/// observes that failure directly, only via the subsequent `CHILD_EXIT`.
pub fn spawn_worker(program_path: &Path) -> Result<Pid> {
    let path_c = CString::new(program_path.as_os_str().to_string_lossy().as_bytes())
        .expect("program path must not contain interior NUL bytes");

    match unsafe { fork() }.map_err(SchedulerError::Fork)? {
        ForkResult::Parent { child, .. } => Ok(child),
        ForkResult::Child => {
            // Reset disposition for the signals the parent cares about;
            // the worker installs its own handlers immediately in main().
            let _ = unsafe { signal::signal(Signal::SIGUSR1, SigHandler::SigDfl) };
            let _ = unsafe { signal::signal(Signal::SIGUSR2, SigHandler::SigDfl) };

            let args = [path_c.clone()];
            match execv(&path_c, &args) {
                Ok(_) => unreachable!("execv only returns on failure"),
                Err(e) => {
                    eprintln!("exec of {} failed: {e}", program_path.display());
                    std::process::exit(127);
                }
            }
        }
    }
}
