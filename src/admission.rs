use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nix::sys::stat::Mode;
use nix::unistd::mkfifo;

use crate::config::Config;
use crate::error::{Result, SchedulerError};
use crate::handle::Priority;
use crate::state::SchedulerState;

/// Create the named pipe the admission worker reads from, mode 0666 as
/// specified. Idempotent: an already-existing FIFO at the same path is
/// left alone.
pub fn create_input_pipe(path: &Path) -> Result<()> {
    match mkfifo(path, Mode::from_bits_truncate(0o666)) {
        Ok(()) => Ok(()),
        Err(nix::Error::EEXIST) => Ok(()),
        Err(e) => Err(SchedulerError::FifoCreate {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read one NUL-terminated UTF-8 path from a single open of the FIFO.
/// One-open-per-message, mirroring the producer's write discipline.
fn read_one_message(path: &Path, buf_size: usize) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut buf = vec![0u8; buf_size];
    let n = file.read(&mut buf)?;
    let nul_at = buf[..n].iter().position(|&b| b == 0).unwrap_or(n);
    Ok(String::from_utf8_lossy(&buf[..nul_at]).into_owned())
}

/// Runs forever on a dedicated thread, admitting one worker per valid,
/// non-duplicate message. See spec.md §4.C for the full algorithm.
///
/// The admission FIFO must already exist (see `create_input_pipe`) before
/// this is called — its creation is a spawn-subsystem failure that should
/// abort the whole scheduler, not just this thread, so `run` performs it
/// up front on the caller's thread instead of inside the loop.
pub fn admission_loop(state: Arc<SchedulerState>, config: Config) {
    log::info!(
        "admission: listening on {}",
        config.input_pipe_path.display()
    );

    loop {
        let program_path = match read_one_message(&config.input_pipe_path, config.buf_size) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("admission: fifo read failed ({e}), retrying");
                std::thread::sleep(crate::config::ADMISSION_RETRY_BACKOFF);
                continue;
            }
        };

        if let Err(e) = admit(&state, &config, &program_path) {
            log::warn!("admission: rejected '{program_path}': {e}");
        }
    }
}

fn admit(state: &SchedulerState, config: &Config, program_path: &str) -> Result<()> {
    if program_path.len() + 1 >= config.buf_size {
        return Err(SchedulerError::PathTooLong {
            path: program_path.to_string(),
            limit: config.buf_size,
        });
    }
    if state.table.contains_path(program_path) {
        log::debug!("admission: duplicate path '{program_path}', skipping");
        return Ok(());
    }
    if state.table.is_full() {
        return Err(SchedulerError::TableFull {
            capacity: state.table.capacity(),
        });
    }

    let path = PathBuf::from(program_path);
    let os_pid = crate::spawn::spawn_worker(&path)?;
    let handle = state.table.register(os_pid, program_path.to_string());
    state.queues.push(Priority::P1, handle);

    log::info!("admission: admitted {handle} pid={os_pid} path='{program_path}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_at_or_over_buffer_limit() {
        let state = SchedulerState::new(Config::defaults());
        let config = Config {
            buf_size: 8,
            ..Config::defaults()
        };
        let long_path = "a".repeat(8);
        let err = admit(&state, &config, &long_path).unwrap_err();
        assert!(matches!(err, SchedulerError::PathTooLong { .. }));
    }

    #[test]
    fn rejects_admission_when_table_full() {
        let mut config = Config::defaults();
        config.max_procs = 0;
        let state = SchedulerState::new(config.clone());
        let err = admit(&state, &config, "./prog1").unwrap_err();
        assert!(matches!(err, SchedulerError::TableFull { .. }));
    }
}
