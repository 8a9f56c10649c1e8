use crate::config::Config;
use crate::queue::QueueSet;
use crate::table::ProcessTable;

/// The scheduler's shared state: the three ready queues and the process
/// table, plus the configuration both were built from. Owned by `main`
/// and handed to the admission and dispatcher threads as an `Arc`.
pub struct SchedulerState {
    pub queues: QueueSet,
    pub table: ProcessTable,
    pub config: Config,
}

impl SchedulerState {
    pub fn new(config: Config) -> Self {
        Self {
            queues: QueueSet::new(),
            table: ProcessTable::new(config.max_procs),
            config,
        }
    }
}
