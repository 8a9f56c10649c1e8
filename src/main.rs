use mlfq_scheduler::Config;

fn main() {
    mlfq_scheduler::logging::init();

    let config = Config::from_env();
    println!("[scheduler] pid={}", std::process::id());
    log::info!(
        "scheduler: config input_pipe={} base_quantum={:?} max_procs={} buf_size={}",
        config.input_pipe_path.display(),
        config.base_quantum,
        config.max_procs,
        config.buf_size
    );

    if let Err(e) = mlfq_scheduler::run(config) {
        log::error!("scheduler: fatal: {e}");
        std::process::exit(1);
    }
}
