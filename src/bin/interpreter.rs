//! Demo interpreter: reads a script of `exec <path>` lines and forwards
//! each valid path to the scheduler's admission FIFO. Models
//! `original_source/lab6-scheduler/interpreter.c` against the contract in
//! spec.md §6. Not part of the specified scheduler core.
//!
//! Usage: `interpreter <script-path> [pipe-path]` (pipe-path defaults to
//! `./input.pipe`).

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

const PREFIX: &str = "exec ";

fn main() {
    let mut args = std::env::args().skip(1);
    let script_path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: interpreter <script-path> [pipe-path]");
            std::process::exit(2);
        }
    };
    let pipe_path = PathBuf::from(args.next().unwrap_or_else(|| "./input.pipe".to_string()));

    if let Err(e) = mlfq_scheduler::admission::create_input_pipe(&pipe_path) {
        eprintln!("failed to create {}: {e}", pipe_path.display());
        std::process::exit(1);
    }

    let file = match File::open(&script_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("failed to open script '{script_path}': {e}");
            std::process::exit(1);
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("SKIPPED line -> read error: {e}");
                continue;
            }
        };

        if !line.starts_with(PREFIX) {
            println!("SKIPPED line '{line}' -> lines must start with '{PREFIX}'.");
            continue;
        }
        let program_name = &line[PREFIX.len()..];
        if program_name.is_empty() {
            println!("SKIPPED line '{line}' -> program name is empty.");
            continue;
        }
        if fs::metadata(program_name).is_err() {
            println!("SKIPPED line '{line}' -> file '{program_name}' does not exist.");
            continue;
        }

        match write_to_pipe(&pipe_path, program_name) {
            Ok(()) => println!("wrote '{program_name}' to the pipe"),
            Err(e) => eprintln!("failed to write '{program_name}' to pipe: {e}"),
        }
    }
}

fn write_to_pipe(pipe_path: &PathBuf, program_name: &str) -> std::io::Result<()> {
    let mut file = File::options().write(true).open(pipe_path)?;
    file.write_all(program_name.as_bytes())?;
    file.write_all(&[0u8])?;
    Ok(())
}
