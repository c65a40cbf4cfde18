//! The `glint` command-line interface.
//!
//! Highlights the fields of JSON documents, inspects how text is analyzed
//! for a locale, and runs a demonstration over a set of sample articles.

#![deny(clippy::mem_forget)]

#[macro_use]
extern crate glint_core;

#[macro_use]
extern crate tracing;

mod cli;
mod cnf;
mod err;
mod telemetry;

use std::future::Future;
use std::process::ExitCode;

fn main() -> ExitCode {
	with_runtime(cli::init())
}

/// Runs the command on a multi-threaded Tokio runtime.
fn with_runtime(fut: impl Future<Output = ExitCode> + Send) -> ExitCode {
	let mut b = tokio::runtime::Builder::new_multi_thread();
	b.enable_all()
		.max_blocking_threads(*cnf::RUNTIME_MAX_BLOCKING_THREADS)
		.worker_threads(*cnf::RUNTIME_WORKER_THREADS)
		.thread_name("glint-worker");
	match b.build() {
		Ok(rt) => rt.block_on(fut),
		Err(e) => {
			eprintln!("Failed to build runtime: {e}");
			ExitCode::FAILURE
		}
	}
}
