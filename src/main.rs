mod config;
mod gradebook;
mod ipc;
mod report;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GRADEBOOKD_LOG";

fn init_logging() {
    // stdout carries responses; logs go to stderr.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cfg = match config::GradebookConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("gradebookd: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        capacity = cfg.capacity,
        max_name_length = cfg.max_name_length,
        "gradebook ready"
    );
    let mut state = ipc::AppState::new(cfg);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                // No id to echo back.
                tracing::warn!("bad request line: {e}");
                ipc::err("", "bad_json", e.to_string(), None)
            }
        };
        let _ = writeln!(stdout, "{}", resp);
        let _ = stdout.flush();
    }

    ExitCode::SUCCESS
}
