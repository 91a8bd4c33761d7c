// --- quickslot: low-conflict meeting window finder ---

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use quickslot::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT, run};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("=== quickslot: 100-minute meeting window finder ===");

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    if !input.exists() {
        eprintln!(
            "No spreadsheet found at '{}'; pass a .xlsx/.xls/.csv path as the first argument.",
            input.display()
        );
        return ExitCode::FAILURE;
    }

    match run(&Config { input, output }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[error] {err}");
            ExitCode::FAILURE
        }
    }
}
