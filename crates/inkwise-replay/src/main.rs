//! Replay entry point.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: inkwise-replay <stroke.json>");
        return ExitCode::from(2);
    };

    let recording = match inkwise_replay::load_recording(&path) {
        Ok(recording) => recording,
        Err(e) => {
            log::error!("Failed to load recording: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = inkwise_replay::replay(&recording);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
