//! HireFlow server binary for deployment targets.
//! Run with: cargo run --bin hireflow-server

use std::process::ExitCode;

use hireflow::start_hireflow;

fn main() -> ExitCode {
    start_hireflow::run()
}
