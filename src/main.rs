//! Binary entrypoint that launches the HireFlow backend.

use std::process::ExitCode;

use hireflow::start_hireflow;

/// Start the backend server against the configured collaborators.
fn main() -> ExitCode {
    start_hireflow::run()
}
