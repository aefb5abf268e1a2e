//! Advisory relay server binary.
//! Run with: cargo run --bin cadastre-server

use std::process::ExitCode;

use cadastre_advisor::start_advisor;

fn main() -> ExitCode {
    start_advisor::run()
}
