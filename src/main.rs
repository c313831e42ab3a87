//! # Voxel World Demo Entry Point
//!
//! Calls into the library's `run()` function, which drops a unit onto a
//! generated world and lets it wander.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxel_world::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
