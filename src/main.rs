//! # Voxel World Demo Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use std::path::PathBuf;

fn main() {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    if let Err(error) = voxel_world::run(config_path.as_deref()) {
        eprintln!("voxel-world: {error}");
        std::process::exit(1);
    }
}
