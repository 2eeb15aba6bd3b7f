//! # Voxel Frustum Entry Point
//!
//! This is the main entry point for the headless driver.
//! It simply calls into the library's `run()` function to initialize and start the engine.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release
//! ```

fn main() {
    voxel_frustum::run();
}
