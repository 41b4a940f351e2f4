//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `padnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("padnote_core ping={}", padnote_core::ping());
    println!("padnote_core version={}", padnote_core::core_version());
}
