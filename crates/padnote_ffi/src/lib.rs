//! Flutter-facing FFI crate for the padnote core.

pub mod api;
