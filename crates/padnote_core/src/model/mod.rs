//! Domain model for the notes core.
//!
//! # Responsibility
//! - Define the canonical note record shared by repository, service and FFI.
//!
//! # Invariants
//! - Every persisted note carries exactly one row id, unique in the table.
//! - An unsaved note is marked by the `UNSAVED_NOTE_ID` sentinel, not by a
//!   separate type.

pub mod note;
