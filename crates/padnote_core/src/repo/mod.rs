//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract over the notes table.
//! - Isolate SQL query details from service orchestration.
//!
//! # Invariants
//! - Every operation executes exactly one SQL statement.
//! - Update/delete of a missing id report zero affected rows, never an
//!   error.

pub mod note_repo;
