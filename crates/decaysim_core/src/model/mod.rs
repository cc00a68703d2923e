//! Domain model for elements and decay simulations.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep derivation of simulation fields next to the record shape.
//!
//! # Invariants
//! - Elements and simulations are identified by SQLite row ids.
//! - Simulation records carry frozen element snapshots.

pub mod element;
pub mod simulation;
