//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into owner-scoped use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod clock;
pub mod simulation_store;
