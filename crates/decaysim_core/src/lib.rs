//! Core domain logic for the radioactive decay simulator.
//!
//! Computes first-order decay, keeps an owner-scoped history of simulations
//! in SQLite, renders decay curves and exports PDF reports. Authentication,
//! routing and page templating live outside this crate; callers pass a
//! resolved owner id into every operation.

pub mod config;
pub mod db;
pub mod decay;
pub mod logging;
pub mod model;
pub mod plot;
pub mod repo;
pub mod report;
pub mod seed;
pub mod service;

pub use config::CoreConfig;
pub use db::{Database, DbError};
pub use decay::{compute, plot_window, Decay, DecayError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::element::{ElementId, ElementReference, ElementUnits, NewElement};
pub use model::simulation::{OwnerId, SimulationId, SimulationInput, SimulationRecord};
pub use plot::{DecayCurve, PlotConfig, PlotError, PlotRenderer};
pub use repo::{RepoError, RepoResult};
pub use report::{
    DisplayValues, ExportedReport, ReportError, ReportExporter, SimulationDetail,
};
pub use service::clock::{Clock, SystemClock};
pub use service::simulation_store::{SimulationStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
