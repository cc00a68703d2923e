//! Simulation report export and detail view assembly.
//!
//! # Responsibility
//! - Compose a persisted record and its static plot into a PDF report.
//! - Build the owner-scoped detail view (formatted values + interactive chart).
//!
//! # Invariants
//! - Displayed λ and N(t) are recomputed from the record, never persisted.
//! - The static plot is written to a deterministic per-record location and
//!   read back before the document is composed.
//! - Foreign records surface as `NotFound`, as in the store.

use crate::decay::{self, plot_window, DecayError};
use crate::model::simulation::{OwnerId, SimulationId, SimulationRecord};
use crate::plot::{PlotError, PlotRenderer};
use crate::service::clock::Clock;
use crate::service::simulation_store::{SimulationStore, StoreError};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub mod format;
mod pdf;

use format::{format_fixed, format_scientific, format_timestamp};

pub const REPORT_CONTENT_TYPE: &str = "application/pdf";
const REPORT_TITLE: &str = "Radioactive Decay Simulation";

pub type ReportResult<T> = Result<T, ReportError>;

/// Failure taxonomy of report and detail assembly.
#[derive(Debug)]
pub enum ReportError {
    /// Simulation id does not exist or belongs to another owner.
    NotFound(SimulationId),
    Store(StoreError),
    /// Interactive chart could not be produced for the detail view.
    Render(PlotError),
    /// Static plot could not be produced or read back, or the document
    /// could not be composed.
    ExportFailure(String),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "simulation not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::ExportFailure(message) => write!(f, "report export failed: {message}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::NotFound(_) | Self::ExportFailure(_) => None,
        }
    }
}

impl From<StoreError> for ReportError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<DecayError> for ReportError {
    fn from(value: DecayError) -> Self {
        Self::ExportFailure(format!("record cannot be recomputed: {value}"))
    }
}

/// Presentation strings derived from one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayValues {
    /// λ in `%.5e` notation.
    pub lambda: String,
    /// N(t) with five decimals.
    pub nt: String,
    /// `YYYY-MM-DD HH:MM:SS` (UTC).
    pub timestamp: String,
}

impl DisplayValues {
    /// Recomputes λ and N(t) from the record's inputs and snapshot.
    pub fn of(record: &SimulationRecord) -> Result<Self, DecayError> {
        let decay = decay::compute(record.n0, record.t, record.half_life_snapshot)?;
        Ok(Self {
            lambda: format_scientific(decay.lambda),
            nt: format_fixed(decay.nt),
            timestamp: format_timestamp(record.timestamp),
        })
    }
}

/// Read model for the simulation detail view.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationDetail {
    pub record: SimulationRecord,
    pub display: DisplayValues,
    /// Embeddable interactive chart fragment.
    pub plot_markup: String,
}

/// Binary report ready to be returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// Suggested download name, `simulation_{id}.pdf`.
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Composes PDF reports from records and their static plots.
#[derive(Clone, Debug)]
pub struct ReportExporter {
    renderer: PlotRenderer,
    plot_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(renderer: PlotRenderer, plot_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            plot_dir: plot_dir.into(),
        }
    }

    pub fn renderer(&self) -> &PlotRenderer {
        &self.renderer
    }

    /// Deterministic static plot location for `record`.
    pub fn plot_path_for(&self, record: &SimulationRecord) -> PathBuf {
        self.plot_dir.join(format!("simulation_{}.png", record.id))
    }

    /// Renders the static plot to `static_plot_path`, reads it back and
    /// composes the report.
    ///
    /// # Errors
    /// - `ExportFailure` when the plot cannot be produced or read back, or
    ///   the document cannot be composed.
    pub fn export(
        &self,
        record: &SimulationRecord,
        static_plot_path: impl AsRef<Path>,
    ) -> ReportResult<ExportedReport> {
        let display = DisplayValues::of(record)?;
        let lambda = record.lambda()?;

        let plot_path = self
            .renderer
            .render_static(
                record.n0,
                lambda,
                plot_window(record.t),
                static_plot_path.as_ref(),
            )
            .map_err(|err| export_failure(record.id, format!("static plot: {err}")))?;
        let png = fs::read(&plot_path).map_err(|err| {
            export_failure(
                record.id,
                format!("static plot `{}` unreadable: {err}", plot_path.display()),
            )
        })?;

        let page = pdf::ReportPage {
            title: REPORT_TITLE,
            rows: report_rows(record, &display),
            png: &png,
        };
        let bytes = pdf::compose(&page).map_err(|message| export_failure(record.id, message))?;

        info!(
            "event=report_export module=report status=ok simulation_id={} bytes={}",
            record.id,
            bytes.len()
        );
        Ok(ExportedReport {
            filename: format!("simulation_{}.pdf", record.id),
            content_type: REPORT_CONTENT_TYPE,
            bytes,
        })
    }

    /// Owner-scoped export; the plot goes to [`Self::plot_path_for`].
    pub fn export_for_owner<C: Clock>(
        &self,
        store: &SimulationStore<C>,
        id: SimulationId,
        owner_id: OwnerId,
    ) -> ReportResult<ExportedReport> {
        let record = store.get(id, owner_id)?;
        let plot_path = self.plot_path_for(&record);
        self.export(&record, plot_path)
    }

    /// Owner-scoped detail view with the interactive chart.
    pub fn detail<C: Clock>(
        &self,
        store: &SimulationStore<C>,
        id: SimulationId,
        owner_id: OwnerId,
    ) -> ReportResult<SimulationDetail> {
        let record = store.get(id, owner_id)?;
        let display = DisplayValues::of(&record)?;
        let plot_markup = self
            .renderer
            .render_interactive(record.n0, record.lambda()?, plot_window(record.t))
            .map_err(ReportError::Render)?;

        Ok(SimulationDetail {
            record,
            display,
            plot_markup,
        })
    }
}

fn report_rows(
    record: &SimulationRecord,
    display: &DisplayValues,
) -> Vec<(&'static str, String)> {
    let unit = record.unit_snapshot.as_str();
    let quantity_unit = record.quantity_unit_snapshot.as_str();
    vec![
        ("Simulation", format!("#{}", record.id)),
        ("Element", record.element_name_snapshot.clone()),
        ("Half-life", format!("{} {unit}", record.half_life_snapshot)),
        ("Initial quantity N0", format!("{} {quantity_unit}", record.n0)),
        ("Elapsed time t", format!("{} {unit}", record.t)),
        ("Decay constant lambda", format!("{} 1/{unit}", display.lambda)),
        ("Remaining quantity N(t)", format!("{} {quantity_unit}", display.nt)),
        ("Computed at", format!("{} UTC", display.timestamp)),
    ]
}

fn export_failure(id: SimulationId, message: String) -> ReportError {
    error!(
        "event=report_export module=report status=error simulation_id={} error={}",
        id, message
    );
    ReportError::ExportFailure(message)
}
