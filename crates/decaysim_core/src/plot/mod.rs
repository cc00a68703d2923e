//! Decay curve visualization.
//!
//! # Responsibility
//! - Sample one decay curve per request ([`curve`]).
//! - Render it as an embeddable interactive chart ([`interactive`]) or as a
//!   PNG file ([`static_image`]).
//!
//! # Invariants
//! - Both outputs are drawn from the same [`DecayCurve`], so sampling, axis
//!   ranges and clamping never diverge between them.
//! - A static render either returns the absolute path of a flushed,
//!   readable file or fails.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod config;
pub mod curve;
pub mod interactive;
mod static_image;

pub use config::PlotConfig;
pub use curve::DecayCurve;
pub use interactive::HOVER_TEMPLATE;

/// DejaVu Sans, shared by the PNG renderer and the PDF report.
pub(crate) const FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

pub type PlotResult<T> = Result<T, PlotError>;

/// Render failure taxonomy.
#[derive(Debug)]
pub enum PlotError {
    /// Curve inputs cannot be plotted.
    InvalidCurve(String),
    /// Filesystem failure while preparing or checking the image.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Drawing backend failure.
    RenderFailure(String),
}

impl Display for PlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCurve(message) => write!(f, "invalid decay curve: {message}"),
            Self::Io { path, source } => {
                write!(f, "plot file error at `{}`: {source}", path.display())
            }
            Self::RenderFailure(message) => write!(f, "plot rendering failed: {message}"),
        }
    }
}

impl Error for PlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidCurve(_) | Self::RenderFailure(_) => None,
        }
    }
}

/// Produces chart artifacts for a decay curve.
#[derive(Clone, Debug, Default)]
pub struct PlotRenderer {
    config: PlotConfig,
}

impl PlotRenderer {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Returns an embeddable chart fragment for `N(t) = n0 · e^(−λt)` over
    /// `[0, t_max]`.
    pub fn render_interactive(&self, n0: f64, lambda: f64, t_max: f64) -> PlotResult<String> {
        let curve = DecayCurve::sample(n0, lambda, t_max)?;
        Ok(interactive::inline_html(&curve, &self.config))
    }

    /// Writes the curve as a PNG to `target_path` and returns its absolute
    /// path.
    ///
    /// # Errors
    /// - `InvalidCurve` for unplottable inputs.
    /// - `Io` / `RenderFailure` when the file cannot be produced.
    pub fn render_static(
        &self,
        n0: f64,
        lambda: f64,
        t_max: f64,
        target_path: impl AsRef<Path>,
    ) -> PlotResult<PathBuf> {
        let curve = DecayCurve::sample(n0, lambda, t_max)?;
        let resolved = static_image::write_png(&curve, &self.config, target_path.as_ref())?;
        log::debug!(
            "event=plot_static module=plot status=ok points={} path={}",
            curve.len(),
            resolved.display()
        );
        Ok(resolved)
    }
}
