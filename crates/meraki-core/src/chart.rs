// ── Chart rendering seam ──
//
// The hierarchy only knows how to hand an ordered point series and a
// target file name to a renderer; what gets drawn and where it lands is
// the renderer's business. Tests substitute a recording fake.

use std::path::PathBuf;

use plotters::prelude::{BitMapBackend, ChartBuilder, IntoDrawingArea, LineSeries, BLUE, WHITE};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to render chart '{file_name}': {message}")]
pub struct ChartError {
    pub file_name: String,
    pub message: String,
}

/// Capability to plot an ordered (x, y) series into a named artifact.
pub trait ChartRenderer: Send + Sync {
    /// Plot `points` in order and persist the result under `file_name`.
    /// The caller chooses the name; the renderer chooses the location.
    fn render_line(&self, points: &[(f64, f64)], file_name: &str) -> Result<(), ChartError>;
}

/// PNG line-chart renderer backed by plotters.
pub struct PngChartRenderer {
    out_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    /// Renderer writing `{out_dir}/{file_name}` at the default 800x480.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            width: 800,
            height: 480,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render_line(&self, points: &[(f64, f64)], file_name: &str) -> Result<(), ChartError> {
        let fail = |message: String| ChartError {
            file_name: file_name.to_owned(),
            message,
        };

        std::fs::create_dir_all(&self.out_dir).map_err(|e| fail(e.to_string()))?;
        let path = self.out_dir.join(file_name);

        let (x_max, y_min, y_max) = points.iter().fold(
            (1.0_f64, f64::INFINITY, f64::NEG_INFINITY),
            |(xm, ylo, yhi), &(x, y)| (xm.max(x), ylo.min(y), yhi.max(y)),
        );
        // Pad a flat series so the range stays non-degenerate.
        let (y_min, y_max) = if points.is_empty() || y_min == y_max {
            (y_min.min(0.0) - 1.0, y_max.max(0.0) + 1.0)
        } else {
            (y_min, y_max)
        };

        let root = BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .build_cartesian_2d(0.0..x_max + 1.0, y_min..y_max)
            .map_err(|e| fail(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(|e| fail(e.to_string()))?;

        root.present().map_err(|e| fail(e.to_string()))?;
        Ok(())
    }
}
