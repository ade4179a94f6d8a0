//! Chart files: the two posterior curves with the highlighted sample.
//!
//! Both files carry the axes, legend and annotations. Text is rasterized with
//! the bundled DejaVu Sans face, registered with plotters once per process.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bayesplot_core::{PosteriorCurves, PredictiveValues};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use crate::config::{LabelConfig, OutputConfig};
use crate::report::{negative_annotation, positive_annotation};

const FONT_FAMILY: &str = "sans-serif";
const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

pub(crate) const X_MAX: f64 = 1.0;
/// Headroom above 1.0 so the top of the PPV curve isn't clipped. Shared with
/// the terminal chart.
pub(crate) const Y_MAX: f64 = 1.05;
const NPV_GRAY: RGBColor = RGBColor(120, 120, 120);
const MARKER_GRAY: RGBColor = RGBColor(60, 60, 60);

/// Pixel geometry of a chart file. Everything scales with `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChartLayout {
    pub size: (u32, u32),
    pub scale: u32,
}

impl ChartLayout {
    pub(crate) const SVG: Self = Self {
        size: (800, 600),
        scale: 1,
    };
    pub(crate) const PNG: Self = Self {
        size: (1600, 1200),
        scale: 2,
    };

    fn margin(&self) -> u32 {
        20 * self.scale
    }

    fn x_label_area(&self) -> u32 {
        60 * self.scale
    }

    fn y_label_area(&self) -> u32 {
        70 * self.scale
    }

    fn tick_size(&self) -> u32 {
        6 * self.scale
    }

    fn font(&self, base: u32) -> (&'static str, u32) {
        (FONT_FAMILY, base * self.scale)
    }

    /// Pixel rows and columns under the plotting area that hold the x tick
    /// labels and axis title, clear of the axis line and tick marks.
    #[cfg(test)]
    pub(crate) fn x_label_band(&self) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
        let (width, height) = self.size;
        let bottom = height - self.margin();
        let top = bottom - self.x_label_area() + self.tick_size() + 4 * self.scale;
        (top..bottom, self.margin() + self.y_label_area()..width - self.margin())
    }
}

/// Map an axes-fraction position to data coordinates.
fn axes_fraction(fx: f64, fy: f64) -> (f64, f64) {
    (fx * X_MAX, fy * Y_MAX)
}

/// Anchors of the positive and negative annotations. Offsets from the
/// highlighted points are fractions of the axes, so they keep their place
/// whatever the y headroom.
pub(crate) fn annotation_anchors(h: &PredictiveValues) -> [(f64, f64); 2] {
    [
        axes_fraction(h.prior + 0.07, h.ppv + 0.05),
        axes_fraction(h.prior + 0.05, h.npv - 0.10),
    ]
}

/// Make the bundled face available to plotters. Safe to call repeatedly.
pub(crate) fn register_fonts() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).map_err(|_| "invalid font data".to_string())
        })
        .clone()
        .map_err(|message| ChartError::Font { message })
}

/// Everything drawn on one chart.
pub struct PosteriorFigure<'a> {
    pub curves: &'a PosteriorCurves,
    pub highlight: PredictiveValues,
    pub labels: &'a LabelConfig,
}

/// Paths of the files written by [`write_charts`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFiles {
    pub svg: PathBuf,
    pub png: PathBuf,
}

#[derive(Debug)]
pub enum ChartError {
    CreateDir { path: PathBuf, source: std::io::Error },
    Font { message: String },
    Render { path: PathBuf, message: String },
}

impl ChartError {
    fn render<E: std::error::Error + Send + Sync>(
        path: &Path,
        err: DrawingAreaErrorKind<E>,
    ) -> Self {
        ChartError::Render {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::CreateDir { path, source } => {
                write!(f, "failed to create {}: {source}", path.display())
            }
            ChartError::Font { message } => write!(f, "failed to load chart font: {message}"),
            ChartError::Render { path, message } => {
                write!(f, "failed to render {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::CreateDir { source, .. } => Some(source),
            ChartError::Font { .. } | ChartError::Render { .. } => None,
        }
    }
}

/// Write the vector and raster charts, overwriting existing files.
pub fn write_charts(
    output: &OutputConfig,
    figure: &PosteriorFigure<'_>,
) -> Result<ChartFiles, ChartError> {
    std::fs::create_dir_all(&output.dir).map_err(|source| ChartError::CreateDir {
        path: output.dir.clone(),
        source,
    })?;

    let files = ChartFiles {
        svg: output.svg_path(),
        png: output.png_path(),
    };
    write_svg(&files.svg, figure)?;
    write_png(&files.png, figure)?;

    tracing::info!(
        svg = %files.svg.display(),
        png = %files.png.display(),
        "Charts written"
    );
    Ok(files)
}

pub fn write_svg(path: &Path, figure: &PosteriorFigure<'_>) -> Result<(), ChartError> {
    register_fonts()?;
    let layout = ChartLayout::SVG;
    let root = SVGBackend::new(path, layout.size).into_drawing_area();
    draw_figure(&root, figure, layout).map_err(|e| ChartError::render(path, e))?;
    root.present().map_err(|e| ChartError::render(path, e))
}

pub fn write_png(path: &Path, figure: &PosteriorFigure<'_>) -> Result<(), ChartError> {
    register_fonts()?;
    let layout = ChartLayout::PNG;
    let root = BitMapBackend::new(path, layout.size).into_drawing_area();
    draw_figure(&root, figure, layout).map_err(|e| ChartError::render(path, e))?;
    root.present().map_err(|e| ChartError::render(path, e))
}

/// Draw the figure on any plotters backend. Fonts must be registered first.
pub(crate) fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &PosteriorFigure<'_>,
    layout: ChartLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(layout.margin())
        .x_label_area_size(layout.x_label_area())
        .y_label_area_size(layout.y_label_area())
        .build_cartesian_2d(0.0..X_MAX, 0.0..Y_MAX)?;

    chart
        .configure_mesh()
        .x_desc(figure.labels.prior_axis())
        .y_desc("Predictive value")
        .label_style(layout.font(14))
        .axis_desc_style(layout.font(16))
        .set_all_tick_mark_size(layout.tick_size())
        .light_line_style(WHITE)
        .draw()?;

    let line_width = 2 * layout.scale;
    let ppv_style = BLACK.stroke_width(line_width);
    let npv_style = NPV_GRAY.stroke_width(line_width);
    let legend_len = (20 * layout.scale) as i32;

    chart
        .draw_series(LineSeries::new(figure.curves.ppv_points(), ppv_style))?
        .label(figure.labels.ppv_legend())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], ppv_style));
    chart
        .draw_series(LineSeries::new(figure.curves.npv_points(), npv_style))?
        .label(figure.labels.npv_legend())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], npv_style));

    let h = figure.highlight;
    let marker_radius = 5 * layout.scale;
    chart.draw_series(
        [(h.prior, h.ppv), (h.prior, h.npv)]
            .into_iter()
            .map(|point| Circle::new(point, marker_radius, MARKER_GRAY.filled())),
    )?;

    let font = layout.font(15).into_font();
    let line_gap = 0.045 * Y_MAX;
    let [positive_at, negative_at] = annotation_anchors(&h);
    let annotations = [
        (positive_annotation(&h), positive_at),
        (negative_annotation(&h), negative_at),
    ];
    for (lines, (x, y)) in annotations {
        for (i, line) in lines.into_iter().enumerate() {
            chart.draw_series(std::iter::once(Text::new(
                line,
                (x, y - i as f64 * line_gap),
                font.clone(),
            )))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .label_font(layout.font(14))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Count pixels in an RGB buffer that are clearly darker than the white
/// background.
#[cfg(test)]
pub(crate) fn ink(
    rgb: &[u8],
    width: u32,
    rows: std::ops::Range<u32>,
    cols: std::ops::Range<u32>,
) -> usize {
    rows.flat_map(|y| cols.clone().map(move |x| ((y * width + x) * 3) as usize))
        .filter(|&i| rgb[i..i + 3].iter().any(|&c| c < 200))
        .count()
}
