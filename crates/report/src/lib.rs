//! # Value Chain Report Export
//!
//! Assembles the PDF report: optional logo, title, timestamp, the metrics
//! table, the recommendations and the two bar charts.
//!
//! The chart PNGs only live in a scoped temporary directory for the duration
//! of one export; the directory is removed however the export ends.

use analytics::ValueChainReport;
use analyzer::{ALL_CLEAR_MESSAGE, Recommendation};
use charts::{ChartFiles, ChartMetric, ChartSize};
use chrono::NaiveDateTime;
use configuration::ReportSettings;
use image::DynamicImage;
use layout::{CONTENT_WIDTH_MM, MARGIN_MM, PageWriter, Weight, wrap};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod error;
pub mod layout;
pub mod table;

pub use error::ReportError;

/// File name offered for the downloaded report.
pub const REPORT_FILE_NAME: &str = "value_chain_report.pdf";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Timestamp format of the "Generated on" line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ROW_HEIGHT_MM: f32 = 10.0;
const LOGO_MAX_HEIGHT_MM: f32 = 60.0;
const CHART_WIDTH_MM: f32 = 180.0;

/// Everything that goes into one report besides the chart images.
pub struct ReportContent<'a> {
    pub title: &'a str,
    pub generated_at: NaiveDateTime,
    pub analysis: &'a ValueChainReport,
    pub recommendations: &'a [Recommendation],
    pub logo: Option<DynamicImage>,
}

/// Exports value chain analyses as PDF files.
pub struct ReportExporter {
    settings: ReportSettings,
}

impl ReportExporter {
    pub fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }

    /// Renders the charts, builds the PDF and writes it to `output`.
    ///
    /// The file appears at `output` only once the whole document has been
    /// generated; a failed export leaves no partial file behind.
    pub fn export(
        &self,
        analysis: &ValueChainReport,
        recommendations: &[Recommendation],
        output: &Path,
    ) -> Result<PathBuf, ReportError> {
        let bytes = self.render(analysis, recommendations, chrono::Local::now().naive_local())?;

        let parent = match output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(&bytes)?;
        staged.persist(output).map_err(|e| e.error)?;

        tracing::info!(path = %output.display(), bytes = bytes.len(), "Report written.");
        Ok(output.to_path_buf())
    }

    /// Produces the PDF bytes, rendering the charts in a temporary directory.
    pub fn render(
        &self,
        analysis: &ValueChainReport,
        recommendations: &[Recommendation],
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, ReportError> {
        let content = ReportContent {
            title: &self.settings.title,
            generated_at,
            analysis,
            recommendations,
            logo: load_logo(&self.settings.logo_path),
        };

        let scratch = tempfile::Builder::new().prefix("valuechain-charts-").tempdir()?;
        let size = ChartSize {
            width: self.settings.chart_width,
            height: self.settings.chart_height,
        };
        let files = charts::render_charts(&analysis.metrics, scratch.path(), size)?;

        build_document(&content, &files)
        // `scratch` is dropped here, removing the chart images.
    }
}

/// Lays out the full document from its content and already-rendered charts.
pub fn build_document(content: &ReportContent<'_>, charts: &ChartFiles) -> Result<Vec<u8>, ReportError> {
    let mut page = PageWriter::new(content.title)?;

    if let Some(logo) = &content.logo {
        page.image(logo, CONTENT_WIDTH_MM, LOGO_MAX_HEIGHT_MM);
        page.ln(5.0);
    }

    page.line(content.title, 16.0, Weight::Bold, 10.0, true);
    let stamp = format!("Generated on: {}", content.generated_at.format(TIMESTAMP_FORMAT));
    page.line(&stamp, 11.0, Weight::Regular, 10.0, true);
    page.ln(10.0);

    write_table(&mut page, content.analysis);
    page.ln(10.0);
    write_recommendations(&mut page, content.recommendations);

    page.new_page();
    for (metric, path) in [
        (ChartMetric::GrossMargin, &charts.gross_margin),
        (ChartMetric::ValueShare, &charts.value_share),
    ] {
        let chart = open_image(path)?;
        page.line(metric.title(), 12.0, Weight::Bold, 10.0, false);
        page.image(&chart, CHART_WIDTH_MM, f32::MAX);
        page.ln(5.0);
    }

    tracing::debug!(pages = page.pages(), "Report layout complete.");
    page.finish()
}

fn write_table(page: &mut PageWriter, analysis: &ValueChainReport) {
    write_row(page, &table::HEADERS.map(String::from), Weight::Bold);
    for m in &analysis.metrics {
        write_row(page, &table::row_cells(m), Weight::Regular);
    }
}

fn write_row(page: &mut PageWriter, cells: &[String; 7], weight: Weight) {
    page.ensure_space(ROW_HEIGHT_MM);
    let mut x = MARGIN_MM;
    for (text, width) in cells.iter().zip(table::COLUMN_WIDTHS_MM) {
        page.cell(x, width, ROW_HEIGHT_MM, text, 10.0, weight);
        x += width;
    }
    page.ln(ROW_HEIGHT_MM);
}

fn write_recommendations(page: &mut PageWriter, recommendations: &[Recommendation]) {
    page.line("Recommendations", 11.0, Weight::Bold, 10.0, false);

    if recommendations.is_empty() {
        page.line(ALL_CLEAR_MESSAGE, 10.0, Weight::Regular, 10.0, false);
        return;
    }
    for rec in recommendations {
        for line in wrap(&format!("- {}", rec), 10.0, CONTENT_WIDTH_MM) {
            page.line(&line, 10.0, Weight::Regular, 10.0, false);
        }
    }
}

/// Loads the logo if the file exists. An unreadable logo is skipped with a warning.
fn load_logo(path: &Path) -> Option<DynamicImage> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No logo found, skipping.");
        return None;
    }
    match open_image(path) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(error = %e, "Logo could not be loaded, skipping.");
            None
        }
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, ReportError> {
    let image_error = |reason: String| ReportError::Image {
        path: path.display().to_string(),
        reason,
    };
    image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| image_error(e.to_string()))
}
