//! HTML → PDF rasterization via headless Chromium.
//!
//! One browser process per render call: launch, load, print, tear down. The
//! process is owned by the `Browser` value inside the render, so it is killed
//! on every exit path (success or `?`). No pooling, no reuse across requests.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use tracing::debug;

use crate::errors::AppError;

const MM_PER_INCH: f64 = 25.4;

/// A4 portrait, dimensions in inches (the unit Page.printToPDF takes).
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

const MARGIN_TOP_BOTTOM_MM: f64 = 20.0;
const MARGIN_LEFT_RIGHT_MM: f64 = 15.0;

/// Template HTML is required to be self-contained, so content loading is
/// trusted to finish. The driver has no "no timeout" setting; a day is the
/// practical equivalent.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(86_400);

fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

fn pdf_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        margin_top: Some(mm_to_inches(MARGIN_TOP_BOTTOM_MM)),
        margin_bottom: Some(mm_to_inches(MARGIN_TOP_BOTTOM_MM)),
        margin_left: Some(mm_to_inches(MARGIN_LEFT_RIGHT_MM)),
        margin_right: Some(mm_to_inches(MARGIN_LEFT_RIGHT_MM)),
        ..Default::default()
    }
}

/// The PDF rendering backend. Carried in `AppState` as `Arc<dyn PdfRenderer>`
/// so tests can substitute a stub for the real browser.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Rasterizes a complete HTML document into PDF bytes.
    async fn render(&self, html: &str) -> Result<Vec<u8>, AppError>;
}

/// Production renderer backed by the `headless_chrome` driver.
pub struct ChromePdfRenderer;

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, AppError> {
        let html = html.to_owned();

        // The driver is synchronous; keep it off the async workers.
        let pdf = tokio::task::spawn_blocking(move || render_blocking(&html))
            .await
            .map_err(|e| AppError::Render(format!("render task failed: {e}")))?
            .map_err(|e| AppError::Render(format!("{e:#}")))?;

        debug!("Rendered PDF ({} bytes)", pdf.len());
        Ok(pdf)
    }
}

fn render_blocking(html: &str) -> anyhow::Result<Vec<u8>> {
    // Stage the HTML to a temp file so the tab can load it over file://
    // without hitting the network.
    let staged = tempfile::Builder::new()
        .prefix("document-")
        .suffix(".html")
        .tempfile()
        .context("failed to stage HTML for rendering")?;
    std::fs::write(staged.path(), html).context("failed to write staged HTML")?;

    let launch_options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .build()
        .map_err(|e| anyhow::anyhow!("invalid browser launch options: {e}"))?;

    // Dropping `browser` kills the Chromium process, so no exit path below
    // leaks it.
    let browser = Browser::new(launch_options).context("failed to launch browser")?;
    let tab = browser.new_tab().context("failed to open tab")?;
    tab.set_default_timeout(NAVIGATION_TIMEOUT);

    let url = format!("file://{}", staged.path().display());
    tab.navigate_to(&url)
        .context("failed to load document HTML")?
        .wait_until_navigated()
        .context("document HTML never finished loading")?;

    let pdf = tab
        .print_to_pdf(Some(pdf_options()))
        .context("PDF export failed")?;

    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeter_conversion() {
        assert!((mm_to_inches(25.4) - 1.0).abs() < 1e-9);
        assert!((mm_to_inches(20.0) - 0.7874).abs() < 1e-4);
        assert!((mm_to_inches(15.0) - 0.5906).abs() < 1e-4);
    }

    #[test]
    fn test_page_geometry_is_a4_with_fixed_margins() {
        let opts = pdf_options();
        assert_eq!(opts.paper_width, Some(8.27));
        assert_eq!(opts.paper_height, Some(11.69));
        assert_eq!(opts.print_background, Some(true));
        assert_eq!(opts.margin_top, opts.margin_bottom);
        assert_eq!(opts.margin_left, opts.margin_right);
        assert!(opts.margin_top.unwrap() > opts.margin_left.unwrap());
    }
}
