use anyhow::{anyhow, Context, Result};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, BrowserConfig};
use colored::*;
use futures_util::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info};

/// Page geometry and scaling for the PDF print. Defaults are A4 portrait with
/// no margins.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub scale: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub paper_width: f64,
    pub paper_height: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            scale: 0.75,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            // A4 in inches
            paper_width: 8.27,
            paper_height: 11.69,
        }
    }
}

/// Write the combined document as a UTF-8 markdown file.
pub async fn write_markdown(content: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, content)
        .await
        .with_context(|| format!("Failed to write markdown to {}", output_path.display()))
}

/// Print the combined HTML to a single PDF through a headless Chromium
/// instance. The browser is launched once, renders one page, and is released
/// before returning. Launch or render failures propagate unrecovered.
pub async fn export_pdf(html: &str, output_path: &Path, options: &PdfOptions) -> Result<()> {
    let config = BrowserConfig::builder()
        .window_size(1920, 1080)
        .build()
        .map_err(|e| anyhow!("Failed to create browser config: {}", e))?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| anyhow!("Failed to launch browser: {}", e))?;

    let handle = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if let Err(err) = h {
                // Only log if it's not a common websocket deserialization error
                let err_str = err.to_string();
                if !err_str.contains("data did not match any variant")
                    && !err_str.contains("untagged enum Message")
                {
                    error!("Browser handler error: {}", err);
                } else {
                    debug!("Chrome protocol message ignored: {}", err);
                }
            }
        }
    });

    let result = render_pdf(&browser, html, output_path, options).await;

    browser.close().await.ok();
    handle.abort();

    result
}

async fn render_pdf(
    browser: &Browser,
    html: &str,
    output_path: &Path,
    options: &PdfOptions,
) -> Result<()> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| anyhow!("Failed to create new page: {}", e))?;

    page.set_content(html)
        .await
        .map_err(|e| anyhow!("Failed to set page content: {}", e))?;

    page.wait_for_navigation()
        .await
        .map_err(|e| anyhow!("Failed to wait for content to load: {}", e))?;

    // Let late-loading content settle before printing
    tokio::time::sleep(Duration::from_millis(500)).await;

    let params = PrintToPdfParams {
        scale: Some(options.scale),
        margin_top: Some(options.margin_top),
        margin_right: Some(options.margin_right),
        margin_bottom: Some(options.margin_bottom),
        margin_left: Some(options.margin_left),
        paper_width: Some(options.paper_width),
        paper_height: Some(options.paper_height),
        print_background: Some(true),
        ..Default::default()
    };

    let pdf_data = page
        .pdf(params)
        .await
        .map_err(|e| anyhow!("Failed to generate PDF: {}", e))?;

    fs::write(output_path, pdf_data)
        .await
        .map_err(|e| anyhow!("Failed to write PDF to {}: {}", output_path.display(), e))?;

    info!(
        "PDF rendered to {}",
        output_path.display().to_string().blue()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_options_are_a4() {
        let options = PdfOptions::default();
        assert!((options.paper_width - 8.27).abs() < f64::EPSILON);
        assert!((options.paper_height - 11.69).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn writes_markdown_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.md");

        write_markdown("# Combined\n\nbody\n", &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Combined\n\nbody\n");
    }
}
