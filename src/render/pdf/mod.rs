//! PDF rendering: native backend when available, self-contained
//! fallback serializer otherwise.

mod backend;
pub mod layout;
pub mod writer;

pub use backend::{NativeBackend, BACKEND_ENV};

use crate::error::Result;
use crate::model::ResumeContent;
use crate::render::html::HtmlRenderer;
use crate::render::options::{PageSize, SerializeOptions};
use crate::render::registry::Renderer;
use crate::render::RenderConfig;
use log::debug;

/// Serialize HTML markup to PDF bytes with the built-in serializer.
///
/// Total for any input: flattening, wrapping and pagination have no
/// failure path, and even empty markup yields a valid one-page file.
pub fn serialize_html(html: &str, page_size: PageSize, options: &SerializeOptions) -> Vec<u8> {
    let fragments = layout::flatten_html(html);
    let pages = layout::paginate(&fragments, page_size);
    writer::serialize(&pages, page_size, options)
}

/// PDF renderer.
///
/// Renders themed HTML first, then converts: through the native backend
/// when one is present, and through [`serialize_html`] otherwise.
pub struct PdfRenderer {
    html: HtmlRenderer,
}

impl PdfRenderer {
    /// Create a renderer with the bundled themes.
    pub fn new() -> Self {
        Self {
            html: HtmlRenderer::new(),
        }
    }

    /// Render to PDF bytes.
    pub fn render_pdf(&self, content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>> {
        let html = self.html.render_html(content, config)?;

        match NativeBackend::probe() {
            Some(backend) => backend.convert(&html),
            None => {
                debug!("no native PDF backend, using fallback serializer");
                Ok(serialize_html(&html, config.page_size, &config.pdf))
            }
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    fn render(&self, content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>> {
        self.render_pdf(content, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_html_minimal() {
        let bytes = serialize_html(
            "<html><body><h1>Alice</h1></body></html>",
            PageSize::Letter,
            &SerializeOptions::new(),
        );
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF"));
        assert!(String::from_utf8_lossy(&bytes).contains("(Alice)"));
    }

    #[test]
    fn test_serialize_html_empty_markup() {
        let bytes = serialize_html("", PageSize::A4, &SerializeOptions::new());
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(String::from_utf8_lossy(&bytes).contains("/Count 1"));
    }
}
