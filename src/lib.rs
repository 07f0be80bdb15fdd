//! # cvrender
//!
//! Resume rendering library for Rust.
//!
//! Takes a structured resume (JSON Resume shaped) and renders it to
//! themed HTML, a self-contained PDF, or Typst-compiled output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvrender::{render, OutputFormat, RenderConfig, ResumeContent};
//!
//! fn main() -> cvrender::Result<()> {
//!     let content = ResumeContent::from_json_file("resume.json")?;
//!
//!     let config = RenderConfig::new()
//!         .with_format(OutputFormat::Pdf)
//!         .with_theme("default");
//!     let bytes = render(&content, &config)?;
//!     std::fs::write("resume.pdf", bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multiple output formats**: HTML, PDF, Typst
//! - **Themes**: bundled templates, or caller-supplied template text
//! - **Self-contained PDF**: built-in serializer with word wrap and
//!   pagination, no document library required
//! - **Native backend**: delegates to an installed HTML-to-PDF
//!   converter when one is present
//! - **Extensible**: register custom renderers per format name

pub mod error;
pub mod model;
pub mod render;
pub mod theme;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Basics, EducationEntry, Location, Profile, ProjectEntry, ResumeContent, SkillEntry, WorkEntry,
};
pub use render::{
    to_html, HtmlRenderer, OutputFormat, PageSize, PdfRenderer, RenderConfig, Renderer,
    RendererFactory, RendererRegistry, SerializeOptions, TypstRenderer,
};
pub use theme::{ThemeRegistry, DEFAULT_THEME};

use std::path::Path;
use std::sync::OnceLock;

/// Render a resume with the default pipeline.
///
/// # Example
///
/// ```no_run
/// use cvrender::{render, OutputFormat, RenderConfig, ResumeContent};
///
/// let content = ResumeContent::from_json_file("resume.json").unwrap();
/// let config = RenderConfig::new().with_format(OutputFormat::Html);
/// let bytes = render(&content, &config).unwrap();
/// ```
pub fn render(content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>> {
    default_pipeline().render(content, config)
}

/// Render a resume and write the output to a file atomically.
pub fn render_to_file<P: AsRef<Path>>(
    content: &ResumeContent,
    config: &RenderConfig,
    path: P,
) -> Result<()> {
    default_pipeline().render_to_file(content, config, path)
}

/// Render a resume to an HTML string with the default theme settings.
pub fn render_html(content: &ResumeContent) -> Result<String> {
    to_html(content, &RenderConfig::new().with_format(OutputFormat::Html))
}

/// Render a resume to PDF bytes with default settings.
pub fn render_pdf(content: &ResumeContent) -> Result<Vec<u8>> {
    render(content, &RenderConfig::new().with_format(OutputFormat::Pdf))
}

fn default_pipeline() -> &'static Pipeline {
    static PIPELINE: OnceLock<Pipeline> = OnceLock::new();
    PIPELINE.get_or_init(Pipeline::new)
}

/// A rendering pipeline holding its own renderer registry.
///
/// The registry is explicit state on the pipeline rather than a hidden
/// module-level singleton; the free functions in this crate use one
/// shared default instance for convenience call sites.
pub struct Pipeline {
    registry: RendererRegistry,
}

impl Pipeline {
    /// Create a pipeline with the built-in renderers.
    pub fn new() -> Self {
        Self {
            registry: RendererRegistry::with_defaults(),
        }
    }

    /// Create a pipeline around an existing registry.
    pub fn with_registry(registry: RendererRegistry) -> Self {
        Self { registry }
    }

    /// The renderer registry backing this pipeline.
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Register (or replace) a renderer factory for a format name.
    pub fn register_renderer(&self, name: impl Into<String>, factory: RendererFactory) {
        self.registry.register(name, factory);
    }

    /// Render a resume to output bytes.
    pub fn render(&self, content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>> {
        let renderer = self.registry.get(config.format.as_str())?;
        renderer.render(content, config)
    }

    /// Render a resume and write the output to `path`.
    ///
    /// Output is written to a temporary file in the destination
    /// directory and atomically moved into place, so a failed render or
    /// interrupted write never leaves a partial file behind.
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        content: &ResumeContent,
        config: &RenderConfig,
        path: P,
    ) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render(content, config)?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };
        std::io::Write::write_all(&mut tmp, &bytes)?;
        tmp.persist(path).map_err(|err| Error::Io(err.error))?;
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> ResumeContent {
        ResumeContent::from_json_str(
            r#"{
                "basics": {"name": "Alice"},
                "work": [{"name": "Acme", "position": "Engineer"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_html_contains_name() {
        let html = render_html(&sample()).unwrap();
        assert!(html.contains("Alice"));
    }

    #[test]
    fn test_pipeline_unknown_format() {
        let pipeline = Pipeline::with_registry(RendererRegistry::new());
        let config = RenderConfig::new().with_format(OutputFormat::Html);
        assert!(matches!(
            pipeline.render(&sample(), &config),
            Err(Error::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_pipeline_register_renderer() {
        struct FixedRenderer;
        impl Renderer for FixedRenderer {
            fn name(&self) -> &str {
                "html"
            }
            fn render(&self, _: &ResumeContent, _: &RenderConfig) -> Result<Vec<u8>> {
                Ok(b"custom".to_vec())
            }
        }

        let pipeline = Pipeline::new();
        pipeline.register_renderer("html", Arc::new(|| Arc::new(FixedRenderer)));

        let config = RenderConfig::new().with_format(OutputFormat::Html);
        let bytes = pipeline.render(&sample(), &config).unwrap();
        assert_eq!(bytes, b"custom");
    }

    #[test]
    fn test_render_to_file_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let config = RenderConfig::new().with_format(OutputFormat::Html);

        render_to_file(&sample(), &config, &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Alice"));

        // No stray temporary files left behind.
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
