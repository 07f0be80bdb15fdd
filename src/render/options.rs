//! Rendering configuration.

use chrono::{DateTime, Utc};

/// Output format for a render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Themed HTML markup
    Html,

    /// Self-contained PDF (native backend when present, fallback serializer otherwise)
    #[default]
    Pdf,

    /// Typst source compiled by the external `typst` toolchain
    Typst,
}

impl OutputFormat {
    /// The registry name for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Typst => "typst",
        }
    }

    /// Parse a format name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" => Some(OutputFormat::Html),
            "pdf" => Some(OutputFormat::Pdf),
            "typst" => Some(OutputFormat::Typst),
            _ => None,
        }
    }
}

/// Page size profile for paginated output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    /// US Letter, 612 x 792 pt (8.5 x 11 in)
    #[default]
    Letter,
    /// ISO A4, 595 x 842 pt (210 x 297 mm)
    A4,
}

impl PageSize {
    /// Page dimensions in points (1 pt = 1/72 inch).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }
}

/// Options for the fallback PDF serializer.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Creation date written into the document info dictionary.
    ///
    /// This is the only permitted source of non-determinism: with
    /// `None` (the default), identical content always serializes to
    /// byte-identical output and no info object is emitted.
    pub creation_date: Option<DateTime<Utc>>,
}

impl SerializeOptions {
    /// Create options with defaults (deterministic output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation date stamped into the document.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

/// Configuration for a single render call.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Requested output format
    pub format: OutputFormat,

    /// Theme name (ignored when `custom_template` is set)
    pub theme: String,

    /// Literal template text overriding theme lookup
    pub custom_template: Option<String>,

    /// Page size for paginated formats
    pub page_size: PageSize,

    /// Fallback PDF serializer options
    pub pdf: SerializeOptions,
}

impl RenderConfig {
    /// Create a config with defaults (PDF, default theme, Letter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the theme name.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set literal template text, taking precedence over the theme.
    pub fn with_custom_template(mut self, template: impl Into<String>) -> Self {
        self.custom_template = Some(template.into());
        self
    }

    /// Set the page size profile.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set fallback PDF serializer options.
    pub fn with_pdf_options(mut self, options: SerializeOptions) -> Self {
        self.pdf = options;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            theme: crate::theme::DEFAULT_THEME.to_string(),
            custom_template: None,
            page_size: PageSize::default(),
            pdf: SerializeOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_format(OutputFormat::Html)
            .with_theme("minimal")
            .with_page_size(PageSize::A4);

        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.theme, "minimal");
        assert_eq!(config.page_size, PageSize::A4);
        assert!(config.custom_template.is_none());
    }

    #[test]
    fn test_output_format_roundtrip() {
        for format in [OutputFormat::Html, OutputFormat::Pdf, OutputFormat::Typst] {
            assert_eq!(OutputFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(OutputFormat::parse("PDF"), Some(OutputFormat::Pdf));
        assert_eq!(OutputFormat::parse("docx"), None);
    }

    #[test]
    fn test_page_size_dimensions() {
        let (w, h) = PageSize::Letter.dimensions();
        assert_eq!((w, h), (612.0, 792.0));
        let (w, h) = PageSize::A4.dimensions();
        assert_eq!((w, h), (595.0, 842.0));
    }

    #[test]
    fn test_serialize_options_default_deterministic() {
        let options = SerializeOptions::new();
        assert!(options.creation_date.is_none());
    }
}
