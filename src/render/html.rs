//! HTML rendering via themed templates.

use crate::error::Result;
use crate::model::ResumeContent;
use crate::render::context::build_context;
use crate::render::registry::Renderer;
use crate::render::RenderConfig;
use crate::theme::ThemeRegistry;
use minijinja::Environment;

/// Render a resume to an HTML string.
pub fn to_html(content: &ResumeContent, config: &RenderConfig) -> Result<String> {
    HtmlRenderer::new().render_html(content, config)
}

/// HTML renderer: context + resolved theme template through the template
/// engine.
pub struct HtmlRenderer {
    themes: ThemeRegistry,
}

impl HtmlRenderer {
    /// Create a renderer with the bundled themes.
    pub fn new() -> Self {
        Self {
            themes: ThemeRegistry::new(),
        }
    }

    /// Create a renderer with a specific theme registry.
    pub fn with_themes(themes: ThemeRegistry) -> Self {
        Self { themes }
    }

    /// Render to an HTML string.
    ///
    /// Bundled themes go through a named `.html` template so every
    /// interpolated field value is HTML-escaped; extra-section fragments
    /// opt back in with `| safe` since they are escaped at build time.
    /// Caller-supplied custom templates render as plain string templates.
    pub fn render_html(&self, content: &ResumeContent, config: &RenderConfig) -> Result<String> {
        let context = build_context(content);
        let mut env = Environment::new();

        let custom = config
            .custom_template
            .as_deref()
            .filter(|t| !t.trim().is_empty());
        match custom {
            Some(template) => Ok(env.render_str(template, context)?),
            None => {
                let template = self.themes.resolve(&config.theme, None);
                env.add_template("theme.html", template)?;
                Ok(env.get_template("theme.html")?.render(context)?)
            }
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>> {
        Ok(self.render_html(content, config)?.into_bytes())
    }
}
