//! Renderer trait and format registry.

use crate::error::{Error, Result};
use crate::model::ResumeContent;
use crate::render::html::HtmlRenderer;
use crate::render::pdf::PdfRenderer;
use crate::render::typst::TypstRenderer;
use crate::render::RenderConfig;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// A capability converting resume content and config into output bytes
/// for one format.
pub trait Renderer: Send + Sync {
    /// Registry name of this renderer's format.
    fn name(&self) -> &str;

    /// Render the content to output bytes.
    fn render(&self, content: &ResumeContent, config: &RenderConfig) -> Result<Vec<u8>>;
}

impl std::fmt::Debug for dyn Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").field("name", &self.name()).finish()
    }
}

/// Constructor for a renderer, invoked lazily on first lookup.
pub type RendererFactory = Arc<dyn Fn() -> Arc<dyn Renderer> + Send + Sync>;

struct Entry {
    factory: RendererFactory,
    instance: OnceLock<Arc<dyn Renderer>>,
}

impl Entry {
    fn renderer(&self) -> Arc<dyn Renderer> {
        self.instance.get_or_init(|| (self.factory)()).clone()
    }
}

/// Registry mapping format names to renderer factories.
///
/// Renderer instances are constructed on first `get` and cached for the
/// registry's lifetime. Registration overwrites any prior entry for the
/// same name (and discards its cached instance); this is the supported
/// way to replace a built-in renderer. All operations are safe against
/// concurrent `register`/`get` calls: a replace never disturbs an
/// in-flight `get` that already captured the old entry.
pub struct RendererRegistry {
    entries: RwLock<HashMap<String, Arc<Entry>>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in renderers (html, pdf, typst).
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("html", Arc::new(|| Arc::new(HtmlRenderer::new())));
        registry.register("pdf", Arc::new(|| Arc::new(PdfRenderer::new())));
        registry.register("typst", Arc::new(|| Arc::new(TypstRenderer::new())));
        registry
    }

    /// Register a renderer factory for a format name.
    ///
    /// Last writer wins; a previously cached instance for this name is
    /// dropped once no in-flight call still holds it.
    pub fn register(&self, name: impl Into<String>, factory: RendererFactory) {
        let entry = Arc::new(Entry {
            factory,
            instance: OnceLock::new(),
        });
        self.entries
            .write()
            .expect("renderer registry lock poisoned")
            .insert(name.into(), entry);
    }

    /// Get the renderer for a format name, constructing it on first use.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Renderer>> {
        let entry = {
            let entries = self
                .entries
                .read()
                .expect("renderer registry lock poisoned");
            entries.get(name).cloned()
        };
        match entry {
            Some(entry) => Ok(entry.renderer()),
            None => Err(Error::UnknownFormat {
                format: name.to_string(),
                available: self.formats().join(", "),
            }),
        }
    }

    /// Check whether a format name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .expect("renderer registry lock poisoned")
            .contains_key(name)
    }

    /// List registered format names, sorted.
    pub fn formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .expect("renderer registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRenderer {
        name: &'static str,
    }

    impl Renderer for CountingRenderer {
        fn name(&self) -> &str {
            self.name
        }

        fn render(&self, _content: &ResumeContent, _config: &RenderConfig) -> Result<Vec<u8>> {
            Ok(self.name.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_with_defaults_has_builtins() {
        let registry = RendererRegistry::with_defaults();
        assert_eq!(registry.formats(), vec!["html", "pdf", "typst"]);
        assert!(registry.contains("pdf"));
        assert!(!registry.contains("docx"));
    }

    #[test]
    fn test_get_unknown_format() {
        let registry = RendererRegistry::with_defaults();
        let err = registry.get("docx").unwrap_err();
        match err {
            Error::UnknownFormat { format, available } => {
                assert_eq!(format, "docx");
                assert!(available.contains("html"));
                assert!(available.contains("pdf"));
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_lazy_construction_and_caching() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let registry = RendererRegistry::new();
        registry.register(
            "mock",
            Arc::new(|| {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                Arc::new(CountingRenderer { name: "mock" })
            }),
        );

        assert_eq!(BUILDS.load(Ordering::SeqCst), 0);
        let first = registry.get("mock").unwrap();
        let second = registry.get("mock").unwrap();
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_register_overwrites() {
        let registry = RendererRegistry::with_defaults();
        registry.register("html", Arc::new(|| Arc::new(CountingRenderer { name: "html" })));

        let renderer = registry.get("html").unwrap();
        let bytes = renderer
            .render(&ResumeContent::new(), &RenderConfig::new())
            .unwrap();
        assert_eq!(bytes, b"html");
    }

    #[test]
    fn test_concurrent_get() {
        let registry = Arc::new(RendererRegistry::with_defaults());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.get("html").map(|r| r.name().to_string()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "html");
        }
    }
}
