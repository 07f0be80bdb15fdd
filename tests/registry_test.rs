//! Renderer registry behavior through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cvrender::{
    Error, OutputFormat, Pipeline, RenderConfig, Renderer, RendererRegistry, ResumeContent, Result,
};

struct StaticRenderer {
    name: &'static str,
    payload: &'static [u8],
}

impl Renderer for StaticRenderer {
    fn name(&self) -> &str {
        self.name
    }

    fn render(&self, _content: &ResumeContent, _config: &RenderConfig) -> Result<Vec<u8>> {
        Ok(self.payload.to_vec())
    }
}

fn sample_resume() -> ResumeContent {
    ResumeContent::from_json_str(r#"{"basics": {"name": "Alice"}}"#).unwrap()
}

#[test]
fn test_default_registry_formats() {
    let registry = RendererRegistry::with_defaults();
    assert_eq!(registry.formats(), vec!["html", "pdf", "typst"]);
}

#[test]
fn test_unknown_format_error_names_alternatives() {
    let registry = RendererRegistry::with_defaults();
    let err = registry.get("docx").unwrap_err();

    let message = err.to_string();
    assert!(message.contains("docx"));
    assert!(message.contains("html"));
    assert!(message.contains("pdf"));
    assert!(message.contains("typst"));
    assert!(matches!(err, Error::UnknownFormat { .. }));
}

#[test]
fn test_registered_renderer_is_used_for_dispatch() {
    let pipeline = Pipeline::new();
    pipeline.register_renderer(
        "html",
        Arc::new(|| {
            Arc::new(StaticRenderer {
                name: "html",
                payload: b"replaced",
            })
        }),
    );

    let config = RenderConfig::new().with_format(OutputFormat::Html);
    let bytes = pipeline.render(&sample_resume(), &config).unwrap();
    assert_eq!(bytes, b"replaced");
}

#[test]
fn test_custom_format_name() {
    let registry = RendererRegistry::with_defaults();
    registry.register(
        "txt",
        Arc::new(|| {
            Arc::new(StaticRenderer {
                name: "txt",
                payload: b"plain text",
            })
        }),
    );

    assert!(registry.contains("txt"));
    assert_eq!(registry.formats(), vec!["html", "pdf", "txt", "typst"]);

    let renderer = registry.get("txt").unwrap();
    let bytes = renderer
        .render(&sample_resume(), &RenderConfig::new())
        .unwrap();
    assert_eq!(bytes, b"plain text");
}

#[test]
fn test_factory_runs_once_per_registration() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let registry = RendererRegistry::new();
    registry.register(
        "mock",
        Arc::new(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Arc::new(StaticRenderer {
                name: "mock",
                payload: b"",
            })
        }),
    );

    for _ in 0..5 {
        registry.get("mock").unwrap();
    }
    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);

    // Re-registering the same name discards the cached instance.
    registry.register(
        "mock",
        Arc::new(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Arc::new(StaticRenderer {
                name: "mock",
                payload: b"",
            })
        }),
    );
    registry.get("mock").unwrap();
    assert_eq!(BUILDS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_access() {
    let registry = Arc::new(RendererRegistry::with_defaults());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    registry.register(
                        "spare",
                        Arc::new(|| {
                            Arc::new(StaticRenderer {
                                name: "spare",
                                payload: b"",
                            })
                        }),
                    );
                }
                registry.get("html").map(|r| r.name().to_string())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "html");
    }
}
