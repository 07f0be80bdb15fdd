//! Rendering pipeline: options, registry, context building, and the
//! per-format renderers.

pub mod context;
mod html;
mod options;
pub mod pdf;
mod registry;
mod typst;

pub use context::build_context;
pub use html::{to_html, HtmlRenderer};
pub use options::{OutputFormat, PageSize, RenderConfig, SerializeOptions};
pub use pdf::{serialize_html, NativeBackend, PdfRenderer, BACKEND_ENV};
pub use registry::{Renderer, RendererFactory, RendererRegistry};
pub use typst::TypstRenderer;
