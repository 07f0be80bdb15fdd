//! External-toolchain renderer driving the `typst` CLI.
//!
//! Unlike the PDF renderer's native backend, this format has no
//! fallback: the caller asked for the toolchain by name, so a missing
//! or failing `typst` executable is surfaced as an error.

use crate::error::{Error, Result};
use crate::model::ResumeContent;
use crate::render::context::build_context;
use crate::render::registry::Renderer;
use crate::render::RenderConfig;
use serde_json::Value;
use std::process::Command;

const TYPST_PROGRAM: &str = "typst";

/// Renderer producing PDF output through the Typst toolchain.
pub struct TypstRenderer {
    program: String,
}

impl TypstRenderer {
    /// Create a renderer invoking `typst` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: TYPST_PROGRAM.to_string(),
        }
    }

    /// Create a renderer invoking a specific executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Generate Typst source for the resume.
    pub fn typst_source(&self, content: &ResumeContent) -> String {
        let context = build_context(content);
        let mut src = String::new();

        src.push_str("#set page(margin: 1in)\n#set text(11pt)\n\n");

        if let Some(basics) = context.get("basics").and_then(Value::as_object) {
            if let Some(name) = basics.get("name").and_then(Value::as_str) {
                src.push_str(&format!("= {}\n", escape_typst(name)));
            }
            let contact: Vec<&str> = ["email", "phone", "url"]
                .iter()
                .filter_map(|key| basics.get(*key).and_then(Value::as_str))
                .collect();
            if !contact.is_empty() {
                let escaped: Vec<String> = contact.iter().map(|s| escape_typst(s)).collect();
                src.push_str(&escaped.join(" | "));
                src.push('\n');
            }
            if let Some(summary) = basics.get("summary").and_then(Value::as_str) {
                src.push_str(&format!("\n{}\n", escape_typst(summary)));
            }
        }

        self.push_entries(&mut src, &context, "work", "Work Experience", |entry| {
            join_present(&[
                entry.get("position").and_then(Value::as_str),
                entry.get("name").and_then(Value::as_str),
            ])
        });
        self.push_entries(&mut src, &context, "education", "Education", |entry| {
            join_present(&[
                entry.get("institution").and_then(Value::as_str),
                entry.get("area").and_then(Value::as_str),
            ])
        });
        self.push_entries(&mut src, &context, "projects", "Projects", |entry| {
            join_present(&[
                entry.get("name").and_then(Value::as_str),
                entry.get("description").and_then(Value::as_str),
            ])
        });
        self.push_entries(&mut src, &context, "skills", "Skills", |entry| {
            let keywords = entry
                .get("keywords")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                });
            match (entry.get("name").and_then(Value::as_str), keywords) {
                (Some(name), Some(kw)) if !kw.is_empty() => format!("{name}: {kw}"),
                (Some(name), _) => name.to_string(),
                (None, Some(kw)) => kw,
                (None, None) => String::new(),
            }
        });

        if let Some(sections) = context.get("extra_sections").and_then(Value::as_array) {
            for section in sections {
                let title = section.get("title").and_then(Value::as_str).unwrap_or("");
                src.push_str(&format!("\n== {}\n", escape_typst(title)));
                let html = section.get("html").and_then(Value::as_str).unwrap_or("");
                for fragment in crate::render::pdf::layout::flatten_html(html) {
                    src.push_str(&format!("{}\n", escape_typst(&fragment.text)));
                }
            }
        }

        src
    }

    fn push_entries(
        &self,
        src: &mut String,
        context: &serde_json::Map<String, Value>,
        key: &str,
        title: &str,
        line: impl Fn(&serde_json::Map<String, Value>) -> String,
    ) {
        let Some(entries) = context.get(key).and_then(Value::as_array) else {
            return;
        };
        src.push_str(&format!("\n== {title}\n"));
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            let head = line(entry);
            if !head.is_empty() {
                src.push_str(&format!("*{}*\n", escape_typst(&head)));
            }
            if let Some(summary) = entry.get("summary").and_then(Value::as_str) {
                src.push_str(&format!("{}\n", escape_typst(summary)));
            }
            if let Some(highlights) = entry.get("highlights").and_then(Value::as_array) {
                for item in highlights.iter().filter_map(Value::as_str) {
                    src.push_str(&format!("- {}\n", escape_typst(item)));
                }
            }
        }
    }

    /// Compile Typst source to PDF bytes via the external CLI.
    fn compile(&self, source: &str) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("resume.typ");
        let output = dir.path().join("resume.pdf");
        std::fs::write(&input, source)?;

        let result = Command::new(&self.program)
            .arg("compile")
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|err| {
                Error::Toolchain(format!("failed to run '{}': {err}", self.program))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Toolchain(format!(
                "'{}' exited with {:?}: {}",
                self.program,
                result.status.code(),
                stderr.lines().next().unwrap_or("no output")
            )));
        }

        std::fs::read(&output)
            .map_err(|err| Error::Toolchain(format!("no output file produced: {err}")))
    }
}

impl Default for TypstRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TypstRenderer {
    fn name(&self) -> &str {
        "typst"
    }

    fn render(&self, content: &ResumeContent, _config: &RenderConfig) -> Result<Vec<u8>> {
        let source = self.typst_source(content);
        self.compile(&source)
    }
}

fn join_present(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" — ")
}

/// Escape characters with markup meaning in Typst.
fn escape_typst(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '#' | '*' | '_' | '$' | '@' | '\\' | '<' | '>' | '[' | ']' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeContent {
        ResumeContent::from_json_str(
            r#"{
                "basics": {"name": "Alice", "email": "alice@example.com"},
                "work": [{"name": "Acme", "position": "Engineer", "highlights": ["Shipped v1"]}],
                "volunteering": "Red Cross"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_typst_source_structure() {
        let renderer = TypstRenderer::new();
        let src = renderer.typst_source(&sample());
        assert!(src.contains("= Alice"));
        assert!(src.contains("== Work Experience"));
        assert!(src.contains("*Engineer — Acme*"));
        assert!(src.contains("- Shipped v1"));
        assert!(src.contains("== Volunteering"));
        assert!(src.contains("Red Cross"));
    }

    #[test]
    fn test_typst_source_omits_empty_sections() {
        let renderer = TypstRenderer::new();
        let src = renderer.typst_source(&sample());
        assert!(!src.contains("== Education"));
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("a#b *c*"), "a\\#b \\*c\\*");
        assert_eq!(escape_typst("user@host"), "user\\@host");
    }

    #[test]
    fn test_missing_toolchain_is_error() {
        let renderer = TypstRenderer::with_program("definitely-not-a-real-binary");
        let err = renderer
            .render(&sample(), &RenderConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::Toolchain(_)));
    }
}
