//! Context builder: turns resume content into a template-ready structure.
//!
//! This step is total. Absent or malformed optional values degrade to
//! omission, never to failure: every leaf that is null, an empty string,
//! or an empty collection is pruned, and a named section whose entries
//! all prune away is dropped entirely so no theme renders a heading with
//! no body. Top-level keys outside the core schema survive, in encounter
//! order, as `extra_sections` entries carrying a minimal HTML fragment.

use crate::model::ResumeContent;
use serde_json::{json, Map, Value};

/// Build the template context for a resume.
pub fn build_context(content: &ResumeContent) -> Map<String, Value> {
    let mut context = Map::new();

    // basics is always present, even if pruned to an empty object, so
    // templates can reference basics.* without guards.
    let basics = prune(serde_json::to_value(&content.basics).unwrap_or(Value::Null));
    context.insert(
        "basics".to_string(),
        if basics.is_null() { json!({}) } else { basics },
    );

    insert_section(&mut context, "work", &content.work);
    insert_section(&mut context, "education", &content.education);
    insert_section(&mut context, "projects", &content.projects);
    insert_section(&mut context, "skills", &content.skills);

    let extra_sections: Vec<Value> = content
        .extra
        .iter()
        .filter_map(|(key, value)| extra_section(key, value))
        .collect();
    context.insert("extra_sections".to_string(), Value::Array(extra_sections));

    context
}

fn insert_section<T: serde::Serialize>(context: &mut Map<String, Value>, key: &str, entries: &[T]) {
    let pruned: Vec<Value> = entries
        .iter()
        .filter_map(|entry| {
            let value = prune(serde_json::to_value(entry).unwrap_or(Value::Null));
            (!is_empty_value(&value)).then_some(value)
        })
        .collect();
    if !pruned.is_empty() {
        context.insert(key.to_string(), Value::Array(pruned));
    }
}

/// Whether a value counts as empty for pruning purposes.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.values().all(is_empty_value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Recursively drop empty leaves. Returns `Value::Null` for a value that
/// is empty through and through.
fn prune(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let kept: Vec<Value> = items
                .into_iter()
                .map(prune)
                .filter(|v| !v.is_null())
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Array(kept)
            }
        }
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, prune(v)))
                .filter(|(_, v)| !v.is_null())
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Object(kept)
            }
        }
        other => {
            if is_empty_value(&other) {
                Value::Null
            } else {
                other
            }
        }
    }
}

/// Build one extra-section entry, or `None` if the value prunes away.
fn extra_section(key: &str, value: &Value) -> Option<Value> {
    let pruned = prune(value.clone());
    if is_empty_value(&pruned) {
        return None;
    }
    Some(json!({
        "id": key,
        "title": title_case(key),
        "html": fragment_html(&pruned),
    }))
}

/// Minimal HTML fragment for an arbitrary extra-section value.
fn fragment_html(value: &Value) -> String {
    match value {
        Value::String(s) => format!("<p>{}</p>", escape_html(s)),
        Value::Array(items) => {
            let mut html = String::from("<ul>");
            for item in items {
                html.push_str("<li>");
                html.push_str(&escape_html(&value_text(item)));
                html.push_str("</li>");
            }
            html.push_str("</ul>");
            html
        }
        Value::Object(map) => {
            let mut html = String::from("<dl>");
            for (k, v) in map {
                html.push_str("<dt>");
                html.push_str(&escape_html(k));
                html.push_str("</dt><dd>");
                html.push_str(&escape_html(&value_text(v)));
                html.push_str("</dd>");
            }
            html.push_str("</dl>");
            html
        }
        other => format!("<pre>{}</pre>", escape_html(&value_text(other))),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Turn a snake_case key into a section title ("open_source" -> "Open Source").
fn title_case(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
