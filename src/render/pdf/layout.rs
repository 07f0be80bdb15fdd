//! Text layout for the fallback PDF serializer: markup flattening,
//! word wrap, and pagination.
//!
//! Metrics are fixed and documented here as part of the default theme:
//! 72 pt margins on all sides, an average glyph width of half the point
//! size (a monospace-equivalent estimate for the built-in Helvetica),
//! and a line height of 1.4 times the point size.

use crate::render::options::PageSize;

/// Page margin on all four sides, in points.
pub const MARGIN_PT: f32 = 72.0;

/// Estimated average glyph width as a fraction of the point size.
const AVG_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Line height as a multiple of the point size.
const LINE_HEIGHT_RATIO: f32 = 1.4;

/// Style hint for a flattened text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Top-level heading (h1)
    Heading,
    /// Section heading (h2, h3)
    Subheading,
    /// Plain body text
    Body,
    /// List item
    Bullet,
}

impl FragmentKind {
    /// Point size for this style.
    pub fn point_size(self) -> f32 {
        match self {
            FragmentKind::Heading => 18.0,
            FragmentKind::Subheading => 14.0,
            FragmentKind::Body => 11.0,
            FragmentKind::Bullet => 11.0,
        }
    }

    /// Vertical advance per output line.
    pub fn line_height(self) -> f32 {
        self.point_size() * LINE_HEIGHT_RATIO
    }

    /// Extra space above the first line of a fragment.
    fn space_before(self) -> f32 {
        match self {
            FragmentKind::Heading => 10.0,
            FragmentKind::Subheading => 8.0,
            FragmentKind::Body => 4.0,
            FragmentKind::Bullet => 1.0,
        }
    }

    /// Estimated width of `text` at this style, in points.
    fn text_width(self, text: &str) -> f32 {
        text.chars().count() as f32 * self.point_size() * AVG_CHAR_WIDTH_RATIO
    }
}

/// A positioned text fragment stripped of markup structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Style hint selecting size and spacing.
    pub kind: FragmentKind,
    /// Whitespace-collapsed text.
    pub text: String,
}

impl Fragment {
    /// Create a fragment.
    pub fn new(kind: FragmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One laid-out output line with its baseline position.
#[derive(Debug, Clone)]
pub struct Line {
    /// Line text (bullet prefix already applied).
    pub text: String,
    /// Style the line inherits from its fragment.
    pub kind: FragmentKind,
    /// Baseline y coordinate, measured from the page bottom.
    pub y: f32,
}

/// Flatten rendered HTML to an ordered sequence of styled fragments.
///
/// This only needs to understand the markup the bundled themes (and
/// reasonable custom templates) produce: headings become `Heading` /
/// `Subheading`, `li` becomes `Bullet`, all other visible text becomes
/// `Body`. `head`, `style` and `script` content is dropped.
pub fn flatten_html(html: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current_kind = FragmentKind::Body;
    let mut text = String::new();
    let mut skip_depth = 0usize;
    let mut chars = html.chars().peekable();

    let mut flush = |kind: FragmentKind, text: &mut String, fragments: &mut Vec<Fragment>| {
        let collapsed = collapse_whitespace(text);
        if !collapsed.is_empty() {
            fragments.push(Fragment::new(kind, collapsed));
        }
        text.clear();
    };

    while let Some(c) = chars.next() {
        if c != '<' {
            if skip_depth == 0 {
                text.push(c);
            }
            continue;
        }

        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }
        let tag = tag.trim();
        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match name.as_str() {
            "head" | "style" | "script" | "title" => {
                if closing {
                    skip_depth = skip_depth.saturating_sub(1);
                } else {
                    skip_depth += 1;
                }
            }
            "h1" => {
                flush(current_kind, &mut text, &mut fragments);
                current_kind = if closing {
                    FragmentKind::Body
                } else {
                    FragmentKind::Heading
                };
            }
            "h2" | "h3" => {
                flush(current_kind, &mut text, &mut fragments);
                current_kind = if closing {
                    FragmentKind::Body
                } else {
                    FragmentKind::Subheading
                };
            }
            "li" => {
                flush(current_kind, &mut text, &mut fragments);
                current_kind = if closing {
                    FragmentKind::Body
                } else {
                    FragmentKind::Bullet
                };
            }
            // Block boundaries flush accumulated text; inline tags do not.
            "p" | "div" | "section" | "header" | "footer" | "ul" | "ol" | "dl" | "dt" | "dd"
            | "br" | "body" | "html" | "table" | "tr" => {
                flush(current_kind, &mut text, &mut fragments);
                if closing {
                    current_kind = FragmentKind::Body;
                }
            }
            _ => {}
        }
    }
    flush(current_kind, &mut text, &mut fragments);
    fragments
}

/// Collapse runs of whitespace and decode the common HTML entities.
fn collapse_whitespace(text: &str) -> String {
    let decoded = decode_entities(text);
    let mut collapsed = String::with_capacity(decoded.len());
    let mut last_space = true;
    for c in decoded.chars() {
        if c.is_whitespace() {
            if !last_space {
                collapsed.push(' ');
                last_space = true;
            }
        } else {
            collapsed.push(c);
            last_space = false;
        }
    }
    collapsed.trim_end().to_string()
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '&' {
            out.push(c);
            continue;
        }
        let mut entity = String::new();
        let mut terminated = false;
        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                terminated = true;
                break;
            }
            if entity.len() >= 8 || next == '&' || next.is_whitespace() {
                break;
            }
            entity.push(next);
            chars.next();
        }
        if !terminated {
            out.push('&');
            out.push_str(&entity);
            continue;
        }
        match entity.as_str() {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            "nbsp" => out.push(' '),
            "middot" => out.push('\u{00b7}'),
            numeric if numeric.starts_with('#') => {
                let body = numeric.trim_start_matches('#');
                let code = match body.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => body.parse::<u32>().ok(),
                }
                .and_then(char::from_u32);
                match code {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('&');
                        out.push_str(&entity);
                        out.push(';');
                    }
                }
            }
            other => {
                out.push('&');
                out.push_str(other);
                out.push(';');
            }
        }
    }
    out
}

/// Word-wrap one fragment into output lines no wider than `usable_width`.
///
/// Words are never split; a single word wider than the usable width is
/// placed alone on its own line without truncation. Bullet fragments get
/// a marker on the first line and a matching indent on continuations.
pub fn wrap_fragment(fragment: &Fragment, usable_width: f32) -> Vec<String> {
    let (first_prefix, cont_prefix) = match fragment.kind {
        FragmentKind::Bullet => ("- ", "  "),
        _ => ("", ""),
    };

    let mut lines = Vec::new();
    let mut line = String::from(first_prefix);
    let mut line_empty = true;

    for word in fragment.text.split_whitespace() {
        let prefix = if lines.is_empty() { first_prefix } else { cont_prefix };
        let candidate_len = if line_empty {
            prefix.len() + word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        let candidate_width = candidate_len as f32 * fragment.kind.point_size() * AVG_CHAR_WIDTH_RATIO;

        if !line_empty && candidate_width > usable_width {
            lines.push(line);
            line = String::from(cont_prefix);
            line_empty = true;
        }
        if !line_empty {
            line.push(' ');
        }
        line.push_str(word);
        line_empty = false;
    }

    if !line_empty {
        lines.push(line);
    }
    if lines.is_empty() {
        // Zero-length fragments still occupy a (blank) line.
        lines.push(String::new());
    }
    lines
}

/// Wrap and paginate fragments into pages of positioned lines.
///
/// Lines accumulate until the running vertical offset would pass the
/// usable height, then the page is sealed and a new one starts at the
/// top margin. Always yields at least one page; never bounds the count.
pub fn paginate(fragments: &[Fragment], page_size: PageSize) -> Vec<Vec<Line>> {
    let (page_width, page_height) = page_size.dimensions();
    let usable_width = page_width - 2.0 * MARGIN_PT;
    let usable_height = page_height - 2.0 * MARGIN_PT;

    let mut pages: Vec<Vec<Line>> = Vec::new();
    let mut page: Vec<Line> = Vec::new();
    let mut cursor = 0.0f32;

    for fragment in fragments {
        for (i, text) in wrap_fragment(fragment, usable_width).into_iter().enumerate() {
            let space_before = if i == 0 { fragment.kind.space_before() } else { 0.0 };
            let mut advance = space_before + fragment.kind.line_height();

            if !page.is_empty() && cursor + advance > usable_height {
                pages.push(std::mem::take(&mut page));
                cursor = 0.0;
                // No leading gap at the top of a fresh page.
                advance = fragment.kind.line_height();
            }

            cursor += advance;
            page.push(Line {
                text,
                kind: fragment.kind,
                y: page_height - MARGIN_PT - cursor,
            });
        }
    }

    // An empty document is still one structurally valid (blank) page.
    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_heading_and_body() {
        let fragments = flatten_html("<html><body><h1>Alice</h1><p>Engineer at Acme</p></body></html>");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], Fragment::new(FragmentKind::Heading, "Alice"));
        assert_eq!(fragments[1], Fragment::new(FragmentKind::Body, "Engineer at Acme"));
    }

    #[test]
    fn test_flatten_skips_head_content() {
        let fragments = flatten_html(
            "<html><head><title>x</title><style>body { color: red; }</style></head>\
             <body><p>visible</p></body></html>",
        );
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "visible");
    }

    #[test]
    fn test_flatten_bullets() {
        let fragments = flatten_html("<ul><li>First</li><li>Second</li></ul>");
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().all(|f| f.kind == FragmentKind::Bullet));
    }

    #[test]
    fn test_flatten_decodes_entities() {
        let fragments = flatten_html("<p>Fish &amp; Chips &lt;ltd&gt;</p>");
        assert_eq!(fragments[0].text, "Fish & Chips <ltd>");
    }

    #[test]
    fn test_flatten_decodes_numeric_entities() {
        let fragments = flatten_html("<p>it&#x27;s &#8211; fine &#x2f; ok</p>");
        assert_eq!(fragments[0].text, "it's \u{2013} fine / ok");
    }

    #[test]
    fn test_flatten_collapses_whitespace() {
        let fragments = flatten_html("<p>  spread \n  out   text </p>");
        assert_eq!(fragments[0].text, "spread out text");
    }

    #[test]
    fn test_wrap_never_splits_words() {
        let fragment = Fragment::new(
            FragmentKind::Body,
            "alpha beta gamma delta epsilon zeta eta theta iota kappa",
        );
        let lines = wrap_fragment(&fragment, 120.0);
        for line in &lines {
            for word in line.split_whitespace() {
                assert!(fragment.text.contains(word), "split word: {word}");
            }
        }
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_wrap_width_respected() {
        let fragment = Fragment::new(FragmentKind::Body, "one two three four five six seven");
        let usable = 100.0;
        for line in wrap_fragment(&fragment, usable) {
            let width = line.chars().count() as f32 * FragmentKind::Body.point_size() * 0.5;
            assert!(width <= usable, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_wrap_overwidth_word_alone() {
        let long_word = "a".repeat(200);
        let text = format!("short {long_word} tail");
        let fragment = Fragment::new(FragmentKind::Body, text);
        let lines = wrap_fragment(&fragment, 100.0);
        assert!(lines.iter().any(|l| l.trim() == long_word));
    }

    #[test]
    fn test_wrap_bullet_prefix() {
        let fragment = Fragment::new(FragmentKind::Bullet, "item text");
        let lines = wrap_fragment(&fragment, 500.0);
        assert_eq!(lines, vec!["- item text".to_string()]);
    }

    #[test]
    fn test_paginate_empty_input_yields_one_page() {
        let pages = paginate(&[], PageSize::Letter);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_overflow_creates_pages() {
        let fragments: Vec<Fragment> = (0..200)
            .map(|i| Fragment::new(FragmentKind::Body, format!("paragraph number {i}")))
            .collect();
        let pages = paginate(&fragments, PageSize::Letter);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.is_empty());
        }
    }

    #[test]
    fn test_paginate_monotonic() {
        let mut previous = 0;
        for n in [10, 50, 100, 200, 400] {
            let fragments: Vec<Fragment> = (0..n)
                .map(|i| Fragment::new(FragmentKind::Body, format!("line {i}")))
                .collect();
            let count = paginate(&fragments, PageSize::Letter).len();
            assert!(count >= previous, "page count decreased at n={n}");
            previous = count;
        }
    }

    #[test]
    fn test_paginate_lines_within_margins() {
        let fragments: Vec<Fragment> = (0..100)
            .map(|i| Fragment::new(FragmentKind::Body, format!("line {i}")))
            .collect();
        let (_, page_height) = PageSize::Letter.dimensions();
        for page in paginate(&fragments, PageSize::Letter) {
            for line in page {
                assert!(line.y >= MARGIN_PT - FragmentKind::Body.line_height());
                assert!(line.y <= page_height - MARGIN_PT);
            }
        }
    }
}
