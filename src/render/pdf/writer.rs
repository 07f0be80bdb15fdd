//! Byte-exact PDF emission for the fallback serializer.
//!
//! Builds the document object graph (catalog, pages, font, one page and
//! content stream per sealed page) and writes header, body, xref table
//! and trailer into a single buffer. Object identifiers are assigned in
//! a fixed order (catalog, pages, font, then page/content pairs in page
//! order, optional info last) so identical input yields byte-identical
//! output; the creation date in [`SerializeOptions`] is the only
//! permitted source of non-determinism.

use crate::render::options::{PageSize, SerializeOptions};
use crate::render::pdf::layout::{Line, MARGIN_PT};

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FONT_ID: u32 = 3;
const FIRST_PAGE_ID: u32 = 4;

/// Serialize laid-out pages into a complete PDF file.
///
/// Infallible for any input: an empty page list still produces a valid
/// single blank page document.
pub fn serialize(pages: &[Vec<Line>], page_size: PageSize, options: &SerializeOptions) -> Vec<u8> {
    let page_count = pages.len().max(1) as u32;
    let (page_width, page_height) = page_size.dimensions();

    let info_id = options
        .creation_date
        .map(|_| FIRST_PAGE_ID + 2 * page_count);
    let object_count = FONT_ID + 2 * page_count + if info_id.is_some() { 1 } else { 0 };

    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    buf.extend_from_slice(b"%PDF-1.4\n");

    // (id, byte offset) for every emitted object, in id order.
    let mut offsets: Vec<usize> = Vec::with_capacity(object_count as usize);

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect();

    write_object(
        &mut buf,
        &mut offsets,
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").as_bytes(),
    );
    write_object(
        &mut buf,
        &mut offsets,
        PAGES_ID,
        format!(
            "<< /Type /Pages /Count {page_count} /Kids [{}] >>",
            kids.join(" ")
        )
        .as_bytes(),
    );
    write_object(
        &mut buf,
        &mut offsets,
        FONT_ID,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>",
    );

    let blank: Vec<Line> = Vec::new();
    for i in 0..page_count {
        let lines = pages.get(i as usize).unwrap_or(&blank);
        let page_id = FIRST_PAGE_ID + 2 * i;
        let content_id = page_id + 1;

        write_object(
            &mut buf,
            &mut offsets,
            page_id,
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {FONT_ID} 0 R >> >> /Contents {content_id} 0 R >>",
                page_width as u32, page_height as u32
            )
            .as_bytes(),
        );

        let stream = content_stream(lines);
        let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        body.extend_from_slice(&stream);
        body.extend_from_slice(b"\nendstream");
        write_object(&mut buf, &mut offsets, content_id, &body);
    }

    if let (Some(id), Some(date)) = (info_id, options.creation_date) {
        write_object(
            &mut buf,
            &mut offsets,
            id,
            format!(
                "<< /Producer (cvrender) /CreationDate (D:{}Z) >>",
                date.format("%Y%m%d%H%M%S")
            )
            .as_bytes(),
        );
    }

    // Cross-reference table: one entry per object plus the free head.
    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }

    let trailer = match info_id {
        Some(id) => format!(
            "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R /Info {id} 0 R >>\n",
            object_count + 1
        ),
        None => format!(
            "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\n",
            object_count + 1
        ),
    };
    buf.extend_from_slice(trailer.as_bytes());
    buf.extend_from_slice(format!("startxref\n{xref_offset}\n%%EOF").as_bytes());
    buf
}

/// Append one indirect object, recording its exact starting offset.
fn write_object(buf: &mut Vec<u8>, offsets: &mut Vec<usize>, id: u32, body: &[u8]) {
    offsets.push(buf.len());
    buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    buf.extend_from_slice(body);
    buf.extend_from_slice(b"\nendobj\n");
}

/// Positioned-text drawing operations for one page.
fn content_stream(lines: &[Line]) -> Vec<u8> {
    let mut stream = String::new();
    for line in lines {
        if line.text.is_empty() {
            continue;
        }
        stream.push_str(&format!(
            "BT /F1 {} Tf {} {:.2} Td ({}) Tj ET\n",
            line.kind.point_size(),
            MARGIN_PT,
            line.y,
            escape_pdf_text(&line.text)
        ));
    }
    stream.into_bytes()
}

/// Escape text for a PDF literal string.
///
/// Backslash and parentheses are escaped; characters outside the
/// printable ASCII range become `?` since the built-in Helvetica is
/// referenced without an embedded font program.
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            ' '..='~' => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}
