// src/export/pdf.rs — Session history as a paginated PDF
//
// Plain A4 pages, Courier 10pt with the standard WinAnsi encoding, so every
// character must fit in Latin-1. Anything outside it is rejected, not
// silently replaced.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::core::types::InteractionRecord;
use crate::infra::errors::AgentError;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 12;
/// Courier glyphs are 0.6em wide.
const CHARS_PER_LINE: usize = ((PAGE_WIDTH - 2 * MARGIN) * 10 / (FONT_SIZE * 6)) as usize;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;
const TAB: &str = "    ";

/// Lay out the history as text lines: three blocks per record, then a blank line.
pub fn document_lines(history: &[InteractionRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    for record in history {
        push_block(&mut lines, &format!("Prompt: {}", record.prompt));
        push_block(&mut lines, &format!("Language: {}", record.language));
        push_block(&mut lines, &format!("Code:\n{}", record.response));
        lines.push(String::new());
    }
    lines
}

fn push_block(lines: &mut Vec<String>, text: &str) {
    for raw in text.split('\n') {
        let line = raw.trim_end_matches('\r').replace('\t', TAB);
        lines.extend(wrap(&line, CHARS_PER_LINE));
    }
}

/// Hard-wrap on character count; an empty line stays one empty line.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Encode one line for a WinAnsi-encoded standard font.
///
/// Only printable Latin-1 passes (plus tab). Controls, and C1 codes that
/// WinAnsi would draw as different glyphs, are rejected.
fn encode_latin1(line: &str) -> Result<Vec<u8>, AgentError> {
    line.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if b == b'\t' || (0x20..0x7F).contains(&b) || b >= 0xA0 => Ok(b),
            _ => Err(AgentError::Export(format!(
                "character {:?} (U+{:04X}) cannot be written to the PDF",
                c,
                u32::from(c)
            ))),
        })
        .collect()
}

fn page_content(lines: &[String]) -> Result<Vec<u8>, AgentError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Integer(LEADING)]),
        Operation::new(
            "Td",
            vec![
                Object::Integer(MARGIN),
                Object::Integer(PAGE_HEIGHT - MARGIN),
            ],
        ),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_latin1(line)?)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));
    Ok(Content { operations }.encode()?)
}

/// Serialize the history into PDF bytes. An empty history yields one blank page.
pub fn render(history: &[InteractionRecord]) -> Result<Vec<u8>, AgentError> {
    let lines = document_lines(history);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let blank: &[String] = &[];
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![blank]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(chunk)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
        "Count" => Object::Integer(page_ids.len() as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    tracing::debug!(
        "Rendered PDF: {} record(s), {} page(s), {} bytes",
        history.len(),
        page_ids.len(),
        bytes.len()
    );
    Ok(bytes)
}
