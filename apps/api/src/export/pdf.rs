//! PDF report writer.
//!
//! Fixed layout: US letter, 1" margins, Helvetica / Helvetica-Bold with
//! WinAnsi encoding. Layout (`layout_report`) is separate from serialization
//! (`render_pages`) so placement can be tested without parsing PDF bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::text::strip_emphasis;
use crate::export::wrap::wrap_text;
use crate::export::{DocumentExporter, ExportError, ReportDocument};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const LEADING_FACTOR: f32 = 1.4;

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const NOTE_SIZE: f32 = 9.0;

pub const REPORT_TITLE: &str = "Roast My SaaS Idea: Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }
}

/// One line of text at its final position (PDF user space, origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub face: Face,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

struct Block {
    text: String,
    face: Face,
    size: f32,
    space_before: f32,
}

impl Block {
    fn heading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            face: Face::Bold,
            size: HEADING_SIZE,
            space_before: 14.0,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            face: Face::Regular,
            size: BODY_SIZE,
            space_before: 4.0,
        }
    }

    fn note(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            face: Face::Regular,
            size: NOTE_SIZE,
            space_before: 2.0,
        }
    }
}

fn report_blocks(report: &ReportDocument) -> Vec<Block> {
    let mut blocks = vec![
        Block {
            text: REPORT_TITLE.to_string(),
            face: Face::Bold,
            size: TITLE_SIZE,
            space_before: 0.0,
        },
        Block::note(format!(
            "Generated {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        )),
    ];
    if report.roast.degraded {
        blocks.push(Block::note(
            "Note: the AI service was unavailable, so this roast is a canned one.",
        ));
    }
    blocks.extend([
        Block::heading("The Idea"),
        Block::body(report.idea.as_str()),
        Block::heading("The Brutal Reality"),
        Block::body(report.roast.roast.as_str()),
        Block::heading("Viability Score"),
        Block::body(format!("Score: {}/100", report.roast.score)),
        Block::heading("First Concrete Step"),
        Block::body(report.roast.action.as_str()),
        Block::heading("Execution Plan"),
        Block::body(strip_emphasis(&report.plan.plan_text)),
    ]);
    blocks
}

/// Places every line of the report, breaking pages at the bottom margin.
pub fn layout_report(report: &ReportDocument) -> Vec<Vec<PlacedLine>> {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN;
    let top = PAGE_HEIGHT - MARGIN;

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = top;

    for block in report_blocks(report) {
        let leading = block.size * LEADING_FACTOR;
        if y < top {
            y -= block.space_before;
        }
        for line in wrap_text(&block.text, block.size, block.face == Face::Bold, max_width) {
            if y - leading < MARGIN {
                pages.push(Vec::new());
                y = top;
            }
            y -= leading;
            if line.is_empty() {
                continue;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: line,
                    face: block.face,
                    size: block.size,
                    x: MARGIN,
                    y,
                });
            }
        }
    }
    pages
}

/// Serializes laid-out pages into a PDF file.
pub fn render_pages(pages: &[Vec<PlacedLine>]) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Face::Regular.resource_name() => regular_id,
            Face::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let mut operations = Vec::with_capacity(lines.len() * 5);
        for line in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(line.face.resource_name().as_bytes().to_vec()),
                    Object::Integer(line.size.round() as i64),
                ],
            ));
            operations.push(Operation::new(
                "Td",
                vec![
                    Object::Integer(line.x.round() as i64),
                    Object::Integer(line.y.round() as i64),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&line.text))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(REPORT_TITLE),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// Encodes text for a WinAnsi Type1 font. Unmappable characters become '?'.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2026}' => 0x85, // …
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95, // •
            '\u{2013}' => 0x96, // –
            '\u{2014}' => 0x97, // —
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

pub struct PdfExporter;

impl DocumentExporter for PdfExporter {
    fn is_available(&self) -> bool {
        true
    }

    fn export(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        render_pages(&layout_report(report))
    }
}
