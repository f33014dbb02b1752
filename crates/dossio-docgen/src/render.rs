// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PDF rendering of layout instructions.
//!
//! Consumes the pure [`Block`] list top-down with a cursor, inserting
//! automatic page breaks when a block would not fit above the footer zone.
//! A4 pages, 50 pt margins, builtin Helvetica — no external font files.

use chrono::Utc;
use dossio_core::format::format_datetime;
use dossio_core::DossioError;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use crate::layout::{Block, SignatureBox};

const A4_WIDTH: f32 = 210.0;
const A4_HEIGHT: f32 = 297.0;
/// 50 pt expressed in millimetres.
const MARGIN: f32 = 17.6;
const USABLE: f32 = A4_WIDTH - 2.0 * MARGIN;
/// Text below this line would collide with the footer.
const FLOOR: f32 = MARGIN + 8.0;
const PT_TO_MM: f32 = 0.352_778;
const SIGNATURE_BOX_HEIGHT: f32 = 40.0;

/// Render blocks into PDF bytes.
pub fn render_pdf(title: &str, blocks: &[Block]) -> Result<Vec<u8>, DossioError> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(A4_WIDTH), Mm(A4_HEIGHT), "page 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DossioError::Render(format!("police indisponible: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DossioError::Render(format!("police indisponible: {e}")))?;

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: A4_HEIGHT - MARGIN,
            regular: &regular,
            bold: &bold,
            pages: 1,
            footer: format!("Document généré le {}", format_datetime(Utc::now())),
        };
        writer.draw_footer();
        for block in blocks {
            writer.render_block(block);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| DossioError::Render(format!("écriture du PDF: {e}")))
}

/// Estimated rendered width of a text run, in millimetres.
///
/// Helvetica averages about half an em per glyph; close enough for
/// wrapping and centering without embedding font metrics.
fn est_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

fn line_height(size: f32) -> f32 {
    size * 1.45 * PT_TO_MM
}

/// Greedy word wrap against the estimated glyph width.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if est_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Cursor, millimetres from the page bottom.
    y: f32,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    pages: usize,
    footer: String,
}

impl PageWriter<'_> {
    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self
            .doc
            .add_page(Mm(A4_WIDTH), Mm(A4_HEIGHT), format!("page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = A4_HEIGHT - MARGIN;
        self.draw_footer();
    }

    fn draw_footer(&self) {
        self.layer
            .use_text(self.footer.clone(), 8.0, Mm(MARGIN), Mm(10.0), self.regular);
    }

    /// Break to a new page unless `height` fits above the footer zone.
    fn ensure(&mut self, height: f32) {
        if self.y - height < FLOOR {
            self.new_page();
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { self.bold } else { self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn rect(&self, x: f32, top: f32, width: f32, height: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top - height)), false),
                (Point::new(Mm(x), Mm(top - height)), false),
            ],
            is_closed: true,
        };
        self.layer.set_outline_thickness(0.6);
        self.layer.add_line(line);
    }

    fn horizontal_rule(&self, width: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(MARGIN + width), Mm(self.y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(line);
    }

    fn render_block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => {
                let size = 16.0;
                self.ensure(line_height(size) + 4.0);
                self.y -= line_height(size);
                let x = (MARGIN + (USABLE - est_width(text, size)) / 2.0).max(MARGIN);
                self.text_at(text, size, x, true);
                self.y -= 4.0;
            }
            Block::Heading(text) => {
                let size = 12.0;
                self.y -= 2.0;
                self.ensure(line_height(size) + 2.0);
                self.y -= line_height(size);
                self.text_at(text, size, MARGIN, true);
                self.y -= 1.5;
            }
            Block::Paragraph(text) => {
                let size = 10.5;
                for line in wrap(text, size, USABLE) {
                    self.ensure(line_height(size));
                    self.y -= line_height(size);
                    self.text_at(&line, size, MARGIN, false);
                }
                self.y -= 1.0;
            }
            Block::KeyValue { label, value } => {
                let size = 10.5;
                self.ensure(line_height(size));
                self.y -= line_height(size);
                let label_text = format!("{label} : ");
                self.text_at(&label_text, size, MARGIN, true);
                self.text_at(value, size, MARGIN + est_width(&label_text, size), false);
            }
            Block::Table { headers, rows } => self.render_table(headers, rows),
            Block::CheckboxLine { checked, label } => {
                let size = 10.5;
                self.ensure(6.0);
                self.y -= 6.0;
                let box_side = 4.0;
                self.rect(MARGIN, self.y + box_side + 0.5, box_side, box_side);
                if *checked {
                    self.layer.use_text(
                        "X",
                        size,
                        Mm(MARGIN + 1.0),
                        Mm(self.y + 1.2),
                        self.bold,
                    );
                }
                self.text_at(label, size, MARGIN + box_side + 3.0, false);
            }
            Block::SignatureRow(boxes) => self.render_signatures(boxes),
            Block::Spacer(mm) => {
                self.y -= *mm;
                if self.y < FLOOR {
                    self.new_page();
                }
            }
            Block::PageBreak => self.new_page(),
        }
    }

    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let size = 10.0;
        let n = headers.len().max(1);
        // The first column gets double weight when the table is wide.
        let widths: Vec<f32> = if n >= 3 {
            let unit = USABLE / (n as f32 + 1.0);
            std::iter::once(2.0 * unit)
                .chain(std::iter::repeat(unit).take(n - 1))
                .collect()
        } else {
            vec![USABLE / n as f32; n]
        };

        self.ensure(line_height(size) + 2.0);
        self.y -= line_height(size);
        let mut x = MARGIN;
        for (header, width) in headers.iter().zip(&widths) {
            self.text_at(header, size, x, true);
            x += width;
        }
        self.y -= 1.0;
        self.horizontal_rule(USABLE);

        for row in rows {
            // Row height follows the tallest wrapped cell.
            let wrapped: Vec<Vec<String>> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| wrap(cell, size, width - 2.0))
                .collect();
            let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            let row_height = row_lines as f32 * line_height(size) + 1.0;
            self.ensure(row_height);

            let top = self.y;
            let mut x = MARGIN;
            for (lines, width) in wrapped.iter().zip(&widths) {
                let mut cell_y = top;
                for line in lines {
                    cell_y -= line_height(size);
                    self.layer
                        .use_text(line.clone(), size, Mm(x), Mm(cell_y), self.regular);
                }
                x += width;
            }
            self.y = top - row_height;
        }
        self.y -= 1.0;
    }

    fn render_signatures(&mut self, boxes: &[SignatureBox]) {
        if boxes.is_empty() {
            return;
        }
        let size = 10.0;
        let gap = 6.0;
        let n = boxes.len() as f32;
        let width = (USABLE - gap * (n - 1.0)) / n;

        self.ensure(SIGNATURE_BOX_HEIGHT + 2.0);
        let top = self.y;
        let mut x = MARGIN;
        for b in boxes {
            self.rect(x, top, width, SIGNATURE_BOX_HEIGHT);
            self.layer
                .use_text(b.titre.clone(), size, Mm(x + 2.5), Mm(top - 6.0), self.bold);
            self.layer.use_text(
                format!("Nom : {}", b.nom),
                size,
                Mm(x + 2.5),
                Mm(top - 12.0),
                self.regular,
            );
            self.layer.use_text(
                b.mention.clone(),
                size,
                Mm(x + 2.5),
                Mm(top - 19.0),
                self.regular,
            );
            x += width + gap;
        }
        self.y = top - SIGNATURE_BOX_HEIGHT - 2.0;
    }
}
