//! Text run extraction with end-of-line hints.
//!
//! Walks a page's content stream with a reduced PDF text-state machine and
//! turns every text-showing operator into a positioned run. Runs keep
//! content-stream order; a run ends a line when the next run sits on a
//! different baseline.
//!
//! ```text
//! content ops  ->  PositionedRun[]  ->  TextRun[]
//!                  extract_page_spans   mark_line_ends
//! ```

use pdfreflow_core::assemble::TextRun;

use super::backend::{Operand, Operation, PageId, PdfBackend};
use super::text::clean_run_text;
use crate::PdfError;

/// Runs whose baselines differ by no more than this share a line.
const Y_TOLERANCE: f32 = 1.0;

/// Approximate glyph advance as a fraction of the font size. Glyph widths are
/// not read, so horizontal positions are estimates.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// A `TJ` kerning gap wider than this fraction of a glyph becomes a space.
const KERNING_SPACE_RATIO: f32 = 0.3;

/// The identity 2x3 text matrix: [a, b, c, d, tx, ty].
const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// A run of decoded text and where it starts on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_size: f32,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn x(&self) -> f32 {
        self.text_matrix[4]
    }

    fn y(&self) -> f32 {
        self.text_matrix[5]
    }

    fn glyph_width(&self) -> f32 {
        self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale
    }

    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Move past `text` as if it had been painted.
    fn advance_after_show(&mut self, text: &str) {
        let dx: f32 = text
            .chars()
            .map(|ch| {
                let spacing = if ch == ' ' { self.word_spacing } else { 0.0 };
                self.glyph_width() + self.char_spacing + spacing
            })
            .sum();
        self.advance_x(dx);
    }

    /// Translate the line matrix (`Td`) and restart the text matrix from it.
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let m = self.line_matrix;
        self.line_matrix[4] = m[0] * tx + m[2] * ty + m[4];
        self.line_matrix[5] = m[1] * tx + m[3] * ty + m[5];
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    fn set_font(&mut self, operands: &[Operand]) {
        let [name, size, ..] = operands else {
            return;
        };
        let key = match name {
            Operand::Name(n) | Operand::Str(n) => n.clone(),
            _ => return,
        };
        self.font_key = key;
        self.font_size = size.as_number().unwrap_or(0.0);
    }

    fn set_matrix(&mut self, operands: &[Operand]) {
        let values: Vec<f32> = operands
            .iter()
            .take(6)
            .filter_map(Operand::as_number)
            .collect();
        if let Ok(matrix) = <[f32; 6]>::try_from(values) {
            self.text_matrix = matrix;
            self.line_matrix = matrix;
        }
    }
}

/// Accumulates runs for one page while the state machine runs.
struct RunCollector<'a> {
    backend: &'a dyn PdfBackend,
    page: PageId,
    state: TextState,
    runs: Vec<PositionedRun>,
}

impl RunCollector<'_> {
    fn decode(&self, operand: &Operand) -> String {
        match operand {
            Operand::Str(bytes) => {
                clean_run_text(&self.backend.decode_text(self.page, &self.state.font_key, bytes))
            }
            _ => String::new(),
        }
    }

    /// `Tj`, `'` and `"`: one run per string operand.
    fn show(&mut self, operand: &Operand) {
        let text = self.decode(operand);
        if text.is_empty() {
            return;
        }
        self.runs.push(PositionedRun {
            text: text.clone(),
            x: self.state.x(),
            y: self.state.y(),
        });
        self.state.advance_after_show(&text);
    }

    /// `TJ`: strings interleaved with kerning offsets in thousandths of a
    /// text-space unit. Wide gaps read as word breaks.
    fn show_array(&mut self, elements: &[Operand]) {
        let mut buf = String::new();
        let mut x = self.state.x();
        let y = self.state.y();

        for element in elements {
            match element {
                Operand::Str(_) => {
                    let fragment = self.decode(element);
                    if buf.is_empty() {
                        x = self.state.x();
                    }
                    buf.push_str(&fragment);
                    self.state.advance_after_show(&fragment);
                }
                other => {
                    let Some(adjustment) = other.as_number() else {
                        continue;
                    };
                    let dx = -adjustment / 1000.0 * self.state.font_size * self.state.horiz_scale;
                    if dx > self.state.glyph_width() * KERNING_SPACE_RATIO && !buf.is_empty() {
                        buf.push(' ');
                    }
                    self.state.advance_x(dx);
                }
            }
        }

        let text = buf.trim_end();
        if !text.is_empty() {
            self.runs.push(PositionedRun {
                text: text.to_string(),
                x,
                y,
            });
        }
    }

    fn apply(&mut self, op: &Operation) {
        match op.operator.as_str() {
            "BT" => {
                self.state.text_matrix = IDENTITY_MATRIX;
                self.state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => self.state.set_font(&op.operands),
            "Tm" => self.state.set_matrix(&op.operands),
            "Td" | "TD" => {
                let [tx, ty, ..] = op.operands.as_slice() else {
                    return;
                };
                let tx = tx.as_number().unwrap_or(0.0);
                let ty = ty.as_number().unwrap_or(0.0);
                if op.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.state.translate_line(tx, ty);
            }
            "T*" => self.state.next_line(),
            "TL" => {
                if let Some(v) = op.number() {
                    self.state.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = op.number() {
                    self.state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = op.number() {
                    self.state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = op.number() {
                    self.state.horiz_scale = v / 100.0;
                }
            }
            "Tj" => {
                if let Some(first) = op.operands.first() {
                    self.show(first);
                }
            }
            "TJ" => {
                if let Some(Operand::Array(elements)) = op.operands.first() {
                    self.show_array(elements);
                }
            }
            "'" => {
                self.state.next_line();
                if let Some(first) = op.operands.first() {
                    self.show(first);
                }
            }
            "\"" => {
                let [aw, ac, string, ..] = op.operands.as_slice() else {
                    return;
                };
                if let Some(aw) = aw.as_number() {
                    self.state.word_spacing = aw;
                }
                if let Some(ac) = ac.as_number() {
                    self.state.char_spacing = ac;
                }
                self.state.next_line();
                self.show(string);
            }
            _ => {}
        }
    }
}

/// Walk one page's content stream and collect its runs in stream order.
///
/// Handles `BT`, `Tf`, `Tm`, `Td`, `TD`, `T*`, `TL`, `Tc`, `Tw`, `Tz`, `Tj`,
/// `TJ`, `'` and `"`; every other operator is ignored.
pub fn extract_page_spans(
    backend: &dyn PdfBackend,
    page: PageId,
) -> Result<Vec<PositionedRun>, PdfError> {
    let ops = backend.page_operations(page)?;

    let mut collector = RunCollector {
        backend,
        page,
        state: TextState::default(),
        runs: Vec::new(),
    };
    for op in &ops {
        collector.apply(op);
    }

    Ok(collector.runs)
}

/// Convert positioned runs into [`TextRun`]s with end-of-line hints.
///
/// Whitespace-only runs are dropped first so they cannot swallow a line
/// break. The last run of a page always ends a line.
pub fn mark_line_ends(spans: Vec<PositionedRun>) -> Vec<TextRun> {
    let mut spans = spans
        .into_iter()
        .filter(|s| !s.text.trim().is_empty())
        .peekable();

    let mut runs = Vec::new();
    while let Some(span) = spans.next() {
        let end_of_line = spans
            .peek()
            .is_none_or(|next| (next.y - span.y).abs() > Y_TOLERANCE);
        runs.push(TextRun::new(span.text, end_of_line));
    }

    runs
}

/// Extract the text runs of one page.
pub fn extract_page_runs(backend: &dyn PdfBackend, page: PageId) -> Result<Vec<TextRun>, PdfError> {
    Ok(mark_line_ends(extract_page_spans(backend, page)?))
}
