//! Test fixtures shared by the adapter and pipeline tests.

use std::collections::{BTreeMap, BTreeSet};

use lopdf::{dictionary, Object, Stream};

use crate::parser::backend::{decode_pdf_string, Operand, Operation, PageId, PdfBackend};
use crate::PdfError;

/// A mock engine serving pre-decoded operations per page.
pub struct MockBackend {
    pages: BTreeMap<PageId, Vec<Operation>>,
    failing: BTreeSet<PageId>,
}

impl MockBackend {
    /// Page `n` (1-based) gets the id `(n, 0)`.
    pub fn with_pages(pages: Vec<Vec<Operation>>) -> Self {
        MockBackend {
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(i, ops)| ((i as u32 + 1, 0), ops))
                .collect(),
            failing: BTreeSet::new(),
        }
    }

    pub fn single_page(ops: Vec<Operation>) -> Self {
        Self::with_pages(vec![ops])
    }

    pub fn failing_on(mut self, page: PageId) -> Self {
        self.failing.insert(page);
        self
    }
}

impl PdfBackend for MockBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.pages.keys().map(|&id| (id.0, id)).collect()
    }

    fn page_operations(&self, page: PageId) -> Result<Vec<Operation>, PdfError> {
        if self.failing.contains(&page) {
            return Err(PdfError::Parse(format!("mock failure on page {}", page.0)));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    fn decode_text(&self, _page: PageId, _font_key: &[u8], bytes: &[u8]) -> String {
        decode_pdf_string(bytes)
    }
}

pub fn op(operator: &str, operands: Vec<Operand>) -> Operation {
    Operation::new(operator, operands)
}

pub fn bt() -> Operation {
    op("BT", vec![])
}

pub fn et() -> Operation {
    op("ET", vec![])
}

pub fn tf(font: &[u8], size: f32) -> Operation {
    op("Tf", vec![Operand::Name(font.to_vec()), Operand::Number(size)])
}

/// Unscaled text matrix positioned at `(x, y)`.
pub fn tm(x: f32, y: f32) -> Operation {
    let matrix = [1.0, 0.0, 0.0, 1.0, x, y];
    op("Tm", matrix.into_iter().map(Operand::Number).collect())
}

pub fn tj(text: &[u8]) -> Operation {
    op("Tj", vec![Operand::Str(text.to_vec())])
}

pub fn tj_array(elements: Vec<Operand>) -> Operation {
    op("TJ", vec![Operand::Array(elements)])
}

/// One page worth of operations with each line on its own baseline.
pub fn lines_page(lines: &[&str]) -> Vec<Operation> {
    let mut ops = vec![bt(), tf(b"F1", 12.0)];
    for (i, line) in lines.iter().enumerate() {
        ops.push(tm(72.0, 720.0 - 14.0 * i as f32));
        ops.push(tj(line.as_bytes()));
    }
    ops.push(et());
    ops
}

/// Build a real PDF with one Helvetica text line per entry on each page.
///
/// Lines must not contain unbalanced parentheses or backslashes.
pub fn pdf_with_pages(pages: &[&[&str]], title: Option<&str>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut content = String::from("BT /F1 12 Tf 72 720 Td");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                content.push_str(" 0 -14 Td");
            }
            content.push_str(&format!(" ({line}) Tj"));
        }
        content.push_str(" ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    });

    for &pid in &page_ids {
        if let Ok(dict) = doc.get_object_mut(pid).and_then(Object::as_dict_mut) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal("pdfreflow tests"),
        });
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
