//! Page layout of the equipment report.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of a
//! US Letter page. A cursor `y` walks down the page one row pitch per asset;
//! a new page starts before any block whose row would begin below
//! [`PAGE_BREAK_Y`], so a block is never split.

use super::{
    qr::{self, QrMatrix},
    ReportError, ReportHeading,
};
use crate::models::Equipment;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const MARGIN_X: f32 = 50.0;
const RULE_END_X: f32 = 550.0;
const TEXT_X: f32 = 120.0;
const STATUS_X: f32 = 450.0;
const HEADER_Y: f32 = 750.0;
const SUBTITLE_Y: f32 = 735.0;
const HEADER_RULE_Y: f32 = 725.0;
const CONTINUATION_RULE_Y: f32 = 740.0;

/// Cursor of the first asset row on the first page
pub const FIRST_ROW_Y: f32 = 660.0;
/// Cursor of the first asset row on continuation pages
pub const CONTINUATION_ROW_Y: f32 = 700.0;
/// A row starting below this line goes to the next page
pub const PAGE_BREAK_Y: f32 = 100.0;
pub const ROW_PITCH: f32 = 80.0;

/// Side of the QR image on the page
pub const CODE_SIZE: f32 = 50.0;
/// Pixels per QR module and quiet zone width in modules
pub const QR_BOX_SIZE: usize = 5;
pub const QR_BORDER: usize = 1;

const NO_NOTE: &str = "Sin obs";
const NOT_SET: &str = "N/D";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Black,
    Gray,
    LightGray,
    /// Faulty status
    Alert,
    /// Any other status
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        tint: Tint,
        text: String,
    },
    /// Horizontal rule from `x1` to `x2`
    Rule { x1: f32, x2: f32, y: f32, tint: Tint },
    /// QR symbol, bottom-left corner at (x, y)
    Code { x: f32, y: f32, size: f32, matrix: QrMatrix },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
    /// Cursor value at which each asset block on this page starts
    pub rows: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub heading: ReportHeading,
    pub pages: Vec<Page>,
}

impl ReportLayout {
    pub fn record_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// All text elements, in paint order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Tint)> {
        self.pages.iter().flat_map(|p| &p.elements).filter_map(|e| match e {
            Element::Text { text, tint, .. } => Some((text.as_str(), *tint)),
            _ => None,
        })
    }
}

/// How many rows fit on a page whose first row starts at `start_y`
pub fn rows_per_page(start_y: f32) -> usize {
    ((start_y - PAGE_BREAK_Y) / ROW_PITCH).floor() as usize + 1
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

fn text(x: f32, y: f32, font: Font, size: f32, tint: Tint, text: impl Into<String>) -> Element {
    Element::Text {
        x,
        y,
        font,
        size,
        tint,
        text: text.into(),
    }
}

impl Page {
    fn first(heading: &ReportHeading) -> Self {
        let mut page = Page::default();
        page.elements.push(text(MARGIN_X, HEADER_Y, Font::Bold, 18.0, Tint::Black, &heading.title));
        page.elements.push(text(MARGIN_X, SUBTITLE_Y, Font::Regular, 12.0, Tint::Black, &heading.subtitle));
        page.elements.push(Element::Rule {
            x1: MARGIN_X,
            x2: RULE_END_X,
            y: HEADER_RULE_Y,
            tint: Tint::Black,
        });
        page
    }

    fn continuation(heading: &ReportHeading) -> Self {
        let mut page = Page::default();
        page.elements.push(text(
            MARGIN_X,
            HEADER_Y,
            Font::Bold,
            10.0,
            Tint::Black,
            format!("Continuación: {}", heading.title),
        ));
        page.elements.push(Element::Rule {
            x1: MARGIN_X,
            x2: RULE_END_X,
            y: CONTINUATION_RULE_Y,
            tint: Tint::Black,
        });
        page
    }

    fn push_record(&mut self, item: &Equipment, y: f32) -> Result<(), ReportError> {
        self.rows.push(y);

        self.elements.push(Element::Code {
            x: MARGIN_X,
            y,
            size: CODE_SIZE,
            matrix: QrMatrix::encode(&qr::payload(item))?,
        });

        self.elements.push(text(
            TEXT_X,
            y + 35.0,
            Font::Bold,
            12.0,
            Tint::Black,
            or_placeholder(Some(item.nombre.as_str()), NOT_SET),
        ));
        self.elements.push(text(
            TEXT_X,
            y + 20.0,
            Font::Regular,
            10.0,
            Tint::Black,
            format!(
                "Tipo: {} | Serial: {}",
                or_placeholder(Some(item.tipo.as_str()), NOT_SET),
                or_placeholder(Some(item.serial.as_str()), NOT_SET)
            ),
        ));
        self.elements.push(text(
            TEXT_X,
            y + 5.0,
            Font::Regular,
            10.0,
            Tint::Black,
            format!("Ubicación: {}", or_placeholder(Some(item.ubicacion.as_str()), NOT_SET)),
        ));
        self.elements.push(text(
            TEXT_X,
            y - 8.0,
            Font::Oblique,
            9.0,
            Tint::Gray,
            format!("Obs: {}", or_placeholder(item.observaciones.as_deref(), NO_NOTE)),
        ));

        let status_tint = if item.estado.is_faulty() {
            Tint::Alert
        } else {
            Tint::Confirm
        };
        self.elements.push(text(
            STATUS_X,
            y + 35.0,
            Font::Bold,
            10.0,
            status_tint,
            item.estado.as_str(),
        ));

        self.elements.push(Element::Rule {
            x1: MARGIN_X,
            x2: RULE_END_X,
            y: y - 15.0,
            tint: Tint::LightGray,
        });
        Ok(())
    }
}

/// Lay out `items` in the given order under `heading`
pub fn build(heading: &ReportHeading, items: &[Equipment]) -> Result<ReportLayout, ReportError> {
    let mut pages = Vec::new();
    let mut page = Page::first(heading);
    let mut y = FIRST_ROW_Y;

    for item in items {
        if y < PAGE_BREAK_Y {
            pages.push(std::mem::replace(&mut page, Page::continuation(heading)));
            y = CONTINUATION_ROW_Y;
        }
        page.push_record(item, y)?;
        y -= ROW_PITCH;
    }
    pages.push(page);

    Ok(ReportLayout {
        heading: heading.clone(),
        pages,
    })
}
