//! PDF serialization of a report layout

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};

use super::{
    layout::{Element, Font, ReportLayout, Tint, PAGE_HEIGHT, PAGE_WIDTH, QR_BORDER, QR_BOX_SIZE},
    ReportError,
};

const DOCUMENT_TITLE: &str = "Reporte de Mantenimiento";
const RULE_THICKNESS: f32 = 0.5;

/// Layout units are points
fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn color(tint: Tint) -> Color {
    let (r, g, b) = match tint {
        Tint::Black => (0.0, 0.0, 0.0),
        Tint::Gray => (0.5, 0.5, 0.5),
        Tint::LightGray => (0.83, 0.83, 0.83),
        Tint::Alert => (1.0, 0.0, 0.0),
        Tint::Confirm => (0.0, 0.5, 0.0),
    };
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ReportError> {
        let add = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            oblique: add(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Oblique => &self.oblique,
        }
    }
}

fn paint_element(layer: &PdfLayerReference, fonts: &Fonts, element: &Element) {
    match element {
        Element::Text {
            x,
            y,
            font,
            size,
            tint,
            text,
        } => {
            layer.set_fill_color(color(*tint));
            layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*font));
            if *tint != Tint::Black {
                layer.set_fill_color(color(Tint::Black));
            }
        }
        Element::Rule { x1, x2, y, tint } => {
            layer.set_outline_color(color(*tint));
            layer.set_outline_thickness(RULE_THICKNESS);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(*x1), mm(*y)), false),
                    (Point::new(mm(*x2), mm(*y)), false),
                ],
                is_closed: false,
            });
            layer.set_outline_color(color(Tint::Black));
        }
        Element::Code { x, y, size, matrix } => {
            let (side, pixels) = matrix.to_luma(QR_BOX_SIZE, QR_BORDER);
            let image = Image::from(ImageXObject {
                width: Px(side),
                height: Px(side),
                color_space: ColorSpace::Greyscale,
                bits_per_component: ColorBits::Bit8,
                interpolate: false,
                image_data: pixels,
                image_filter: None,
                smask: None,
                clipping_bbox: None,
            });
            // Scale the bitmap so it spans `size` points
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(*x)),
                    translate_y: Some(mm(*y)),
                    dpi: Some(side as f32 * 72.0 / *size),
                    ..Default::default()
                },
            );
        }
    }
}

/// Paint every page of `layout` into a PDF document
pub fn paint(layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Capa 1");
    let fonts = Fonts::load(&doc)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), format!("Capa {}", index + 1));
            doc.get_page(page_index).get_layer(layer_index)
        };
        for element in &page.elements {
            paint_element(&layer, &fonts, element);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
}
