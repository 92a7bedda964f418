use printpdf::image_crate::DynamicImage;
use printpdf::{
    Actions, BorderArray, BuiltinFont, ColorArray, Image, ImageTransform, IndirectFontRef, Line,
    LinkAnnotation, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};

use super::layout::{Area, DocumentLayout, Element, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::ExportError;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Writes a laid-out document to PDF bytes.
pub fn render_pdf(
    layout: &DocumentLayout,
    title: &str,
    logo: Option<&DynamicImage>,
) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}, Layer 1", index + 1),
            );
            doc.get_page(page).get_layer(layer)
        };
        layer.set_outline_thickness(0.2);

        for element in &page.elements {
            draw(&layer, &fonts, element, logo);
        }
    }

    Ok(doc.save_to_bytes()?)
}

/// Converts a top-left based `y` to PDF user space.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), flip(y)), false)
}

fn pdf_rect(area: &Area) -> Rect {
    Rect::new(
        Mm(area.x),
        flip(area.bottom()),
        Mm(area.x + area.width),
        flip(area.y),
    )
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, element: &Element, logo: Option<&DynamicImage>) {
    match element {
        Element::Text {
            text,
            x,
            y,
            size,
            bold,
        } => {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), font);
        }
        Element::CellBorder(area) => {
            layer.add_line(Line {
                points: vec![
                    point(area.x, area.y),
                    point(area.x + area.width, area.y),
                    point(area.x + area.width, area.bottom()),
                    point(area.x, area.bottom()),
                ],
                is_closed: true,
            });
        }
        Element::Logo(area) => {
            if let Some(image) = logo {
                let dpi = image.width().max(1) as f32 * 25.4 / area.width;
                Image::from_dynamic_image(image).add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(area.x)),
                        translate_y: Some(flip(area.bottom())),
                        dpi: Some(dpi),
                        ..Default::default()
                    },
                );
            }
        }
        Element::Link { area, url } => {
            // Zero-width border and no colour keep the region invisible.
            layer.add_link_annotation(LinkAnnotation::new(
                pdf_rect(area),
                Some(BorderArray::Solid([0.0, 0.0, 0.0])),
                Some(ColorArray::Transparent),
                Actions::uri(url.clone()),
                None,
            ));
        }
    }
}
