//! Single-page PDF layout for a simulation report.

use crate::plot::FONT_BYTES;
use printpdf::image_crate::{self, DynamicImage, ImageFormat};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use std::io::Cursor;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE_PT: f32 = 18.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 7.0;
const IMAGE_DPI: f32 = 120.0;
const MM_PER_INCH: f32 = 25.4;

/// Text and image content of one report page.
pub(crate) struct ReportPage<'a> {
    pub title: &'a str,
    pub rows: Vec<(&'static str, String)>,
    pub png: &'a [u8],
}

/// Lays out the title, one `label: value` line per row and the plot image
/// below them, and serializes the document.
pub(crate) fn compose(page: &ReportPage<'_>) -> Result<Vec<u8>, String> {
    let decoded = image_crate::load_from_memory_with_format(page.png, ImageFormat::Png)
        .map_err(|err| format!("plot image cannot be decoded: {err}"))?;
    let pixels = decoded.to_rgb8();
    let image_height_mm = pixels.height() as f32 / IMAGE_DPI * MM_PER_INCH;
    let rgb = DynamicImage::ImageRgb8(pixels);

    let (doc, page_index, layer_index) = PdfDocument::new(
        page.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let layer = doc.get_page(page_index).get_layer(layer_index);
    // Element names and units may fall outside Latin-1.
    let font = doc
        .add_external_font(Cursor::new(FONT_BYTES))
        .map_err(|err| format!("font setup failed: {err:?}"))?;

    let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM;
    layer.use_text(page.title, TITLE_SIZE_PT, Mm(MARGIN_MM), Mm(cursor), &font);
    cursor -= LINE_HEIGHT_MM * 2.0;

    for (label, value) in &page.rows {
        layer.use_text(
            format!("{label}: {value}"),
            BODY_SIZE_PT,
            Mm(MARGIN_MM),
            Mm(cursor),
            &font,
        );
        cursor -= LINE_HEIGHT_MM;
    }

    cursor -= LINE_HEIGHT_MM + image_height_mm;
    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(cursor.max(MARGIN_MM))),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|err| format!("document serialization failed: {err:?}"))
}
