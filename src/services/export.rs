//! Consultation-code PDF export
//!
//! Renders a code set into an A4 portrait table: styled header band,
//! alternating row shading, paginated. The admin UI downloads the result
//! as `consultation-codes-<date>.pdf`.

use chrono::Utc;
use printpdf::{
    path::PaintMode, BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
    Rect, Rgb,
};

use crate::{
    error::{AppError, AppResult},
    models::consultation_code::ConsultationCode,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const HEADER_BAND_HEIGHT: f32 = 8.0;
const ROW_HEIGHT: f32 = 7.0;
const BOTTOM_LIMIT: f32 = 20.0;

struct Column {
    label: &'static str,
    x: f32,
    clip: usize,
}

/// Full export layout, Created By included
const FULL_COLUMNS: &[Column] = &[
    Column { label: "Code", x: 17.0, clip: 18 },
    Column { label: "Status", x: 57.0, clip: 9 },
    Column { label: "Description", x: 79.0, clip: 25 },
    Column { label: "Usage", x: 131.0, clip: 9 },
    Column { label: "Expires", x: 151.0, clip: 10 },
    Column { label: "Created By", x: 174.0, clip: 10 },
];

/// Freshly-created batch layout, Created By dropped
const BATCH_COLUMNS: &[Column] = &[
    Column { label: "Code", x: 17.0, clip: 20 },
    Column { label: "Status", x: 62.0, clip: 9 },
    Column { label: "Description", x: 84.0, clip: 30 },
    Column { label: "Usage", x: 146.0, clip: 9 },
    Column { label: "Expires", x: 168.0, clip: 12 },
];

/// Render a code set into PDF bytes. `new_batch` switches to the
/// freshly-bulk-created variant.
pub fn render_codes_pdf(codes: &[ConsultationCode], new_batch: bool) -> AppResult<Vec<u8>> {
    let title = if new_batch {
        "New Consultation Codes"
    } else {
        "Consultation Codes"
    };
    let columns = if new_batch { BATCH_COLUMNS } else { FULL_COLUMNS };

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.set_fill_color(text_color());
    layer.use_text(title, 16.0, Mm(MARGIN), Mm(PAGE_HEIGHT - 20.0), &bold);
    layer.set_fill_color(muted_color());
    layer.use_text(
        format!("Generated {} ({} codes)", Utc::now().format("%Y-%m-%d"), codes.len()),
        9.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 27.0),
        &font,
    );

    // y tracks the bottom edge of the header band, then row baselines
    let mut y = PAGE_HEIGHT - 38.0;
    draw_header(&layer, &bold, columns, y);
    y -= 5.0;

    for (i, code) in codes.iter().enumerate() {
        if y < BOTTOM_LIMIT {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - 25.0;
            draw_header(&layer, &bold, columns, y);
            y -= 5.0;
        }

        if i % 2 == 1 {
            layer.set_fill_color(shade_color());
            layer.add_rect(
                Rect::new(
                    Mm(MARGIN),
                    Mm(y - 2.0),
                    Mm(PAGE_WIDTH - MARGIN),
                    Mm(y + ROW_HEIGHT - 2.0),
                )
                .with_mode(PaintMode::Fill),
            );
        }

        let mut values = vec![
            code.code.clone(),
            code.status.clone(),
            code.description.clone().unwrap_or_else(|| "-".to_string()),
            usage_label(code),
            expires_label(code),
        ];
        if !new_batch {
            values.push(code.created_by.clone());
        }

        layer.set_fill_color(text_color());
        for (column, value) in columns.iter().zip(values.iter()) {
            layer.use_text(clip(value, column.clip), 9.0, Mm(column.x), Mm(y), &font);
        }

        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_header(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    columns: &[Column],
    band_bottom: f32,
) {
    layer.set_fill_color(band_color());
    layer.add_rect(
        Rect::new(
            Mm(MARGIN),
            Mm(band_bottom),
            Mm(PAGE_WIDTH - MARGIN),
            Mm(band_bottom + HEADER_BAND_HEIGHT),
        )
        .with_mode(PaintMode::Fill),
    );

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    for column in columns {
        layer.use_text(column.label, 9.0, Mm(column.x), Mm(band_bottom + 2.5), bold);
    }
}

fn band_color() -> Color {
    Color::Rgb(Rgb::new(0.13, 0.37, 0.31, None))
}

fn shade_color() -> Color {
    Color::Rgb(Rgb::new(0.94, 0.96, 0.95, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None))
}

fn muted_color() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None))
}

fn usage_label(code: &ConsultationCode) -> String {
    match code.max_uses {
        Some(cap) => format!("{}/{}", code.used_count, cap),
        None => format!("{}/-", code.used_count),
    }
}

fn expires_label(code: &ConsultationCode) -> String {
    code.expires_at
        .map(|e| e.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn pdf_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Internal(format!("PDF generation failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(i: i32) -> ConsultationCode {
        ConsultationCode {
            id: i,
            code: format!("OT-{:04}", i),
            status: "active".to_string(),
            description: Some("Spring campaign".to_string()),
            max_uses: Some(5),
            used_count: 2,
            expires_at: Some(Utc::now() + Duration::days(30)),
            created_by: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let codes: Vec<_> = (1..=3).map(sample).collect();
        let bytes = render_codes_pdf(&codes, false).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_render_paginates_large_sets() {
        let codes: Vec<_> = (1..=120).map(sample).collect();
        let bytes = render_codes_pdf(&codes, true).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
        // Two pages carry more content than one
        let single = render_codes_pdf(&codes[..3], true).expect("render");
        assert!(bytes.len() > single.len());
    }

    #[test]
    fn test_clip_keeps_short_text_and_truncates_long() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long description", 10), "a very ...");
    }
}
