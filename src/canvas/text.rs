use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::config::CanvasConfig;
use crate::error::CanvasError;

fn load_font() -> Result<FontRef<'static>, CanvasError> {
    FontRef::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT)
        .map_err(|err| CanvasError::Font(err.to_string()))
}

/// Rasterizes `lines` into `pixels`; `config.text_origin.y` is the first baseline.
pub(super) fn draw_lines(
    pixels: &mut RgbaImage,
    lines: &[String],
    config: &CanvasConfig,
) -> Result<(), CanvasError> {
    let font = load_font()?;
    let scale = PxScale::from(config.font_size);
    let scaled = font.as_scaled(scale);
    let [r, g, b, _] = config.text_color.to_srgba_unmultiplied();

    let mut baseline = config.text_origin.y;
    for line in lines {
        let mut caret = config.text_origin.x;
        let mut previous: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= pixels.width() as i64 || y >= pixels.height() as i64 {
                    return;
                }
                let pixel = pixels.get_pixel_mut(x as u32, y as u32);
                blend(pixel, [r, g, b], coverage.clamp(0.0, 1.0));
            });
        }
        baseline += config.line_height;
    }
    Ok(())
}

fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    for (channel, src) in pixel.0.iter_mut().zip(color) {
        let mixed = src as f32 * coverage + *channel as f32 * (1.0 - coverage);
        *channel = mixed.round() as u8;
    }
    pixel.0[3] = 255;
}
