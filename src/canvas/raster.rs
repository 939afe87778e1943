use egui::{Pos2, Vec2};
use image::{Rgba, RgbaImage};

/// Fills every pixel whose center lies within `radius` of the segment `a..b`.
///
/// A zero-length segment gives a disc, so consecutive capsules of one stroke
/// produce round caps and joins. No anti-aliasing: pixels are either painted
/// or untouched.
pub(super) fn fill_capsule(pixels: &mut RgbaImage, a: Pos2, b: Pos2, radius: f32, color: Rgba<u8>) {
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 || radius <= 0.0 {
        return;
    }

    let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x) + radius).ceil().min(width as f32 - 1.0);
    let max_y = (a.y.max(b.y) + radius).ceil().min(height as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);

    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if distance_sq_to_segment(center, a, b) <= radius_sq {
                pixels.put_pixel(x, y, color);
            }
        }
    }
}

fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab: Vec2 = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return (p - a).length_sq();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length_sq()
}
