//! The raster drawing surface.
//!
//! A [`Canvas`] is a plain RGBA8 pixel buffer. Strokes are painted straight
//! into it, and history works on encoded copies of the whole buffer
//! (see [`crate::history::Snapshot`]).

mod raster;
mod text;

use std::io::Cursor;

use base64::Engine as _;
use egui::{Color32, Pos2};
use image::{ImageFormat, Rgba, RgbaImage, imageops::FilterType};

use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::history::Snapshot;
use crate::stroke::StrokeStyle;

pub struct Canvas {
    pixels: RgbaImage,
    background: Color32,
}

impl Canvas {
    /// Creates a canvas of the given size filled with `background`
    pub fn new(width: u32, height: u32, background: Color32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(background)),
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Paints the whole buffer with the background color
    pub fn fill_background(&mut self) {
        let background = to_rgba(self.background);
        for pixel in self.pixels.pixels_mut() {
            *pixel = background;
        }
    }

    /// True if every pixel is the background color
    pub fn is_blank(&self) -> bool {
        let background = to_rgba(self.background);
        self.pixels.pixels().all(|pixel| *pixel == background)
    }

    /// Paints a round dot, the cap of a stroke that has not moved yet
    pub fn paint_dot(&mut self, center: Pos2, style: StrokeStyle) {
        raster::fill_capsule(
            &mut self.pixels,
            center,
            center,
            style.width() / 2.0,
            to_rgba(style.color()),
        );
    }

    /// Paints one stroke segment with round caps
    pub fn paint_segment(&mut self, from: Pos2, to: Pos2, style: StrokeStyle) {
        raster::fill_capsule(
            &mut self.pixels,
            from,
            to,
            style.width() / 2.0,
            to_rgba(style.color()),
        );
    }

    /// Writes `lines` top to bottom using the text layout from `config`
    pub fn draw_text_lines(
        &mut self,
        lines: &[String],
        config: &CanvasConfig,
    ) -> Result<(), CanvasError> {
        text::draw_lines(&mut self.pixels, lines, config)
    }

    /// Encodes the buffer as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(CanvasError::Encode)?;
        Ok(bytes)
    }

    /// `data:image/png;base64,...` form of the buffer
    pub fn to_data_url(&self) -> Result<String, CanvasError> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }

    pub fn snapshot(&self) -> Result<Snapshot, CanvasError> {
        let png = self.encode_png()?;
        log::debug!(
            "Captured {}x{} snapshot ({} bytes)",
            self.width(),
            self.height(),
            png.len()
        );
        Ok(Snapshot::new(png, self.width(), self.height()))
    }

    /// Replaces the buffer content with `snapshot`, stretching it if it was
    /// taken at another size
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        let decoded = image::load_from_memory_with_format(snapshot.png(), ImageFormat::Png)
            .map_err(CanvasError::Decode)?
            .to_rgba8();

        self.pixels = if decoded.dimensions() == self.pixels.dimensions() {
            decoded
        } else {
            image::imageops::resize(&decoded, self.width(), self.height(), FilterType::Triangle)
        };
        Ok(())
    }

    /// Creates a background-only canvas of a new size with the same background
    pub fn with_size(&self, width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::new(width, height, self.background)
    }

    /// Copy for display in egui
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}
