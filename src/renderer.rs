// src/renderer.rs
use eframe::egui::{self, Color32, Rect, TextureHandle, TextureOptions};

use crate::document::Document;

/// Keeps an egui texture in sync with the document's pixel buffer
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the canvas has been uploaded at least once
    pub fn is_initialized(&self) -> bool {
        self.texture.is_some()
    }

    pub fn uploaded_version(&self) -> Option<u64> {
        self.uploaded_version
    }

    /// Re-uploads the pixels if they changed since the last frame, then
    /// paints them over `rect`
    ///
    /// Args:
    ///     ctx (egui::Context): The egui context for the current frame
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen area of the canvas
    ///     document (Document): Source of the pixels
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        document: &Document,
    ) {
        if self.uploaded_version != Some(document.version()) || self.texture.is_none() {
            let image = document.canvas().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_version = Some(document.version());
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}
