use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::history::SnapshotHistory;

/// The drawing surface together with its undo/redo history.
pub struct Document {
    canvas: Canvas,
    history: SnapshotHistory,
    config: CanvasConfig,
    /// Physical pixels per logical point; brush and text sizes are given in points
    pixels_per_point: f32,
    /// Bumped on every pixel change so the renderer knows when to re-upload
    version: u64,
}

impl Document {
    /// Background-filled surface with an empty history
    pub fn new(width: u32, height: u32, config: CanvasConfig) -> Result<Self, CanvasError> {
        let canvas = Canvas::new(width, height, config.background)?;
        Ok(Self {
            canvas,
            history: SnapshotHistory::new(),
            config,
            pixels_per_point: 1.0,
            version: 0,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable access for painting; marks the surface as changed
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        self.touch();
        &mut self.canvas
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        if pixels_per_point > 0.0 {
            self.pixels_per_point = pixels_per_point;
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Records the current pixels as a new history entry, dropping any redo tail
    pub fn commit(&mut self) -> Result<(), CanvasError> {
        let snapshot = self.canvas.snapshot()?;
        self.history.push(snapshot);
        Ok(())
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, CanvasError> {
        let Some(snapshot) = self.history.undo() else {
            return Ok(false);
        };
        self.canvas.restore(snapshot)?;
        self.touch();
        Ok(true)
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> Result<bool, CanvasError> {
        let Some(snapshot) = self.history.redo() else {
            return Ok(false);
        };
        self.canvas.restore(snapshot)?;
        self.touch();
        Ok(true)
    }

    /// Paints the background and records it, keeping earlier history
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        self.canvas.fill_background();
        self.touch();
        self.commit()
    }

    /// Back to a blank surface with no history
    pub fn reset(&mut self) {
        self.canvas.fill_background();
        self.history.clear();
        self.touch();
    }

    /// Re-creates the buffer at a new size, stretching the current history
    /// entry into it. Without one the history starts over.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if self.canvas.size() == [width, height] {
            return Ok(());
        }
        let mut canvas = self.canvas.with_size(width, height)?;
        match self.history.current() {
            Some(snapshot) => canvas.restore(snapshot)?,
            None => self.history.clear(),
        }
        log::debug!(
            "Canvas resized from {:?} to {:?}",
            self.canvas.size(),
            canvas.size()
        );
        self.canvas = canvas;
        self.touch();
        Ok(())
    }

    /// Replaces the drawing with `lines` of text. History is left as it is.
    pub fn show_text(&mut self, lines: &[String]) -> Result<(), CanvasError> {
        let layout = self.config.scaled(self.pixels_per_point);
        self.canvas.fill_background();
        self.touch();
        self.canvas.draw_text_lines(lines, &layout)
    }
}
