use egui::Pos2;

use crate::document::Document;
use crate::error::CanvasError;
use crate::stroke::ActiveStroke;
use crate::tools::ToolSettings;

/// Turns pointer gestures into painted strokes.
///
/// Painting happens incrementally on every move; the history entry is only
/// recorded when the gesture ends.
#[derive(Debug, Default)]
pub struct DrawStrokeTool {
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<ActiveStroke>,
}

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    pub fn on_pointer_down(&mut self, pos: Pos2, settings: &ToolSettings, document: &mut Document) {
        let style = settings
            .stroke_style(document.canvas().background())
            .scaled(document.pixels_per_point());
        document.canvas_mut().paint_dot(pos, style);
        self.current_stroke = Some(ActiveStroke::new(style, pos));
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, document: &mut Document) {
        let Some(stroke) = &mut self.current_stroke else {
            return;
        };
        if let Some((from, to)) = stroke.extend(pos) {
            document.canvas_mut().paint_segment(from, to, stroke.style());
        }
    }

    /// Finishes the stroke and records it. Returns false if no stroke was active.
    pub fn on_pointer_up(&mut self, document: &mut Document) -> Result<bool, CanvasError> {
        let Some(stroke) = self.current_stroke.take() else {
            return Ok(false);
        };
        log::debug!("Stroke finished with {} points", stroke.points().len());
        document.commit()?;
        Ok(true)
    }

    /// Drops an in-progress stroke without recording it
    pub fn cancel(&mut self) {
        self.current_stroke = None;
    }
}
