use egui::Color32;

use crate::stroke::StrokeStyle;

mod draw_stroke_tool;
pub use draw_stroke_tool::DrawStrokeTool;

/// Smallest and largest brush width offered by the toolbar
pub const BRUSH_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pen => "🖌",
            Self::Eraser => "⌫",
        }
    }
}

/// Current drawing parameters as chosen in the toolbar
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: Color32,
    pub width: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: Color32::BLACK,
            width: 5.0,
        }
    }
}

impl ToolSettings {
    /// Style for a new stroke. The eraser paints with the background color.
    pub fn stroke_style(&self, background: Color32) -> StrokeStyle {
        let color = match self.tool {
            ToolKind::Pen => self.color,
            ToolKind::Eraser => background,
        };
        let width = self
            .width
            .clamp(*BRUSH_WIDTH_RANGE.start(), *BRUSH_WIDTH_RANGE.end());
        StrokeStyle::new(color, width)
    }
}
