use egui::{Color32, Pos2};

/// Paint parameters for one stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    color: Color32,
    width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width: width.max(1.0),
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Same style with the width multiplied by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.color, self.width * factor)
    }
}

// In-progress stroke: the points gathered between pointer down and up
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    points: Vec<Pos2>,
    style: StrokeStyle,
}

impl ActiveStroke {
    /// Start a stroke at `start`
    pub fn new(style: StrokeStyle, start: Pos2) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    /// Add a point and return the segment that now needs painting
    pub fn extend(&mut self, point: Pos2) -> Option<(Pos2, Pos2)> {
        let last = *self.points.last()?;
        if last == point {
            return None;
        }
        self.points.push(point);
        Some((last, point))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}
