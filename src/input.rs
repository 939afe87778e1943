use egui::{Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in canvas pixels
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events on the drawing surface, already in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button (or touch) went down on the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while held down
    PointerMove { location: InputLocation },
    /// Primary button (or touch) was released
    PointerUp { location: InputLocation },
    /// Pointer left the canvas while held down
    PointerLeave { last_known_location: InputLocation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PressState {
    #[default]
    Released,
    Pressed,
    /// Left the canvas mid-gesture; ignored until the button is released
    Abandoned,
}

/// Handles converting egui pointer input into canvas-space [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    state: PressState,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            state: PressState::Released,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = rect;
        self.pixels_per_point = pixels_per_point;
    }

    /// Converts a screen position (points) to canvas pixels
    pub fn to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        ((screen_pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: self.to_canvas(screen_pos),
            is_in_canvas: self.canvas_rect.contains(screen_pos),
        }
    }

    /// Reads the canvas widget's response for this frame
    pub fn process_response(&mut self, response: &egui::Response) -> Vec<InputEvent> {
        let pos = response.interact_pointer_pos().or_else(|| response.hover_pos());
        self.process(response.is_pointer_button_down_on(), pos)
    }

    /// Core state machine: `down` is whether the primary button is held on the
    /// canvas, `pos` the current pointer position in screen points.
    pub fn process(&mut self, down: bool, pos: Option<Pos2>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pos = pos.or(self.last_pointer_pos);

        match (self.state, down, pos) {
            (PressState::Released, true, Some(pos)) => {
                let location = self.make_location(pos);
                if location.is_in_canvas {
                    events.push(InputEvent::PointerDown { location });
                    self.state = PressState::Pressed;
                } else {
                    self.state = PressState::Abandoned;
                }
            }
            (PressState::Pressed, true, Some(pos)) => {
                let location = self.make_location(pos);
                if !location.is_in_canvas {
                    events.push(InputEvent::PointerLeave {
                        last_known_location: location,
                    });
                    self.state = PressState::Abandoned;
                } else if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { location });
                }
            }
            (PressState::Pressed, false, _) => {
                let location = pos
                    .map(|pos| self.make_location(pos))
                    .unwrap_or(InputLocation {
                        position: Pos2::ZERO,
                        is_in_canvas: false,
                    });
                events.push(InputEvent::PointerUp { location });
                self.state = PressState::Released;
            }
            (PressState::Abandoned, false, _) => {
                self.state = PressState::Released;
            }
            _ => {}
        }

        if pos.is_some() {
            self.last_pointer_pos = pos;
        }
        events
    }
}
