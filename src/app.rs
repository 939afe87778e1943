use egui::Rect;

use crate::calculate::{Analysis, CalculateResult, PendingCalculation, result_lines};
use crate::config::{CanvasConfig, ServiceConfig};
use crate::document::Document;
use crate::input::{InputEvent, InputHandler};
use crate::notice::Notice;
use crate::panels::{central_panel, notice_window, tools_panel};
use crate::renderer::Renderer;
use crate::tools::{DrawStrokeTool, ToolSettings};

pub struct MathBoardApp {
    // Created once the canvas area has a size
    document: Option<Document>,
    renderer: Renderer,
    input: Option<InputHandler>,
    tool: DrawStrokeTool,
    settings: ToolSettings,
    pending: Vec<PendingCalculation>,
    notice: Option<Notice>,
    service: ServiceConfig,
    canvas_config: CanvasConfig,
}

impl Default for MathBoardApp {
    fn default() -> Self {
        Self::with_config(ServiceConfig::default(), CanvasConfig::default())
    }
}

impl MathBoardApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(ServiceConfig::from_env(), CanvasConfig::default())
    }

    pub fn with_config(service: ServiceConfig, canvas_config: CanvasConfig) -> Self {
        Self {
            document: None,
            renderer: Renderer::new(),
            input: None,
            tool: DrawStrokeTool::new(),
            settings: ToolSettings::default(),
            pending: Vec::new(),
            notice: None,
            service,
            canvas_config,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_calculating(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|document| document.history().can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|document| document.history().can_redo())
    }

    fn show_error(&mut self, message: String) {
        log::error!("{}", message);
        self.notice = Some(Notice::Error(message));
    }

    /// Creates or resizes the document to match the on-screen canvas area
    pub fn sync_canvas(&mut self, rect: Rect, pixels_per_point: f32) {
        let width = (rect.width() * pixels_per_point).round() as u32;
        let height = (rect.height() * pixels_per_point).round() as u32;
        if width == 0 || height == 0 {
            return;
        }

        match &mut self.input {
            Some(input) => input.set_canvas_rect(rect, pixels_per_point),
            None => self.input = Some(InputHandler::new(rect, pixels_per_point)),
        }

        let result = match self.document.as_mut() {
            Some(document) => {
                document.set_pixels_per_point(pixels_per_point);
                document.resize(width, height)
            }
            None => match Document::new(width, height, self.canvas_config.clone()) {
                Ok(mut document) => {
                    document.set_pixels_per_point(pixels_per_point);
                    self.document = Some(document);
                    Ok(())
                }
                Err(err) => Err(err),
            },
        };
        if let Err(err) = result {
            self.show_error(format!("Canvas could not be prepared: {err}"));
        }
    }

    /// Reads pointer input from the canvas widget
    pub fn handle_response(&mut self, response: &egui::Response) {
        let events = match &mut self.input {
            Some(input) => input.process_response(response),
            None => return,
        };
        self.handle_input(events);
    }

    pub fn handle_input(&mut self, events: Vec<InputEvent>) {
        let Some(document) = &mut self.document else {
            return;
        };
        for event in events {
            match event {
                InputEvent::PointerDown { location } => {
                    self.tool
                        .on_pointer_down(location.position, &self.settings, document);
                }
                InputEvent::PointerMove { location } => {
                    self.tool.on_pointer_move(location.position, document);
                }
                InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => {
                    if let Err(err) = self.tool.on_pointer_up(document) {
                        log::error!("Failed to record stroke: {}", err);
                        self.notice = Some(Notice::error(format!("Failed to record stroke: {err}")));
                    }
                }
            }
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        if let Some(document) = &self.document {
            self.renderer.render(ctx, painter, rect, document);
        }
    }

    pub fn undo(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        match document.undo() {
            Ok(true) => log::info!("Undo to entry {:?}", document.history().index()),
            Ok(false) => {}
            Err(err) => self.show_error(format!("Undo failed: {err}")),
        }
    }

    pub fn redo(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        match document.redo() {
            Ok(true) => log::info!("Redo to entry {:?}", document.history().index()),
            Ok(false) => {}
            Err(err) => self.show_error(format!("Redo failed: {err}")),
        }
    }

    pub fn clear(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        self.tool.cancel();
        log::info!("Clearing canvas");
        if let Err(err) = document.clear() {
            self.show_error(format!("Clear failed: {err}"));
        }
    }

    pub fn reset(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        self.tool.cancel();
        log::info!("Resetting canvas and history");
        document.reset();
    }

    /// Serializes the canvas and starts the upload + analysis exchange
    pub fn calculate(&mut self, ctx: &egui::Context) {
        let Some(document) = &self.document else {
            self.show_error("Canvas not available. Please try again.".to_owned());
            return;
        };
        match document.canvas().to_data_url() {
            Ok(data_url) => {
                let pending = PendingCalculation::spawn(self.service.clone(), data_url, ctx.clone());
                self.pending.push(pending);
            }
            Err(err) => self.show_error(format!("Could not serialize the canvas: {err}")),
        }
    }

    /// Queues an already-running calculation
    pub fn track_calculation(&mut self, pending: PendingCalculation) {
        self.pending.push(pending);
    }

    /// Applies every calculation that finished since the last frame
    pub fn poll_calculations(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|pending| match pending.poll() {
            Some(outcome) => {
                finished.push((pending.id(), outcome));
                false
            }
            None => true,
        });
        for (id, outcome) in finished {
            log::debug!("[{}] Calculation finished", id);
            self.apply_calculation(outcome);
        }
    }

    pub fn apply_calculation(&mut self, outcome: CalculateResult) {
        match outcome {
            Ok(Analysis::Results(entries)) => {
                log::info!("Analysis returned {} result(s)", entries.len());
                let Some(document) = &mut self.document else {
                    self.show_error("Canvas not available. Please try again.".to_owned());
                    return;
                };
                if let Err(err) = document.show_text(&result_lines(&entries)) {
                    self.show_error(format!("Could not draw the result: {err}"));
                }
            }
            Ok(Analysis::NoResult) => {
                log::warn!("Analysis returned no usable result");
                self.notice = Some(Notice::NoResult);
            }
            Err(err) => {
                self.show_error(format!("Error occurred while calculating: {err}"));
            }
        }
    }
}

impl eframe::App for MathBoardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_calculations();

        tools_panel(self, ctx);
        central_panel(self, ctx);
        notice_window(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::AnalysisEntry;
    use crate::error::CalculateError;
    use crate::input::InputLocation;
    use egui::Pos2;

    fn app_with_canvas() -> MathBoardApp {
        let mut app = MathBoardApp::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(60.0, 40.0));
        app.sync_canvas(rect, 1.0);
        app
    }

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas: true,
        }
    }

    fn stroke(app: &mut MathBoardApp, y: f32) {
        app.handle_input(vec![
            InputEvent::PointerDown { location: at(5.0, y) },
            InputEvent::PointerMove { location: at(50.0, y) },
            InputEvent::PointerUp { location: at(50.0, y) },
        ]);
    }

    #[test]
    fn test_sync_canvas_creates_document() {
        let app = app_with_canvas();
        let document = app.document().unwrap();
        assert_eq!(document.canvas().size(), [60, 40]);
        assert!(document.canvas().is_blank());
    }

    #[test]
    fn test_calculate_without_canvas_raises_notice() {
        let mut app = MathBoardApp::default();
        app.calculate(&egui::Context::default());
        assert!(app.notice().is_some_and(Notice::is_error));
        assert!(!app.is_calculating());
    }

    #[test]
    fn test_undo_redo_buttons_state() {
        let mut app = app_with_canvas();
        assert!(!app.can_undo());
        stroke(&mut app, 10.0);
        stroke(&mut app, 20.0);
        assert!(app.can_undo());
        assert!(!app.can_redo());

        app.undo();
        assert!(!app.can_undo());
        assert!(app.can_redo());
    }

    #[test]
    fn test_leaving_canvas_commits_stroke() {
        let mut app = app_with_canvas();
        app.handle_input(vec![
            InputEvent::PointerDown { location: at(5.0, 5.0) },
            InputEvent::PointerLeave {
                last_known_location: at(70.0, 5.0),
            },
        ]);
        assert_eq!(app.document().unwrap().history().len(), 1);
    }

    #[test]
    fn test_failed_calculation_leaves_canvas_alone() {
        let mut app = app_with_canvas();
        stroke(&mut app, 10.0);
        let before = app.document().unwrap().canvas().pixels().clone();

        let pending = PendingCalculation::new();
        pending.resolve(Err(CalculateError::CalculateStatus {
            status: 500,
            status_text: "Internal Server Error".to_owned(),
        }));
        app.track_calculation(pending);
        app.poll_calculations();

        assert!(app.notice().is_some_and(Notice::is_error));
        assert!(!app.is_calculating());
        let document = app.document().unwrap();
        assert_eq!(document.canvas().pixels(), &before);
        assert_eq!(document.history().len(), 1);
    }

    #[test]
    fn test_empty_result_shows_no_result_notice() {
        let mut app = app_with_canvas();
        app.apply_calculation(Ok(Analysis::NoResult));
        assert_eq!(app.notice(), Some(&Notice::NoResult));

        app.dismiss_notice();
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_successful_result_leaves_history_alone() {
        let mut app = app_with_canvas();
        stroke(&mut app, 10.0);
        stroke(&mut app, 20.0);
        stroke(&mut app, 30.0);
        app.undo();
        assert!(app.can_redo());

        app.apply_calculation(Ok(Analysis::Results(vec![AnalysisEntry::new("1+1", "2")])));

        assert!(app.notice().is_none());
        let document = app.document().unwrap();
        assert_eq!(document.history().len(), 3);
        assert_eq!(document.history().index(), Some(1));
        assert!(app.can_redo());
    }

    #[test]
    fn test_brush_keeps_its_size_on_hidpi() {
        let mut app = MathBoardApp::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(60.0, 40.0));
        app.sync_canvas(rect, 2.0);
        assert_eq!(app.document().unwrap().canvas().size(), [120, 80]);

        app.settings_mut().width = 6.0;
        app.handle_input(vec![
            InputEvent::PointerDown { location: at(10.0, 40.0) },
            InputEvent::PointerMove { location: at(110.0, 40.0) },
            InputEvent::PointerUp { location: at(110.0, 40.0) },
        ]);

        // 6 points wide is 12 physical pixels
        let canvas = app.document().unwrap().canvas();
        let inked = (0..80)
            .filter(|&y| canvas.pixel(60, y) == Some(egui::Color32::BLACK))
            .count();
        assert_eq!(inked, 12);
    }
}
