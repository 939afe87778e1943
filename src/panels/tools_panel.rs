use egui::Slider;

use crate::MathBoardApp;
use crate::components::ToolButton;
use crate::tools::{BRUSH_WIDTH_RANGE, ToolKind};

pub fn tools_panel(app: &mut MathBoardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_enabled_ui(app.notice().is_none(), |ui| {
            ui.horizontal(|ui| {
                for tool in [ToolKind::Pen, ToolKind::Eraser] {
                    let selected = app.settings().tool == tool;
                    if ToolButton::new(tool, selected).show(ui).clicked() && !selected {
                        log::info!("Tool selected from UI: {}", tool.name());
                        app.settings_mut().tool = tool;
                    }
                }
                ui.separator();

                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.settings_mut().color,
                    egui::color_picker::Alpha::Opaque,
                );

                ui.label("Brush Size:");
                ui.add(Slider::new(&mut app.settings_mut().width, BRUSH_WIDTH_RANGE).step_by(1.0));
                ui.separator();

                if ui
                    .add_enabled(app.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    app.undo();
                }
                if ui
                    .add_enabled(app.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    app.redo();
                }
                if ui.button("🗑 Clear").clicked() {
                    app.clear();
                }
                if ui.button("Reset").clicked() {
                    app.reset();
                }
                if ui.button("Calculate").clicked() {
                    app.calculate(ctx);
                }
                if app.is_calculating() {
                    ui.spinner();
                }
            });
        });
    });
}
