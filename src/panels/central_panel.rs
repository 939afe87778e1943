use crate::MathBoardApp;

pub fn central_panel(app: &mut MathBoardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Create a painting area that fills the remaining space
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.sync_canvas(canvas_rect, ctx.pixels_per_point());

            // A notice blocks drawing until it is dismissed
            if app.notice().is_none() {
                app.handle_response(&response);
            }

            app.render(ctx, &painter, canvas_rect);
        });
}
