use crate::MathBoardApp;

pub fn notice_window(app: &mut MathBoardApp, ctx: &egui::Context) {
    let Some(notice) = app.notice() else {
        return;
    };
    let title = notice.title();
    let message = notice.to_string();

    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app.dismiss_notice();
    }
}
