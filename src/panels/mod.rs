mod central_panel;
mod notice_window;
mod tools_panel;

pub use central_panel::central_panel;
pub use notice_window::notice_window;
pub use tools_panel::tools_panel;
