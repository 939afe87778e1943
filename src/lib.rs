#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod calculate;
pub mod canvas;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod notice;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod tools;

pub use app::MathBoardApp;
pub use calculate::{Analysis, AnalysisClient, AnalysisEntry};
pub use canvas::Canvas;
pub use config::{CanvasConfig, ServiceConfig};
pub use document::Document;
pub use error::{CalculateError, CanvasError};
pub use history::{Snapshot, SnapshotHistory};
pub use input::{InputEvent, InputLocation};
pub use notice::Notice;
pub use renderer::Renderer;
pub use stroke::StrokeStyle;
pub use tools::{DrawStrokeTool, ToolKind, ToolSettings};
