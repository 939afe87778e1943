use egui::{Color32, Pos2};

/// Environment variable that overrides [`ServiceConfig::base_url`] on native builds.
pub const SERVICE_URL_ENV: &str = "MATHBOARD_SERVICE_URL";

/// Where the analysis service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub upload_path: String,
    pub calculate_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://backend-ai-nsep-git-main-nandiniraygithubs-projects.vercel.app"
                .to_owned(),
            upload_path: "/Image".to_owned(),
            calculate_path: "/calculate".to_owned(),
        }
    }
}

impl ServiceConfig {
    /// Default configuration with the base URL taken from the environment, if set.
    pub fn from_env() -> Self {
        #[allow(unused_mut)]
        let mut config = Self::default();
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            if !url.trim().is_empty() {
                log::info!("Using analysis service from {}: {}", SERVICE_URL_ENV, url);
                config.base_url = url;
            }
        }
        config
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    pub fn calculate_url(&self) -> String {
        join_url(&self.base_url, &self.calculate_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Drawing surface appearance, including how analysis results are laid out.
/// Sizes are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub background: Color32,
    pub text_color: Color32,
    pub font_size: f32,
    /// Left edge and first baseline of the result text
    pub text_origin: Pos2,
    pub line_height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            text_color: Color32::BLACK,
            font_size: 20.0,
            text_origin: Pos2::new(20.0, 50.0),
            line_height: 30.0,
        }
    }
}

impl CanvasConfig {
    /// Text metrics converted to physical pixels
    pub fn scaled(&self, pixels_per_point: f32) -> Self {
        Self {
            font_size: self.font_size * pixels_per_point,
            text_origin: Pos2::new(
                self.text_origin.x * pixels_per_point,
                self.text_origin.y * pixels_per_point,
            ),
            line_height: self.line_height * pixels_per_point,
            ..self.clone()
        }
    }
}
