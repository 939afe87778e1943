//! JSON bodies exchanged with the analysis service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of the upload call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest<'a> {
    /// `data:image/png;base64,...`
    pub image: &'a str,
    /// Always sent, always empty
    pub dict_of_vars: BTreeMap<String, serde_json::Value>,
}

impl<'a> UploadRequest<'a> {
    pub fn new(image: &'a str) -> Self {
        Self {
            image,
            dict_of_vars: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_id: String,
}

/// Body of the analysis call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest<'a> {
    pub image_id: &'a str,
}

/// `result` is kept loose: anything other than a list of entries counts as
/// "no result" rather than a protocol error.
#[derive(Debug, Deserialize)]
pub struct CalculateResponse {
    #[serde(default)]
    pub result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    pub expr: serde_json::Value,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// One recognized expression and its evaluated result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisEntry {
    pub expr: String,
    pub result: String,
}

impl AnalysisEntry {
    pub fn new(expr: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            result: result.into(),
        }
    }
}

impl From<RawEntry> for AnalysisEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            expr: value_text(raw.expr),
            result: value_text(raw.result),
        }
    }
}

// Services sometimes answer with numbers or booleans where text is expected
fn value_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
