use futures::FutureExt as _;
use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{
    AnalysisEntry, CalculateRequest, CalculateResponse, RawEntry, UploadRequest, UploadResponse,
};
use crate::config::ServiceConfig;
use crate::error::CalculateError;

/// What came back from an HTTP POST
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status in the 200-299 range
    pub ok: bool,
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

/// Sends JSON bodies somewhere. Errors are transport failures only; non-OK
/// statuses are reported through [`HttpResponse::ok`].
pub trait Transport {
    fn post_json(&self, url: String, body: Vec<u8>) -> LocalBoxFuture<'static, Result<HttpResponse, String>>;
}

/// [`Transport`] backed by `ehttp` (browser `fetch` on the web, a worker thread natively)
#[derive(Debug, Clone, Copy, Default)]
pub struct EhttpTransport;

impl Transport for EhttpTransport {
    fn post_json(&self, url: String, body: Vec<u8>) -> LocalBoxFuture<'static, Result<HttpResponse, String>> {
        let request = ehttp::Request {
            headers: ehttp::Headers::new(&[
                ("Accept", "*/*"),
                ("Content-Type", "application/json"),
            ]),
            ..ehttp::Request::post(url, body)
        };
        async move {
            let response = ehttp::fetch_async(request).await?;
            Ok(HttpResponse {
                ok: response.ok,
                status: response.status,
                status_text: response.status_text,
                body: response.bytes,
            })
        }
        .boxed_local()
    }
}

/// Outcome of a successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Results(Vec<AnalysisEntry>),
    /// The service answered, but with nothing usable
    NoResult,
}

/// Drives the upload + analyze exchange against the analysis service
pub struct AnalysisClient<T> {
    config: ServiceConfig,
    transport: T,
}

impl AnalysisClient<EhttpTransport> {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_transport(config, EhttpTransport)
    }
}

impl<T: Transport> AnalysisClient<T> {
    pub fn with_transport(config: ServiceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Uploads `data_url` and asks for its analysis. The two calls run strictly
    /// one after the other.
    pub async fn calculate(&self, data_url: &str) -> Result<Analysis, CalculateError> {
        let image_id = self.upload(data_url).await?;
        log::info!("Image stored with id {}", image_id);
        self.analyze(&image_id).await
    }

    /// First call: store the image, get its id back
    pub async fn upload(&self, data_url: &str) -> Result<String, CalculateError> {
        let url = self.config.upload_url();
        let response = self.post(&url, &UploadRequest::new(data_url)).await?;
        if !response.ok {
            return Err(CalculateError::UploadStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }
        let upload: UploadResponse = parse_body(&url, &response.body)?;
        Ok(upload.image_id)
    }

    /// Second call: analyze a stored image
    pub async fn analyze(&self, image_id: &str) -> Result<Analysis, CalculateError> {
        let url = self.config.calculate_url();
        let response = self.post(&url, &CalculateRequest { image_id }).await?;
        if !response.ok {
            return Err(CalculateError::CalculateStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }
        let analysis: CalculateResponse = parse_body(&url, &response.body)?;
        Ok(interpret_result(analysis.result))
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<HttpResponse, CalculateError> {
        let body = serde_json::to_vec(body).map_err(CalculateError::RequestBody)?;
        log::debug!("POST {} ({} bytes)", url, body.len());
        self.transport
            .post_json(url.to_owned(), body)
            .await
            .map_err(|reason| CalculateError::Transport {
                url: url.to_owned(),
                reason,
            })
    }
}

fn parse_body<R: DeserializeOwned>(url: &str, body: &[u8]) -> Result<R, CalculateError> {
    serde_json::from_slice(body).map_err(|source| CalculateError::MalformedResponse {
        url: url.to_owned(),
        source,
    })
}

fn interpret_result(result: serde_json::Value) -> Analysis {
    if !result.is_array() {
        log::warn!("Analysis result is not a list: {}", result);
        return Analysis::NoResult;
    }
    match serde_json::from_value::<Vec<RawEntry>>(result) {
        Ok(entries) if entries.is_empty() => Analysis::NoResult,
        Ok(entries) => Analysis::Results(entries.into_iter().map(AnalysisEntry::from).collect()),
        Err(err) => {
            log::warn!("Analysis result entries are malformed: {}", err);
            Analysis::NoResult
        }
    }
}
