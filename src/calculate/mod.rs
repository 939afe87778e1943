//! The remote "calculate" action: ship the canvas to the analysis service and
//! turn its answer into lines of text.

pub mod api;
mod client;

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

pub use api::AnalysisEntry;
pub use client::{Analysis, AnalysisClient, EhttpTransport, HttpResponse, Transport};

use crate::config::ServiceConfig;
use crate::error::CalculateError;

pub type CalculateResult = Result<Analysis, CalculateError>;

/// Lines to draw for a list of results: an `Expression:` and a `Result:` line
/// per entry, entries separated by a blank line.
pub fn result_lines(entries: &[AnalysisEntry]) -> Vec<String> {
    let text = entries
        .iter()
        .map(|entry| format!("Expression: {}\nResult: {}", entry.expr, entry.result))
        .collect::<Vec<_>>()
        .join("\n\n");
    text.split('\n').map(str::to_owned).collect()
}

/// Handle to a calculation running off the UI loop.
///
/// Nothing stops several of these from being in flight at once; each one is
/// applied when it finishes.
#[derive(Clone)]
pub struct PendingCalculation {
    id: Uuid,
    slot: Arc<Mutex<Option<CalculateResult>>>,
}

impl PendingCalculation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts the exchange for `data_url` and requests a repaint once done
    pub fn spawn(config: ServiceConfig, data_url: String, ctx: egui::Context) -> Self {
        let pending = Self::new();
        log::info!("[{}] Sending canvas image to {}", pending.id, config.upload_url());

        let handle = pending.clone();

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(run_exchange(config, data_url, handle, ctx));

        #[cfg(not(target_arch = "wasm32"))]
        {
            // The exchange future is not Send, so it is created on the worker thread
            let spawned = std::thread::Builder::new()
                .name(format!("calculate-{}", pending.id))
                .spawn(move || {
                    futures::executor::block_on(run_exchange(config, data_url, handle, ctx));
                });
            if let Err(err) = spawned {
                pending.resolve(Err(CalculateError::Transport {
                    url: String::new(),
                    reason: format!("could not start request thread: {err}"),
                }));
            }
        }

        pending
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn resolve(&self, outcome: CalculateResult) {
        *self.slot.lock() = Some(outcome);
    }

    /// Takes the outcome if the exchange has finished
    pub fn poll(&self) -> Option<CalculateResult> {
        self.slot.lock().take()
    }
}

async fn run_exchange(
    config: ServiceConfig,
    data_url: String,
    pending: PendingCalculation,
    ctx: egui::Context,
) {
    let client = AnalysisClient::new(config);
    let outcome = client.calculate(&data_url).await;
    pending.resolve(outcome);
    ctx.request_repaint();
}

impl Default for PendingCalculation {
    fn default() -> Self {
        Self::new()
    }
}
