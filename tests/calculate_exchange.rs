use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt as _;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use image::Rgba;
use mathboard::calculate::{HttpResponse, Transport, result_lines};
use mathboard::{
    Analysis, AnalysisClient, AnalysisEntry, CalculateError, CanvasConfig, Document,
    ServiceConfig, StrokeStyle,
};

/// One recorded POST
#[derive(Debug, Clone)]
struct SentRequest {
    url: String,
    body: serde_json::Value,
}

/// Replies with queued responses in order and remembers what was sent
#[derive(Clone, Default)]
struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, String>>>>,
    sent: Rc<RefCell<Vec<SentRequest>>>,
}

impl ScriptedTransport {
    fn reply_json(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            ok: (200..300).contains(&status),
            status,
            status_text: String::new(),
            body: serde_json::to_vec(&body).unwrap(),
        }));
        self
    }

    fn reply_raw(self, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            ok: true,
            status: 200,
            status_text: "OK".to_owned(),
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    fn fail(self, reason: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(reason.to_owned()));
        self
    }

    fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&self, url: String, body: Vec<u8>) -> LocalBoxFuture<'static, Result<HttpResponse, String>> {
        self.sent.borrow_mut().push(SentRequest {
            url,
            body: serde_json::from_slice(&body).unwrap(),
        });
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".to_owned()));
        async move { reply }.boxed_local()
    }
}

fn test_config() -> ServiceConfig {
    ServiceConfig {
        base_url: "http://analysis.test".to_owned(),
        upload_path: "/image".to_owned(),
        calculate_path: "/calculate".to_owned(),
    }
}

fn drawn_document() -> Document {
    let mut document = Document::new(400, 300, CanvasConfig::default()).unwrap();
    document.canvas_mut().paint_segment(
        egui::pos2(320.0, 120.0),
        egui::pos2(390.0, 120.0),
        StrokeStyle::new(egui::Color32::BLUE, 6.0),
    );
    document.commit().unwrap();
    document
}

fn inked_rows(document: &Document, rows: std::ops::Range<u32>) -> bool {
    let canvas = document.canvas();
    let white = Rgba([255, 255, 255, 255]);
    rows.into_iter()
        .any(|y| (0..canvas.width()).any(|x| *canvas.pixels().get_pixel(x, y) != white))
}

#[test]
fn test_exchange_sends_upload_then_calculate() {
    let transport = ScriptedTransport::default()
        .reply_json(200, serde_json::json!({ "imageId": "img-7" }))
        .reply_json(
            200,
            serde_json::json!({ "result": [{ "expr": "3*4", "result": "12" }] }),
        );
    let client = AnalysisClient::with_transport(test_config(), transport.clone());
    let document = drawn_document();
    let data_url = document.canvas().to_data_url().unwrap();

    let analysis = block_on(client.calculate(&data_url)).unwrap();
    assert_eq!(analysis, Analysis::Results(vec![AnalysisEntry::new("3*4", "12")]));

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].url, "http://analysis.test/image");
    assert_eq!(sent[0].body["image"], serde_json::json!(data_url));
    assert_eq!(sent[0].body["dictOfVars"], serde_json::json!({}));
    assert_eq!(sent[1].url, "http://analysis.test/calculate");
    assert_eq!(sent[1].body, serde_json::json!({ "imageId": "img-7" }));
}

#[test]
fn test_results_render_as_ordered_lines() {
    let entries = vec![
        AnalysisEntry::new("1+2", "3"),
        AnalysisEntry::new("10/5", "2"),
        AnalysisEntry::new("y = 2x, x = 4", "y = 8"),
    ];
    let transport = ScriptedTransport::default()
        .reply_json(200, serde_json::json!({ "imageId": "abc" }))
        .reply_json(
            200,
            serde_json::json!({ "result": [
                { "expr": "1+2", "result": "3" },
                { "expr": "10/5", "result": "2" },
                { "expr": "y = 2x, x = 4", "result": "y = 8" },
            ] }),
        );
    let client = AnalysisClient::with_transport(test_config(), transport);
    let mut document = drawn_document();
    let data_url = document.canvas().to_data_url().unwrap();

    let Analysis::Results(received) = block_on(client.calculate(&data_url)).unwrap() else {
        panic!("expected results");
    };
    assert_eq!(received, entries);

    let lines = result_lines(&received);
    assert_eq!(
        lines,
        vec![
            "Expression: 1+2",
            "Result: 3",
            "",
            "Expression: 10/5",
            "Result: 2",
            "",
            "Expression: y = 2x, x = 4",
            "Result: y = 8",
        ]
    );

    assert!(!document.history().can_redo());
    document.show_text(&lines).unwrap();
    assert_eq!(document.history().len(), 1);
    assert!(!document.history().can_redo());

    // Previous drawing replaced by text near the top-left
    let canvas = document.canvas();
    assert_eq!(canvas.pixel(350, 120), Some(egui::Color32::WHITE));

    // One baseline every 30 px from y = 50; blank lines keep their slot
    let baselines = [50, 80, 140, 170, 230, 260];
    for baseline in baselines {
        assert!(
            inked_rows(&document, baseline - 16..baseline + 1),
            "no text above baseline {baseline}"
        );
    }
    assert!(!inked_rows(&document, 86..119), "first blank line has ink");
    assert!(!inked_rows(&document, 176..209), "second blank line has ink");
    assert!(!inked_rows(&document, 272..300), "ink below the last line");
}

#[test]
fn test_upload_failure_status_is_reported() {
    let transport = ScriptedTransport::default().reply_json(503, serde_json::json!({}));
    let client = AnalysisClient::with_transport(test_config(), transport.clone());
    let document = drawn_document();
    let before = document.canvas().pixels().clone();

    let err = block_on(client.calculate(&document.canvas().to_data_url().unwrap())).unwrap_err();
    assert!(matches!(err, CalculateError::UploadStatus { status: 503, .. }));
    // The analysis call is never made
    assert_eq!(transport.sent().len(), 1);
    assert_eq!(document.canvas().pixels(), &before);
    assert_eq!(document.history().len(), 1);
}

#[test]
fn test_calculate_failure_status_is_reported() {
    let transport = ScriptedTransport::default()
        .reply_json(200, serde_json::json!({ "imageId": "abc" }))
        .reply_json(500, serde_json::json!({ "detail": "boom" }));
    let client = AnalysisClient::with_transport(test_config(), transport);

    let err = block_on(client.calculate("data:image/png;base64,AAAA")).unwrap_err();
    assert!(matches!(err, CalculateError::CalculateStatus { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[test]
fn test_transport_failure_is_reported() {
    let transport = ScriptedTransport::default().fail("connection refused");
    let client = AnalysisClient::with_transport(test_config(), transport);

    let err = block_on(client.calculate("data:image/png;base64,AAAA")).unwrap_err();
    match err {
        CalculateError::Transport { url, reason } => {
            assert_eq!(url, "http://analysis.test/image");
            assert_eq!(reason, "connection refused");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_upload_response_is_an_error() {
    let transport = ScriptedTransport::default().reply_raw("<html>not json</html>");
    let client = AnalysisClient::with_transport(test_config(), transport);

    let err = block_on(client.calculate("data:image/png;base64,AAAA")).unwrap_err();
    assert!(matches!(err, CalculateError::MalformedResponse { .. }));
}

#[test]
fn test_empty_or_invalid_result_is_no_result() {
    for body in [
        serde_json::json!({ "result": [] }),
        serde_json::json!({ "result": "nothing found" }),
        serde_json::json!({}),
    ] {
        let transport = ScriptedTransport::default()
            .reply_json(200, serde_json::json!({ "imageId": "abc" }))
            .reply_json(200, body);
        let client = AnalysisClient::with_transport(test_config(), transport);

        let analysis = block_on(client.calculate("data:image/png;base64,AAAA")).unwrap();
        assert_eq!(analysis, Analysis::NoResult);
    }
}
