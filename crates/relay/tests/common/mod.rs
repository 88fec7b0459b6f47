//! Shared fixtures for the relay endpoint tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use pipeline::{ChatError, ChatProvider, ChatReply, ChatRequest, StepCatalog};
use relay::{router, RelayState};
use tower::ServiceExt;

/// Chat provider that records every request and answers with a canned result.
pub struct RecordingProvider {
    calls: Mutex<Vec<ChatRequest>>,
    result: Result<ChatReply, ChatError>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            result: Ok(ChatReply::new(text)),
        })
    }

    pub fn failing(err: ChatError) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            result: Err(err),
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        self.calls.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

pub const STEP_DOCUMENT: &str = r#"{
    "steps": [
        { "id": 1, "label": "Ingest", "desc": "Pull **raw** data", "colorIndex": 1 },
        {
            "id": 2,
            "label": "Train",
            "code": "model.fit(x, y)",
            "links": [{ "url": "https://example.org/fit", "text": "Fitting" }],
            "children": [
                { "id": 21, "label": "Tune" },
                { "id": 22, "label": "Validate" }
            ]
        },
        { "id": 3, "label": "Deploy", "children": [] }
    ]
}"#;

pub fn app(provider: Arc<RecordingProvider>) -> Router {
    router(RelayState::new(provider))
}

pub fn app_with_steps(provider: Arc<RecordingProvider>) -> Router {
    let catalog = Arc::new(StepCatalog::from_json(STEP_DOCUMENT).unwrap());
    router(RelayState::new(provider).with_catalog(catalog))
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
