//! End-to-end tests of the HTTP surface against a scripted provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tower::ServiceExt;

use ipp_domain::config::Config;
use ipp_domain::error::{Error, Result};
use ipp_gateway::api;
use ipp_gateway::bootstrap;
use ipp_gateway::state::AppState;
use ipp_media::{DocumentExtractor, SpeechToText, TextToSpeech};
use ipp_providers::{CredentialRing, GenerateRequest, LlmProvider};

struct CountingProvider {
    calls: AtomicUsize,
    fail_with: Option<&'static str>,
}

#[async_trait::async_trait]
impl LlmProvider for CountingProvider {
    async fn generate(&self, _req: &GenerateRequest, _api_key: &str) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.fail_with {
            Some(msg) => Err(Error::Provider {
                provider: "fake".into(),
                message: msg.into(),
            }),
            None => Ok(format!("question {n}")),
        }
    }

    fn provider_id(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

struct FixedStt;

#[async_trait::async_trait]
impl SpeechToText for FixedStt {
    async fn transcribe(&self, audio: Vec<u8>, _filename: &str) -> String {
        format!("heard {} bytes", audio.len())
    }
}

struct StubTts;

#[async_trait::async_trait]
impl TextToSpeech for StubTts {
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        (text != "fail").then(|| b"ID3fake".to_vec())
    }
}

struct Harness {
    app: Router,
    provider: Arc<CountingProvider>,
}

fn harness_with(max_questions: u32, fail_with: Option<&'static str>, token: Option<&str>) -> Harness {
    let mut config = Config::default();
    config.interview.max_questions = max_questions;
    let config = Arc::new(config);

    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        fail_with,
    });
    let ring = Arc::new(CredentialRing::new(vec!["k1".into(), "k2".into()]));
    let interviewer = Arc::new(bootstrap::build_interviewer(&config, provider.clone(), ring));

    let state = AppState {
        config,
        interviewer,
        resume: Arc::new(DocumentExtractor),
        stt: Arc::new(FixedStt),
        tts: Arc::new(StubTts),
        api_token_hash: token.map(|t| Sha256::digest(t.as_bytes()).to_vec()),
    };
    let app = api::router(state.clone()).with_state(state);
    Harness { app, provider }
}

fn harness() -> Harness {
    harness_with(15, None, None)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn start(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/start_session",
            json!({"role": "Backend Developer", "experience_level": "Junior"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["session_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn root_reports_ok() {
    let h = harness();
    let (status, body) = send(&h.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_session_returns_id_and_greeting() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        post_json("/start_session", json!({"role": "Backend Developer"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["initial_message"], "question 1");

    let id = body["session_id"].as_str().unwrap();
    let (_, snapshot) = send(&h.app, get(&format!("/sessions/{id}"))).await;
    assert_eq!(snapshot["experience_level"], "Junior");
    assert_eq!(snapshot["phase"], "active");
    assert_eq!(snapshot["history"][0]["role"], "model");
}

#[tokio::test]
async fn empty_role_is_bad_request() {
    let h = harness();
    let (status, body) = send(&h.app, post_json("/start_session", json!({"role": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_on_unknown_session_is_not_found() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        post_json("/chat", json!({"session_id": "nope", "user_message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");
}

#[tokio::test]
async fn chat_runs_to_the_limit_then_refuses() {
    let h = harness_with(2, None, None);
    let id = start(&h.app).await;

    let chat = |msg: &str| post_json("/chat", json!({"session_id": id, "user_message": msg}));

    let (_, first) = send(&h.app, chat("I have built several REST services in Go")).await;
    assert_eq!(first["is_interview_over"], false);
    assert_eq!(first["agent_message"], "question 2");

    let (_, second) = send(&h.app, chat("Mostly around payments and billing systems")).await;
    assert_eq!(second["is_interview_over"], true);
    assert!(second["agent_message"]
        .as_str()
        .unwrap()
        .starts_with("Thank you for your time today."));

    let calls = h.provider.calls.load(Ordering::SeqCst);
    let (_, third) = send(&h.app, chat("anything else?")).await;
    assert_eq!(third["is_interview_over"], true);
    assert_eq!(
        third["agent_message"],
        "The interview is already over. Please request feedback."
    );
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), calls);

    let (status, fb) = send(&h.app, post_json("/feedback", json!({"session_id": id}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fb["feedback"]["spoken_feedback"].is_string());
}

#[tokio::test]
async fn provider_failure_becomes_apology_not_error() {
    let h = harness_with(15, Some("connection reset"), None);
    let (status, body) = send(
        &h.app,
        post_json("/start_session", json!({"role": "Data Analyst"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["initial_message"],
        ipp_providers::gateway::CONNECTION_APOLOGY
    );
}

#[tokio::test]
async fn rate_limited_on_every_key_returns_exhaustion_message() {
    let h = harness_with(15, Some("429 quota exceeded"), None);
    let (_, body) = send(
        &h.app,
        post_json("/start_session", json!({"role": "Data Analyst"})),
    )
    .await;
    assert_eq!(
        body["initial_message"],
        ipp_providers::gateway::EXHAUSTED_APOLOGY
    );
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn feedback_on_unknown_session_is_not_found() {
    let h = harness();
    let (status, _) = send(&h.app, post_json("/feedback", json!({"session_id": "nope"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let h = harness();
    let id = start(&h.app).await;

    let (_, list) = send(&h.app, get("/sessions")).await;
    assert_eq!(list["count"], 1);

    let del = Request::builder()
        .method("DELETE")
        .uri(format!("/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&h.app, del).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&h.app, get(&format!("/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "ippboundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_of_unsupported_file_explains_formats() {
    let h = harness();
    let (status, body) = send(&h.app, multipart("/upload_resume", "cv.txt", b"plain text")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resume_text"], ipp_media::UNSUPPORTED_FORMAT);
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let h = harness();
    let req = Request::builder()
        .method("POST")
        .uri("/upload_resume")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
        .body(Body::from("--x--\r\n"))
        .unwrap();
    let (status, _) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transcribe_returns_text() {
    let h = harness();
    let (status, body) = send(&h.app, multipart("/transcribe", "a.webm", b"12345")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "heard 5 bytes");
}

#[tokio::test]
async fn speak_returns_audio_or_no_content() {
    let h = harness();
    let resp = h
        .app
        .clone()
        .oneshot(post_json("/speak", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "audio/mpeg");

    let (status, _) = send(&h.app, post_json("/speak", json!({"text": "fail"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn bearer_token_guards_protected_routes() {
    let h = harness_with(15, None, Some("s3cret"));

    let (status, _) = send(&h.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&h.app, get("/sessions")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid or missing API token");

    let authed = Request::builder()
        .uri("/sessions")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&h.app, authed).await;
    assert_eq!(status, StatusCode::OK);
}
