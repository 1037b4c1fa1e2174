#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use intake_api::config::{JiraConfig, ServerConfig};
use intake_api::router::build_app_router;
use intake_api::state::AppState;
use intake_api::tracker::IssueTracker;
use intake_core::issue::IssuePayload;
use intake_jira::{CreatedIssue, JiraError, JiraUser};

pub const ALLOWED_ORIGIN: &str = "https://proposals.example.org";
pub const JIRA_BASE: &str = "https://example.atlassian.net";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origin: ALLOWED_ORIGIN.to_string(),
        request_timeout_secs: 35,
        jira: JiraConfig {
            base_url: JIRA_BASE.to_string(),
            user_email: "bot@example.com".to_string(),
            api_token: "token".to_string(),
            project_key: "RVS".to_string(),
            identity_check: false,
            timeout_secs: 30,
        },
    }
}

/// What the fake tracker answers to a create call.
#[derive(Clone)]
pub enum CreateReply {
    Created { id: String, key: String },
    ApiError { status: u16, body: String },
    Panic,
    /// Never answers within any test deadline.
    Stall,
}

/// Longer than every deadline the tests configure.
pub const STALL: Duration = Duration::from_secs(10);

/// Records every call and answers with a canned reply.
pub struct FakeTracker {
    reply: CreateReply,
    identity_ok: bool,
    identity_stalls: bool,
    pub calls: Mutex<Vec<&'static str>>,
    pub payloads: Mutex<Vec<IssuePayload>>,
}

impl FakeTracker {
    pub fn new(reply: CreateReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            identity_ok: true,
            identity_stalls: false,
            calls: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn created(key: &str) -> Arc<Self> {
        Self::new(CreateReply::Created {
            id: "10001".to_string(),
            key: key.to_string(),
        })
    }

    pub fn failing_identity(reply: CreateReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            identity_ok: false,
            identity_stalls: false,
            calls: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn stalling_identity(reply: CreateReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            identity_ok: true,
            identity_stalls: true,
            calls: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_payload(&self) -> Value {
        let payloads = self.payloads.lock().unwrap();
        serde_json::to_value(payloads.last().expect("no payload recorded")).unwrap()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn current_user(&self) -> Result<JiraUser, JiraError> {
        self.calls.lock().unwrap().push("myself");
        if self.identity_stalls {
            tokio::time::sleep(STALL).await;
        }
        if self.identity_ok {
            Ok(JiraUser {
                account_id: Some("abc".into()),
                display_name: Some("Intake Bot".into()),
                email_address: None,
            })
        } else {
            Err(JiraError::Api {
                status: 401,
                body: "unauthorized".into(),
            })
        }
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, JiraError> {
        self.calls.lock().unwrap().push("create");
        self.payloads.lock().unwrap().push(payload.clone());
        match &self.reply {
            CreateReply::Created { id, key } => Ok(CreatedIssue {
                id: id.clone(),
                key: key.clone(),
                url: format!("{JIRA_BASE}/browse/{key}"),
            }),
            CreateReply::ApiError { status, body } => Err(JiraError::Api {
                status: *status,
                body: body.clone(),
            }),
            CreateReply::Panic => panic!("tracker exploded"),
            CreateReply::Stall => {
                tokio::time::sleep(STALL).await;
                Err(JiraError::Api {
                    status: 200,
                    body: "answered too late".into(),
                })
            }
        }
    }
}

/// Build the full application router around `tracker`.
pub fn build_test_app_with(config: ServerConfig, tracker: Arc<FakeTracker>) -> Router {
    let state = AppState {
        config: Arc::new(config),
        tracker,
    };
    build_app_router(state)
}

pub fn build_test_app(tracker: Arc<FakeTracker>) -> Router {
    build_test_app_with(test_config(), tracker)
}

/// Send a request through the router.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// `POST` a raw body with a JSON content type and a browser origin.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("origin", "http://localhost:5173")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: &Value) -> Response<Body> {
    post_raw(app, uri, json.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
