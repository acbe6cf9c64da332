//! Shared fixtures for unit tests: in-process HTTP servers and probe doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use parking_lot::Mutex;
use slog::{o, Logger};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::auth::Credentials;
use crate::probe::{HttpProbe, ProbeOutcome, ProbeTarget};

pub(crate) fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

pub(crate) struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
struct BasicAuthState {
    expected: String,
    hits: Arc<AtomicUsize>,
}

/// Accepts exactly one user, and answers anything else with a 401 Basic challenge.
async fn basic_auth(State(state): State<BasicAuthState>, headers: HeaderMap) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented == Some(state.expected.as_str()) {
        return (StatusCode::OK, "not important").into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, "Basic realm=\"Secure\"")],
        "not authorized",
    )
        .into_response()
}

async fn serve(app: Router, hits: Arc<AtomicUsize>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    TestServer {
        base_url: format!("http://{addr}"),
        hits,
        handle,
    }
}

pub(crate) async fn start_basic_auth_server(user: &str, password: &str) -> TestServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = BasicAuthState {
        expected: format!("Basic {}", STANDARD.encode(format!("{user}:{password}"))),
        hits: Arc::clone(&hits),
    };
    let app = Router::new().fallback(basic_auth).with_state(state);
    serve(app, hits).await
}

/// Answers every request with the same bare status.
pub(crate) async fn start_status_server(status: u16) -> TestServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().fallback(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            StatusCode::from_u16(status).unwrap()
        }
    });
    serve(app, hits).await
}

/// Redirects `/foo` to an unprotected `/login` page.
pub(crate) async fn start_redirect_server() -> TestServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new()
        .route(
            "/foo",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Redirect::to("/login")
                }
            }),
        )
        .route("/login", get(|| async { "please log in" }));
    serve(app, hits).await
}

/// A URL on loopback where nothing is listening.
pub(crate) async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

/// Probe double answering every call with the current outcome and counting calls.
pub(crate) struct FixedProbe {
    outcome: Mutex<ProbeOutcome>,
    calls: AtomicUsize,
}

impl FixedProbe {
    pub(crate) fn new(outcome: ProbeOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set_outcome(&self, outcome: ProbeOutcome) {
        *self.outcome.lock() = outcome;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpProbe for FixedProbe {
    async fn probe(&self, _target: &ProbeTarget, _credentials: &Credentials) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.lock().clone()
    }
}

/// Probe double accepting a single username/password pair.
pub(crate) struct SingleUserProbe {
    username: String,
    password: String,
    calls: AtomicUsize,
}

impl SingleUserProbe {
    pub(crate) fn new(username: &str, password: &str) -> Arc<Self> {
        Arc::new(Self {
            username: username.to_string(),
            password: password.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpProbe for SingleUserProbe {
    async fn probe(&self, _target: &ProbeTarget, credentials: &Credentials) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if credentials.username() == self.username && credentials.password() == self.password {
            ProbeOutcome::Success
        } else {
            ProbeOutcome::Unauthorized
        }
    }
}
