//! In-process stand-in for the accounts, content, and dataset hosts.
//!
//! Routes are keyed by method and path; the query string is recorded but
//! not matched. Unrouted requests answer `404` so a wrong URL shows up as
//! a rejection in the adapter under test.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

/// One request observed by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
enum Reply {
    Json(u16, Value),
    Raw(u16, String),
}

#[derive(Default)]
struct FakeState {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running fake upstream bound to an ephemeral local port.
pub struct FakeUpstream {
    base_url: Url,
    state: Arc<FakeState>,
    handle: ServerHandle,
}

async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<FakeState>>,
) -> HttpResponse {
    let method = req.method().clone();
    let path = req.path().to_owned();
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: req.query_string().to_owned(),
            authorization: req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
            body: serde_json::from_slice(&body).ok(),
        });

    let reply = state
        .routes
        .lock()
        .expect("routes lock")
        .get(&(method, path))
        .cloned();
    match reply {
        Some(Reply::Json(status, value)) => {
            HttpResponse::build(StatusCode::from_u16(status).expect("valid status")).json(value)
        }
        Some(Reply::Raw(status, text)) => {
            HttpResponse::build(StatusCode::from_u16(status).expect("valid status")).body(text)
        }
        None => HttpResponse::NotFound().json(json!({ "error": "no route" })),
    }
}

impl FakeUpstream {
    /// Start the fake on `127.0.0.1` with one worker.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let state = Arc::new(FakeState::default());
        let data = web::Data::new(Arc::clone(&state));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(dispatch))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{addr}/v1")).expect("base url"),
            state,
            handle,
        }
    }

    /// Base URL adapters should be configured with (`http://host:port/v1`).
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .expect("routes lock")
            .insert((method, path.to_owned()), Reply::Json(status, body));
    }

    /// Answer `method path` with a plain-text body.
    pub fn respond_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state
            .routes
            .lock()
            .expect("routes lock")
            .insert((method, path.to_owned()), Reply::Raw(status, body.to_owned()));
    }

    /// Requests observed so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    /// The only request observed; panics when there were none or several.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.into_iter().next().expect("one request")
    }

    /// Stop the listener.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
