//! Scripted transport and gateway builders shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::gateway::{AuthExpiryHandler, ClearAndRedirect, Gateway};
use super::transport::{ApiRequest, NetworkFailure, RawResponse, Transport};
use crate::nav::MemoryNavigator;
use crate::net::types::{Rol, User};
use crate::session::SessionStore;

pub const TEST_BASE_URL: &str = "http://api.test/api";

/// Transport that replays queued results in order and records every request.
/// When the queue runs dry it answers `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, NetworkFailure>>>,
    pub requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse { status, body: body.to_owned() }));
    }

    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(status, &body.to_string());
    }

    pub fn push_failure(&self, failure: NetworkFailure) {
        self.responses.lock().unwrap().push_back(Err(failure));
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, NetworkFailure> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse { status: 200, body: "{}".to_owned() }))
    }
}

/// Expiry handler that only counts invocations.
#[derive(Default)]
pub struct CountingHandler {
    pub calls: Mutex<Vec<u16>>,
}

impl AuthExpiryHandler for CountingHandler {
    fn on_auth_expired(&self, status: u16) {
        self.calls.lock().unwrap().push(status);
    }
}

pub struct TestRig {
    pub gateway: Gateway,
    pub transport: Arc<MockTransport>,
    pub session: SessionStore,
    pub navigator: Arc<MemoryNavigator>,
}

/// Gateway over a mock transport with the real clear-and-redirect handler,
/// starting at `start_path`.
pub fn rig(start_path: &str) -> TestRig {
    let transport = MockTransport::new();
    let session = SessionStore::in_memory();
    let navigator = Arc::new(MemoryNavigator::new(start_path));
    let handler = Arc::new(ClearAndRedirect::new(session.clone(), navigator.clone()));
    let gateway = Gateway::with_transport(TEST_BASE_URL, transport.clone(), session.clone(), handler);
    TestRig { gateway, transport, session, navigator }
}

pub fn user(rol: Rol) -> User {
    User { id: 1, nombre: "Ana".into(), correo: "a@x.com".into(), rol }
}

pub fn logged_in_rig(start_path: &str, rol: Rol) -> TestRig {
    let rig = rig(start_path);
    rig.session.save(&user(rol), "tok123").unwrap();
    rig
}
