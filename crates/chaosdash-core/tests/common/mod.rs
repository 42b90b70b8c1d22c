//! Recording fake transport shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use async_trait::async_trait;
use chaosdash_core::{
    ApiClient, ApiTransport, DashError, DashboardConfig, Method, RawResponse, Result,
};
use serde_json::{json, Value};

pub const BASE: &str = "http://chaos.test/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

enum Reply {
    Response(RawResponse),
    Reject(String),
}

/// Answers from a fixed route table; unmatched requests get a 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<Vec<(Method, String, Reply)>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.route_raw(method, path, status, &body)
    }

    /// Replies with `body` verbatim, for payloads `Value` cannot express.
    pub fn route_raw(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.borrow_mut().push((
            method,
            format!("{}{}", BASE, path),
            Reply::Response(RawResponse {
                status,
                status_text: status_text(status).to_string(),
                body: body.to_string(),
            }),
        ));
        self
    }

    pub fn reject(self, method: Method, path: &str, reason: &str) -> Self {
        self.routes.borrow_mut().push((
            method,
            format!("{}{}", BASE, path),
            Reply::Reject(reason.to_string()),
        ));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for FakeTransport {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<RawResponse> {
        self.calls.borrow_mut().push(Call {
            method,
            url: url.to_string(),
            body,
        });
        let routes = self.routes.borrow();
        match routes.iter().find(|(m, u, _)| *m == method && u == url) {
            Some((_, _, Reply::Response(resp))) => Ok(resp.clone()),
            Some((_, _, Reply::Reject(reason))) => Err(DashError::Network(reason.clone())),
            None => Ok(RawResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            }),
        }
    }
}

pub fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::new(transport, &DashboardConfig::new("http://chaos.test/"))
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

pub fn experiment(id: &str, status: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": format!("experiment {}", id),
        "description": "",
        "type": "pod-failure",
        "target": "app=web",
        "parameters": "{\"namespace\":\"default\",\"percentage\":\"50\"}",
        "duration": 60,
        "status": status,
        "created_at": created_at,
    })
}

pub fn target(id: &str, selector: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": format!("target {}", id),
        "description": "",
        "type": "deployment",
        "namespace": "default",
        "selector": selector,
        "created_at": created_at,
    })
}

pub fn experiments(values: Vec<Value>) -> Vec<chaosdash_core::Experiment> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

pub fn targets(values: Vec<Value>) -> Vec<chaosdash_core::Target> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}
