//! Транспорт для тестов: записывает запросы и отвечает по заданным маршрутам

use super::client::{ApiClient, RequestContext};
use super::error::ApiError;
use super::request::{ApiRequest, HttpMethod, RequestBody};
use super::transport::{HttpTransport, RawResponse};
use async_trait::async_trait;
use std::cell::RefCell;

pub const TEST_BASE_URL: &str = "http://test.local/api";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Option<String>,
    pub url: String,
    pub token: Option<String>,
    pub body: RequestBody,
}

impl RecordedRequest {
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

struct Route {
    method: HttpMethod,
    pattern: String,
    status: u16,
    body: String,
}

/// `*` совпадает с одним сегментом пути
fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(path.iter())
            .all(|(p, s)| *p == "*" || p == s)
}

#[derive(Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    recorded: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: HttpMethod, pattern: &str, status: u16, body: serde_json::Value) -> Self {
        self.respond_text(method, pattern, status, &body.to_string())
    }

    pub fn respond_text(mut self, method: HttpMethod, pattern: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method,
            pattern: pattern.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn client(self) -> ApiClient<MockTransport> {
        ApiClient::with_transport(self, RequestContext::new(TEST_BASE_URL, None))
    }

    pub fn client_with_token(self, token: &str) -> ApiClient<MockTransport> {
        ApiClient::with_transport(
            self,
            RequestContext::new(TEST_BASE_URL, Some(token.to_string())),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.borrow().clone()
    }

    pub fn count(&self, method: HttpMethod, pattern: &str) -> usize {
        self.recorded
            .borrow()
            .iter()
            .filter(|r| r.method == method && path_matches(pattern, &r.path))
            .count()
    }

    pub fn total(&self) -> usize {
        self.recorded.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        url: &str,
        token: Option<&str>,
        request: &ApiRequest,
    ) -> Result<RawResponse, ApiError> {
        self.recorded.borrow_mut().push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            query: request.query.clone(),
            url: url.to_string(),
            token: token.map(str::to_string),
            body: request.body.clone(),
        });

        let route = self
            .routes
            .iter()
            .find(|r| r.method == request.method && path_matches(&r.pattern, &request.path));
        Ok(match route {
            Some(route) => RawResponse {
                status: route.status,
                body: route.body.clone(),
            },
            None => RawResponse {
                status: 200,
                body: "{}".to_string(),
            },
        })
    }
}

#[test]
fn test_path_pattern() {
    assert!(path_matches("templates/*/areas", "templates/t1/areas"));
    assert!(!path_matches("templates/*/areas", "templates/areas"));
    assert!(path_matches("orders", "orders"));
}
