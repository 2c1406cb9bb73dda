use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, header},
    response::Response,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::api::server::{AppState, router};
use crate::db::Store;
use crate::logging;
use crate::tracker::InputPolicy;

/// A router over a fresh in-memory store, driven without a listener.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new(policy: InputPolicy) -> Self {
        logging::init_test();
        let store = Store::open("sqlite::memory:", 1).await.unwrap();
        Self {
            router: router(Arc::new(AppState::new(store, policy))),
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.post_with(uri, "application/x-www-form-urlencoded", body).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.post_with(uri, "application/json", body).await
    }

    pub async fn post_with(&self, uri: &str, content_type: &str, body: &str) -> Response {
        self.send(Method::POST, uri, Some(content_type), Body::from(body.to_string()))
            .await
    }

    async fn send(&self, method: Method, uri: &str, content_type: Option<&str>, body: Body) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
