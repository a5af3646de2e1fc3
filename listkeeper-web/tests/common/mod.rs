//! In-process HTTP client that keeps the session cookie between requests

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use listkeeper_templating::TemplateEngine;
use listkeeper_todo::{InMemorySessionStore, SessionStore};
use listkeeper_web::{router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "listkeeper.session";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location(), Some(to));
    }
}

pub fn app_with_store(store: Arc<dyn SessionStore>) -> Router {
    let views = TemplateEngine::new().expect("templates parse");
    router(AppState::new(store, views, COOKIE_NAME))
}

pub fn app() -> Router {
    app_with_store(Arc::new(InMemorySessionStore::new(Duration::from_secs(3600))))
}

pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_app(app())
    }

    pub fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, false).await
    }

    pub async fn post(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(form), false).await
    }

    pub async fn post_ajax(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(""), true).await
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        form: Option<&str>,
        ajax: bool,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if ajax {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
