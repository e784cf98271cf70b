//! Integration tests for Bella Mode.
//!
//! Tests drive the storefront router in-process, carrying the session
//! cookie between requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bella-mode-integration-tests
//! ```

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use bella_mode_storefront::{
    build_router, catalog::Catalog, config::StorefrontConfig, state::AppState,
};
use tower::ServiceExt;

/// Largest response body a test reads.
const BODY_LIMIT: usize = 1024 * 1024;

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parsed `HX-Trigger` header.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or not JSON.
    #[must_use]
    pub fn trigger(&self) -> serde_json::Value {
        let raw = self
            .headers
            .get("hx-trigger")
            .and_then(|value| value.to_str().ok())
            .expect("HX-Trigger header");
        serde_json::from_str(raw).expect("HX-Trigger JSON")
    }

    /// Toast message carried by the response, if any.
    #[must_use]
    pub fn toast(&self) -> Option<String> {
        self.trigger()
            .get("bella-toast")
            .and_then(|toast| toast.get("message"))
            .and_then(|message| message.as_str())
            .map(str::to_string)
    }
}

/// One browser: a router plus its session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// A fresh storefront with the house collection and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_router(build_router(AppState::new(
            StorefrontConfig::default(),
            Catalog::house_collection(),
        )))
    }

    /// A client over an existing router.
    #[must_use]
    pub const fn with_router(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// A second browser on the same server, without this one's cookie.
    #[must_use]
    pub fn stranger(&self) -> Self {
        Self::with_router(self.router.clone())
    }

    /// # Panics
    ///
    /// Panics if the request cannot be served.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// Post a urlencoded form, as HTMX does.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be served.
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, Some(encode_form(form))).await
    }

    async fn send(&mut self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("hx-request", "true");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `application/x-www-form-urlencoded` encoding.
fn encode_form(form: &[(&str, &str)]) -> String {
    form.iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form_escapes_prompts() {
        assert_eq!(
            encode_form(&[("qty", "2"), ("confirmed", "Remove \"Tas A\"?")]),
            "qty=2&confirmed=Remove%20%22Tas%20A%22%3F"
        );
    }
}
