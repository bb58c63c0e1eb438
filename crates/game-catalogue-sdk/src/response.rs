//! Responses produced by handlers and the envelopes returned to the gateway

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use aws_lambda_events::lambda_function_urls::LambdaFunctionUrlResponse;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::HandlerError;
use crate::request::EnvelopeKind;

/// A handler's response, before it is wrapped for the gateway.
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `html(status, body)` | any | Rendered page |
/// | `see_other(location)` | 303 | Redirect after a form submission |
/// | `text(status, body)` | any | Last-resort plain text |
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body, empty for redirects
    pub body: String,
}

impl Response {
    /// Create a new response with the given status code and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// Create an HTML response.
    ///
    /// # Example
    /// ```ignore
    /// Response::html(200, "<html><body><h1>Games</h1></body></html>")
    /// ```
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(body)
    }

    /// Create a plain text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(body)
    }

    /// Create a 303 See Other redirect with an empty body.
    ///
    /// # Example
    /// ```ignore
    /// Response::see_other("/gc/wishlist")
    /// ```
    pub fn see_other(location: impl Into<String>) -> Self {
        Self::new(303).with_header("Location", location)
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        self.header("Location")
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

/// `{"statusCode", "headers", "body", ...}` envelope in the shape the event came in
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    FunctionUrl(LambdaFunctionUrlResponse),
    Proxy(ApiGatewayProxyResponse),
}

impl GatewayResponse {
    pub fn new(kind: EnvelopeKind, response: Response) -> Result<Self, HandlerError> {
        let headers = header_map(&response.headers)?;
        let status_code = i64::from(response.status);

        Ok(match kind {
            EnvelopeKind::FunctionUrl => GatewayResponse::FunctionUrl(LambdaFunctionUrlResponse {
                status_code,
                headers,
                body: Some(response.body),
                is_base64_encoded: false,
                cookies: Vec::new(),
            }),
            EnvelopeKind::Proxy => GatewayResponse::Proxy(ApiGatewayProxyResponse {
                status_code,
                headers,
                multi_value_headers: HeaderMap::new(),
                body: Some(Body::Text(response.body)),
                is_base64_encoded: false,
            }),
        })
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, HandlerError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| HandlerError::Internal(format!("Invalid header name {}: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HandlerError::Internal(format!("Invalid value for header {}: {}", key, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}
