//! Gateway event envelopes and the normalized request handlers receive

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_lambda_events::lambda_function_urls::LambdaFunctionUrlRequest;
use base64::Engine;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::HandlerError;

/// An invocation event as delivered by the function gateway.
///
/// The Function URL (HTTP API v2) shape is chosen only when
/// `requestContext.http` is present; any other JSON object is read as a proxy
/// (REST API v1 / ALB) event, with `httpMethod` defaulting to `GET`.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    FunctionUrl(Box<LambdaFunctionUrlRequest>),
    Proxy(Box<ApiGatewayProxyRequest>),
}

/// Which envelope an event arrived in, and so which one the reply must use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    FunctionUrl,
    Proxy,
}

impl<'de> Deserialize<'de> for GatewayEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| D::Error::custom("gateway event must be a JSON object"))?;

        if !matches!(object.get("isBase64Encoded"), Some(Value::Bool(_))) {
            object.insert("isBase64Encoded".to_string(), Value::Bool(false));
        }

        if is_function_url(&value) {
            return serde_json::from_value(value)
                .map(|event| GatewayEvent::FunctionUrl(Box::new(event)))
                .map_err(D::Error::custom);
        }

        if let Some(object) = value.as_object_mut() {
            if !matches!(object.get("httpMethod"), Some(Value::String(_))) {
                object.insert("httpMethod".to_string(), Value::from("GET"));
            }
        }

        serde_json::from_value(value)
            .map(|event| GatewayEvent::Proxy(Box::new(event)))
            .map_err(D::Error::custom)
    }
}

/// `requestContext.http` marks a Function URL / HTTP API v2 payload
fn is_function_url(value: &Value) -> bool {
    value
        .get("requestContext")
        .and_then(|ctx| ctx.get("http"))
        .is_some_and(Value::is_object)
}

impl GatewayEvent {
    pub fn kind(&self) -> EnvelopeKind {
        match self {
            GatewayEvent::FunctionUrl(_) => EnvelopeKind::FunctionUrl,
            GatewayEvent::Proxy(_) => EnvelopeKind::Proxy,
        }
    }

    /// Normalize the envelope into a [`Request`], removing `route_prefix` from
    /// the front of the path.
    pub fn into_request(self, route_prefix: &str) -> Result<Request, HandlerError> {
        match self {
            GatewayEvent::FunctionUrl(event) => {
                let event = *event;
                let http = event.request_context.http;
                Request::normalize(
                    http.method.unwrap_or_else(|| "GET".to_string()),
                    http.path.as_deref().unwrap_or("/"),
                    event.body,
                    event.is_base64_encoded,
                    route_prefix,
                )
            }
            GatewayEvent::Proxy(event) => {
                let event = *event;
                Request::normalize(
                    event.http_method.as_str().to_string(),
                    event.path.as_deref().unwrap_or("/"),
                    event.body,
                    event.is_base64_encoded,
                    route_prefix,
                )
            }
        }
    }
}

fn decode_base64_body(raw: &str) -> Result<String, HandlerError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(|e| HandlerError::Validation(format!("Invalid base64 body: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|_| HandlerError::Validation("Request body is not valid UTF-8".to_string()))
}

/// Remove the routing prefix from a raw path. An empty remainder becomes `/`.
///
/// The prefix is matched as a plain string prefix, so `/gcfoo` is reduced to `foo`.
pub fn strip_route_prefix(path: &str, route_prefix: &str) -> String {
    let stripped = if route_prefix.is_empty() {
        path
    } else {
        path.strip_prefix(route_prefix).unwrap_or(path)
    };

    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// A normalized HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method exactly as the gateway delivered it
    pub method: String,

    /// Path with the routing prefix removed; never empty
    pub path: String,

    /// Decoded request body
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Build a request from raw gateway parts: strip the routing prefix and
    /// decode a base64 body.
    pub fn normalize(
        method: String,
        raw_path: &str,
        body: Option<String>,
        is_base64_encoded: bool,
        route_prefix: &str,
    ) -> Result<Self, HandlerError> {
        let body = match body {
            Some(raw) if is_base64_encoded => Some(decode_base64_body(&raw)?),
            other => other,
        };

        Ok(Self {
            method,
            path: strip_route_prefix(raw_path, route_prefix),
            body,
        })
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Parse the body as `application/x-www-form-urlencoded`.
    /// A missing body yields an empty form.
    pub fn form(&self) -> FormData {
        self.body
            .as_deref()
            .map(FormData::parse)
            .unwrap_or_default()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new("GET", "/")
    }
}

/// Scalar view of a url-encoded form body.
///
/// Only the first value of a repeated key is kept, and keys whose value is
/// blank are dropped, so a blank field reads the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn parse(body: &str) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { fields }
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Get an optional field as an owned string
    pub fn get_owned(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    /// Get every listed field, or fail naming all of them when any is absent.
    pub fn require_all<const N: usize>(&self, keys: [&str; N]) -> Result<[&str; N], HandlerError> {
        let mut values = [""; N];
        for (slot, key) in values.iter_mut().zip(keys.iter()) {
            *slot = self
                .get(key)
                .ok_or_else(|| HandlerError::missing_fields(&keys))?;
        }
        Ok(values)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_event(value: serde_json::Value) -> GatewayEvent {
        serde_json::from_value(value).unwrap()
    }

    /// Function URL payload as Lambda delivers it
    fn function_url_event(method: &str, path: &str, body: Option<&str>, base64: bool) -> serde_json::Value {
        json!({
            "version": "2.0",
            "rawPath": path,
            "rawQueryString": "",
            "cookies": [],
            "headers": { "content-type": "application/x-www-form-urlencoded" },
            "queryStringParameters": {},
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "abcdefghij",
                "domainName": "abcdefghij.lambda-url.eu-west-1.on.aws",
                "domainPrefix": "abcdefghij",
                "http": {
                    "method": method,
                    "path": path,
                    "protocol": "HTTP/1.1",
                    "sourceIp": "10.0.0.1",
                    "userAgent": "curl/8.5.0"
                },
                "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
                "routeKey": "$default",
                "stage": "$default",
                "time": "12/Mar/2024:19:03:58 +0000",
                "timeEpoch": 1710270238000_i64
            },
            "body": body,
            "isBase64Encoded": base64
        })
    }

    #[test]
    fn test_function_url_event() {
        let event = parse_event(function_url_event("GET", "/gc/wishlist", None, false));
        assert_eq!(event.kind(), EnvelopeKind::FunctionUrl);

        let req = event.into_request("/gc").unwrap();
        assert_eq!(req, Request::new("GET", "/wishlist"));
    }

    #[test]
    fn test_request_context_without_http_is_not_function_url() {
        assert!(is_function_url(&json!({
            "requestContext": { "http": { "method": "GET", "path": "/" } }
        })));
        assert!(!is_function_url(&json!({ "requestContext": { "stage": "prod" } })));
        assert!(!is_function_url(&json!({ "httpMethod": "GET" })));
    }

    #[test]
    fn test_proxy_event() {
        let event = parse_event(json!({
            "httpMethod": "POST",
            "path": "/gc/add",
            "body": "platform=SNES&game_name=Zelda"
        }));
        assert_eq!(event.kind(), EnvelopeKind::Proxy);

        let req = event.into_request("/gc").unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/add");
        assert_eq!(req.body.as_deref(), Some("platform=SNES&game_name=Zelda"));
    }

    #[test]
    fn test_empty_proxy_event_defaults() {
        let event = parse_event(json!({}));
        assert_eq!(event.kind(), EnvelopeKind::Proxy);
        assert_eq!(event.into_request("/gc").unwrap(), Request::new("GET", "/"));
    }

    #[test]
    fn test_method_case_is_preserved() {
        let req = parse_event(json!({ "httpMethod": "get", "path": "/gc" }))
            .into_request("/gc")
            .unwrap();
        assert_eq!(req.method, "get");
    }

    #[test]
    fn test_non_object_event_is_rejected() {
        assert!(serde_json::from_value::<GatewayEvent>(json!("GET /gc")).is_err());
    }

    #[test]
    fn test_strip_route_prefix() {
        assert_eq!(strip_route_prefix("/gc", "/gc"), "/");
        assert_eq!(strip_route_prefix("/gc/", "/gc"), "/");
        assert_eq!(strip_route_prefix("/gc/SNES", "/gc"), "/SNES");
        assert_eq!(strip_route_prefix("/SNES", "/gc"), "/SNES");
        assert_eq!(strip_route_prefix("/gcfoo", "/gc"), "foo");
        assert_eq!(strip_route_prefix("", "/gc"), "/");
        assert_eq!(strip_route_prefix("/gc/add", ""), "/gc/add");
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let event = parse_event(function_url_event(
            "POST",
            "/gc/add",
            Some("cGxhdGZvcm09UFM1JmdhbWVfbmFtZT1Bc3Ryb0JvdA=="),
            true,
        ));
        let req = event.into_request("/gc").unwrap();
        assert_eq!(req.body.as_deref(), Some("platform=PS5&game_name=AstroBot"));
    }

    #[test]
    fn test_invalid_base64_body() {
        let event = parse_event(json!({
            "httpMethod": "POST",
            "path": "/add",
            "body": "%%%not base64",
            "isBase64Encoded": true
        }));
        let err = event.into_request("/gc").unwrap_err();
        assert!(matches!(err, HandlerError::Validation(_)));
    }

    #[test]
    fn test_base64_body_that_is_not_utf8() {
        let body = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe]);
        let err = Request::normalize("POST".to_string(), "/gc/add", Some(body), true, "/gc").unwrap_err();
        assert!(matches!(err, HandlerError::Validation(_)));
        assert_eq!(err.to_string(), "Request body is not valid UTF-8");
    }

    #[test]
    fn test_plain_body_is_left_alone() {
        let req = Request::normalize(
            "POST".to_string(),
            "/gc/add",
            Some("cGxhdGZvcm0=".to_string()),
            false,
            "/gc",
        )
        .unwrap();
        assert_eq!(req.body.as_deref(), Some("cGxhdGZvcm0="));
        assert_eq!(req.path, "/add");
    }

    #[test]
    fn test_form_first_value_wins_and_blanks_dropped() {
        let form = FormData::parse("platform=SNES&platform=N64&genre=&game_name=Super+Metroid");
        assert_eq!(form.get("platform"), Some("SNES"));
        assert_eq!(form.get("game_name"), Some("Super Metroid"));
        assert_eq!(form.get("genre"), None);
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_form_percent_decoding() {
        let form = FormData::parse("platform=Nintendo%20Switch&game_name=Zelda%3A+TotK");
        assert_eq!(form.get("platform"), Some("Nintendo Switch"));
        assert_eq!(form.get("game_name"), Some("Zelda: TotK"));
    }

    #[test]
    fn test_require_all() {
        let form = FormData::parse("platform=SNES&game_id=abc");
        let [platform, game_id] = form.require_all(["platform", "game_id"]).unwrap();
        assert_eq!(platform, "SNES");
        assert_eq!(game_id, "abc");

        let err = form.require_all(["platform", "game_name"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: platform, game_name");
    }

    #[test]
    fn test_missing_body_is_empty_form() {
        let req = Request::new("POST", "/add");
        assert!(req.form().is_empty());
    }
}
