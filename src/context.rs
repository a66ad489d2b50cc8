use http::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::UrlError;
use crate::ids::RequestId;
use crate::request::{get_path, map_query};
use crate::response::HeaderVec;

/// Per-request data seen by lifecycle hooks and route handlers.
///
/// `transform` hooks receive it mutably and may rewrite params, query values or
/// the body, or stash derived values in `store` for later hooks.
#[derive(Debug, Clone)]
pub struct Context {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without query string
    pub path: String,
    /// Raw query parameters; last duplicate wins
    pub query: HashMap<String, String>,
    /// Path parameters filled in by the router
    pub params: HashMap<String, String>,
    pub headers: HeaderVec,
    /// Body parsed by a `parse` hook or the default JSON parser
    pub body: Option<Value>,
    /// Scratch record shared by hooks of one request
    pub store: Map<String, Value>,
}

impl Context {
    /// Build a context from a method, a raw URL and request headers.
    ///
    /// An `x-request-id` header carrying a valid ULID is reused as the request id.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] when the URL is neither an absolute path nor a full URL.
    pub fn from_url(method: Method, url: &str, headers: HeaderVec) -> Result<Self, UrlError> {
        let path = get_path(url)?.to_string();
        let query = map_query(url);
        let request_id = RequestId::from_headers(&headers);

        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            query_count = query.len(),
            header_count = headers.len(),
            "Context built"
        );

        Ok(Self {
            request_id,
            method,
            path,
            query,
            params: HashMap::new(),
            headers,
            body: None,
            store: Map::new(),
        })
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value.into()));
    }

    /// Content type without parameters (`application/json; charset=utf-8` → `application/json`)
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
    }

    /// Headers as a JSON record with lower-cased names, for schema validation.
    #[must_use]
    pub fn headers_value(&self) -> Value {
        Value::Object(
            self.headers
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), Value::String(v.clone())))
                .collect(),
        )
    }

    #[must_use]
    pub fn query_value(&self) -> Value {
        string_map_value(&self.query)
    }

    #[must_use]
    pub fn params_value(&self) -> Value {
        string_map_value(&self.params)
    }
}

fn string_map_value(map: &HashMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}
