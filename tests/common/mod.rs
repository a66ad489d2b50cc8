#![allow(dead_code)]

use brisk::{Context, HandlerResponse, HeaderVec};
use http::Method;
use std::sync::{Arc, Mutex};

/// Shared log that hooks append to, so tests can assert execution order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: &str) {
        self.0.lock().unwrap().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub fn context(method: Method, url: &str) -> Context {
    Context::from_url(method, url, HeaderVec::new()).unwrap()
}

pub fn ok_handler(_: &Context) -> HandlerResponse {
    HandlerResponse::json(200, serde_json::json!({ "ok": true }))
}
