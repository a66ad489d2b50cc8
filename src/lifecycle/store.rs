use serde_json::Value;
use std::fmt;

use super::handler::{
    BeforeHandleHandler, ErrorHandler, ParseHandler, RequestHandler, StartHandler, StopHandler,
    TransformHandler,
};
use super::LifecycleEvent;
use crate::context::Context;
use crate::hook::HookSet;
use crate::response::HandlerResponse;

/// Handlers registered per lifecycle event, in registration order.
///
/// Order is execution order. Registering the same handler twice runs it twice.
#[derive(Clone, Default)]
pub struct LifecycleStore {
    pub start: Vec<StartHandler>,
    pub request: Vec<RequestHandler>,
    pub parse: Vec<ParseHandler>,
    pub transform: Vec<TransformHandler>,
    pub before_handle: Vec<BeforeHandleHandler>,
    pub error: Vec<ErrorHandler>,
    pub stop: Vec<StopHandler>,
}

impl LifecycleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `event`
    #[must_use]
    pub fn len_of(&self, event: LifecycleEvent) -> usize {
        match event {
            LifecycleEvent::Start => self.start.len(),
            LifecycleEvent::Request => self.request.len(),
            LifecycleEvent::Parse => self.parse.len(),
            LifecycleEvent::Transform => self.transform.len(),
            LifecycleEvent::BeforeHandle => self.before_handle.len(),
            LifecycleEvent::Error => self.error.len(),
            LifecycleEvent::Stop => self.stop.len(),
        }
    }

    /// Run `request` handlers in order, stopping at the first early response.
    #[must_use]
    pub fn run_request(&self, ctx: &Context) -> Option<HandlerResponse> {
        self.request.iter().find_map(|h| h(ctx))
    }

    /// Ask `parse` handlers in order for a body; the first `Some` wins.
    #[must_use]
    pub fn run_parse(&self, ctx: &Context, content_type: &str) -> Option<Value> {
        self.parse.iter().find_map(|h| h(ctx, content_type))
    }
}

impl HookSet for LifecycleStore {
    fn transform_hooks(&self) -> &[TransformHandler] {
        &self.transform
    }

    fn before_handle_hooks(&self) -> &[BeforeHandleHandler] {
        &self.before_handle
    }

    fn error_hooks(&self) -> &[ErrorHandler] {
        &self.error
    }
}

impl fmt::Debug for LifecycleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("LifecycleStore");
        for event in LifecycleEvent::ORDER {
            s.field(event.as_str(), &self.len_of(event));
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::HeaderVec;
    use http::Method;
    use std::sync::Arc;

    #[test]
    fn test_request_short_circuits_in_order() {
        let mut store = LifecycleStore::new();
        store.request.push(Arc::new(|_: &Context| None));
        store
            .request
            .push(Arc::new(|_: &Context| Some(HandlerResponse::error(403, "first"))));
        store
            .request
            .push(Arc::new(|_: &Context| Some(HandlerResponse::error(500, "second"))));

        let ctx = Context::from_url(Method::GET, "/", HeaderVec::new()).unwrap();
        let res = store.run_request(&ctx).unwrap();
        assert_eq!(res.status, 403);
    }

    #[test]
    fn test_parse_first_some_wins() {
        let mut store = LifecycleStore::new();
        store.parse.push(Arc::new(|_: &Context, ct: &str| {
            (ct == "text/csv").then(|| serde_json::json!(["a", "b"]))
        }));
        store
            .parse
            .push(Arc::new(|_: &Context, _: &str| Some(serde_json::json!("fallback"))));

        let ctx = Context::from_url(Method::POST, "/", HeaderVec::new()).unwrap();
        assert_eq!(store.run_parse(&ctx, "text/csv"), Some(serde_json::json!(["a", "b"])));
        assert_eq!(store.run_parse(&ctx, "text/plain"), Some(serde_json::json!("fallback")));
    }

    #[test]
    fn test_debug_shows_counts() {
        let mut store = LifecycleStore::new();
        store.transform.push(Arc::new(|_: &mut Context| {}));
        let dbg = format!("{store:?}");
        assert!(dbg.contains("transform: 1"));
        assert!(dbg.contains("beforeHandle: 0"));
    }
}
