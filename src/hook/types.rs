use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::HookError;
use crate::lifecycle::{BeforeHandleHandler, ErrorHandler, TransformHandler};
use crate::merge::OneOrMany;
use crate::response::HandlerResponse;
use crate::validator::RouteSchema;

/// Anything carrying the route-mergeable hook lists.
///
/// Implemented by the global [`crate::lifecycle::LifecycleStore`], by a resolved
/// [`Hook`] and by a user-facing [`RegisterHook`], so [`super::merge_hook`] can
/// combine any two of them.
pub trait HookSet {
    fn transform_hooks(&self) -> &[TransformHandler];
    fn before_handle_hooks(&self) -> &[BeforeHandleHandler];
    fn error_hooks(&self) -> &[ErrorHandler];
}

/// Resolved per-route hooks: global handlers first, then route-local ones.
#[derive(Clone, Default)]
pub struct Hook {
    pub transform: Vec<TransformHandler>,
    pub before_handle: Vec<BeforeHandleHandler>,
    pub error: Vec<ErrorHandler>,
}

impl Hook {
    /// Apply every `transform` handler in order.
    pub fn run_transform(&self, ctx: &mut Context) {
        for transform in &self.transform {
            transform(ctx);
        }
    }

    /// Run `beforeHandle` handlers in order; the first response short-circuits.
    #[must_use]
    pub fn run_before_handle(&self, ctx: &Context) -> Option<HandlerResponse> {
        self.before_handle.iter().find_map(|h| h(ctx))
    }

    /// Offer `err` to `error` handlers in order; the first response wins.
    #[must_use]
    pub fn handle_error(&self, err: &HookError) -> Option<HandlerResponse> {
        self.error.iter().find_map(|h| h(err))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transform.is_empty() && self.before_handle.is_empty() && self.error.is_empty()
    }
}

impl HookSet for Hook {
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

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("transform", &self.transform.len())
            .field("before_handle", &self.before_handle.len())
            .field("error", &self.error.len())
            .finish()
    }
}

/// Route-local hooks as supplied at registration.
///
/// Each field may hold one handler or many; an absent field is treated as
/// empty when merged. The optional schema is compiled into validators when the
/// route is registered.
#[derive(Clone, Default)]
pub struct RegisterHook {
    pub transform: Option<OneOrMany<TransformHandler>>,
    pub before_handle: Option<OneOrMany<BeforeHandleHandler>>,
    pub error: Option<OneOrMany<ErrorHandler>>,
    pub schema: Option<RouteSchema>,
}

impl RegisterHook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        let handler: TransformHandler = Arc::new(f);
        push_handler(&mut self.transform, handler);
        self
    }

    #[must_use]
    pub fn on_before_handle<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Option<HandlerResponse> + Send + Sync + 'static,
    {
        let handler: BeforeHandleHandler = Arc::new(f);
        push_handler(&mut self.before_handle, handler);
        self
    }

    #[must_use]
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookError) -> Option<HandlerResponse> + Send + Sync + 'static,
    {
        let handler: ErrorHandler = Arc::new(f);
        push_handler(&mut self.error, handler);
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: RouteSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Append to a single-or-many slot, promoting `One` to `Many` on the second push.
fn push_handler<T>(slot: &mut Option<OneOrMany<T>>, handler: T) {
    *slot = Some(match slot.take() {
        None => OneOrMany::One(handler),
        Some(OneOrMany::One(first)) => OneOrMany::Many(vec![first, handler]),
        Some(OneOrMany::Many(mut handlers)) => {
            handlers.push(handler);
            OneOrMany::Many(handlers)
        }
    });
}

fn slot_slice<T>(slot: &Option<OneOrMany<T>>) -> &[T] {
    match slot {
        Some(handlers) => handlers.as_slice(),
        None => &[],
    }
}

impl HookSet for RegisterHook {
    fn transform_hooks(&self) -> &[TransformHandler] {
        slot_slice(&self.transform)
    }

    fn before_handle_hooks(&self) -> &[BeforeHandleHandler] {
        slot_slice(&self.before_handle)
    }

    fn error_hooks(&self) -> &[ErrorHandler] {
        slot_slice(&self.error)
    }
}

impl fmt::Debug for RegisterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterHook")
            .field("transform", &self.transform_hooks().len())
            .field("before_handle", &self.before_handle_hooks().len())
            .field("error", &self.error_hooks().len())
            .field("schema", &self.schema.is_some())
            .finish()
    }
}
