//! Handler shapes, one per lifecycle event.
//!
//! Every handler is a shared `Fn` so a resolved hook list can be cloned into
//! many routes and invoked from any thread.

use serde_json::Value;
use std::sync::Arc;

use crate::app::App;
use crate::context::Context;
use crate::error::HookError;
use crate::response::HandlerResponse;

/// Runs once when the app starts.
pub type StartHandler = Arc<dyn Fn(&App) + Send + Sync>;

/// Runs first for every request; returning a response ends the request early.
pub type RequestHandler = Arc<dyn Fn(&Context) -> Option<HandlerResponse> + Send + Sync>;

/// Custom body parser, given the request content type; the first `Some` wins.
pub type ParseHandler = Arc<dyn Fn(&Context, &str) -> Option<Value> + Send + Sync>;

/// Rewrites the context before validation and `beforeHandle`.
pub type TransformHandler = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Guard in front of the route handler; returning a response skips the handler.
pub type BeforeHandleHandler = Arc<dyn Fn(&Context) -> Option<HandlerResponse> + Send + Sync>;

/// Maps a failure to a response; the first `Some` wins.
pub type ErrorHandler = Arc<dyn Fn(&HookError) -> Option<HandlerResponse> + Send + Sync>;

/// Runs once when the app stops.
pub type StopHandler = Arc<dyn Fn(&App) + Send + Sync>;

/// The route handler itself.
pub type RouteHandler = Arc<dyn Fn(&Context) -> HandlerResponse + Send + Sync>;
