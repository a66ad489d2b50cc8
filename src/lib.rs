//! # brisk
//!
//! **brisk** is the hook, typing and merge layer of a minimal HTTP framework. It
//! describes the request lifecycle, composes global and per-route hooks, compiles
//! per-route JSON Schema validators, and provides the small utilities route
//! registration leans on: deep merge, ordered array merge, and URL path/query
//! extraction.
//!
//! Request parsing, path matching and the dispatch loop belong to the host
//! server; this crate hands it fully resolved, immutable [`Route`]s.
//!
//! ## Architecture
//!
//! - **[`lifecycle`]** - Lifecycle events, handler shapes and the global hook store
//! - **[`hook`]** - Route-local hooks and [`hook::merge_hook`]
//! - **[`merge`]** - [`merge::merge_deep`] and [`merge::merge_object_array`]
//! - **[`request`]** - [`request::get_path`] and [`request::map_query`]
//! - **[`validator`]** - Per-route schemas compiled with `jsonschema`
//! - **[`typed`]** - Typed handlers deserialized from the request context
//! - **[`config`]** - File and environment configuration
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ### Lifecycle
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as Host server
//!     participant App
//!     participant Hook as Route hook<br/>(global + local)
//!     participant Handler
//!
//!     App->>App: start hooks (once)
//!     Server->>App: request hooks
//!     Server->>App: parse hooks (body)
//!     Server->>Hook: transform hooks
//!     Server->>Hook: beforeHandle hooks
//!     alt beforeHandle returned a response
//!         Hook-->>Server: early response
//!     end
//!     Server->>Handler: handler(ctx)
//!     alt failure
//!         Server->>Hook: error hooks
//!     end
//!     App->>App: stop hooks (once)
//! ```
//!
//! ### Hook composition
//!
//! A route's hooks are resolved once, when it is registered:
//!
//! ```text
//! route.hook = merge_hook(&app.event, &route_local)
//!            = { transform:     global ++ local,
//!                before_handle: global ++ local,
//!                error:         global ++ local }
//! ```
//!
//! Global handlers run first. The global store is never modified by a merge, so
//! it can be combined with any number of routes.
//!
//! ## Quick Start
//!
//! ```
//! use brisk::{App, Context, HandlerResponse, RegisterHook};
//! use serde_json::json;
//!
//! let mut app = App::new();
//! app.on_transform(|ctx| {
//!     ctx.store.insert("trace".into(), json!(true));
//! });
//!
//! app.get(
//!     "/users/:id",
//!     |ctx: &Context| HandlerResponse::json(200, json!({ "id": ctx.params.get("id") })),
//!     RegisterHook::new().on_before_handle(|ctx| {
//!         ctx.get_header("authorization")
//!             .is_none()
//!             .then(|| HandlerResponse::error(401, "Unauthorized"))
//!     }),
//! )
//! .unwrap();
//!
//! let route = &app.routes()[0];
//! assert_eq!(route.hook.transform.len(), 1);
//! assert_eq!(route.hook.before_handle.len(), 1);
//! ```

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod hook;
pub mod ids;
pub mod lifecycle;
pub mod logging;
pub mod merge;
pub mod request;
pub mod response;
pub mod route;
pub mod typed;
pub mod validator;

pub use app::App;
pub use config::{load_config, AppConfig};
pub use context::Context;
pub use error::{ErrorCode, HookError, RouteError, UrlError};
pub use hook::{merge_hook, Hook, HookSet, RegisterHook};
pub use lifecycle::{LifecycleEvent, LifecycleStore};
pub use merge::{clone, merge_deep, merge_object_array, OneOrMany};
pub use request::{get_path, map_query, map_query_decoded};
pub use response::{HandlerResponse, HeaderVec};
pub use route::Route;
pub use validator::{RouteSchema, RouteValidators, SchemaPart, ValidationError};
