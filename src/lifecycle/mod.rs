//! # Lifecycle Module
//!
//! Lifecycle events, the handler shape each event accepts, and the global
//! [`LifecycleStore`] that collects them.
//!
//! ```text
//! start (once)
//!   request → parse → transform → beforeHandle → handler → error (on failure)
//! stop (once)
//! ```
//!
//! Only `transform`, `beforeHandle` and `error` can be attached per route; see
//! [`crate::hook`] for how those are merged with the global store.

mod event;
mod handler;
mod store;

pub use event::LifecycleEvent;
pub use handler::{
    BeforeHandleHandler, ErrorHandler, ParseHandler, RequestHandler, RouteHandler, StartHandler,
    StopHandler, TransformHandler,
};
pub use store::LifecycleStore;
