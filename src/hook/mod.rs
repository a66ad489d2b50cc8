//! # Hook Module
//!
//! Route-attachable lifecycle hooks (`transform`, `beforeHandle`, `error`) and
//! their composition.
//!
//! A route's effective hooks are computed once, at registration, by
//! [`merge_hook`]`(&global_store, &route_hooks)`. The result is a fresh
//! [`Hook`]: the global store stays a pristine template that can be merged
//! against any number of routes.
//!
//! ```
//! use brisk::hook::{merge_hook, RegisterHook};
//! use brisk::lifecycle::LifecycleStore;
//!
//! let global = LifecycleStore::new();
//! let local = RegisterHook::new().on_transform(|ctx| {
//!     ctx.store.insert("seen".into(), true.into());
//! });
//!
//! let hook = merge_hook(&global, &local);
//! assert_eq!(hook.transform.len(), 1);
//! assert!(hook.before_handle.is_empty());
//! ```

mod merge;
mod types;

pub use merge::merge_hook;
pub use types::{Hook, HookSet, RegisterHook};
