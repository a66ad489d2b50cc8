use http::Method;
use std::fmt;

use crate::context::Context;
use crate::hook::Hook;
use crate::lifecycle::RouteHandler;
use crate::response::HandlerResponse;
use crate::validator::{RouteSchema, RouteValidators};

/// A registered route: immutable once built by [`crate::App::route`].
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub handler: RouteHandler,
    /// Global hooks merged with the route's own, global first
    pub hook: Hook,
    pub schema: Option<RouteSchema>,
    pub validators: RouteValidators,
    /// Trailing-slash twin added by loose path matching; an explicit
    /// registration of the same path takes its place.
    pub alias: bool,
}

impl Route {
    /// Invoke the route handler directly, without running any hooks.
    #[must_use]
    pub fn call(&self, ctx: &Context) -> HandlerResponse {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("hook", &self.hook)
            .field("validators", &self.validators)
            .field("alias", &self.alias)
            .finish()
    }
}

/// The other spelling of `path` with respect to a trailing slash.
///
/// `/a` ↔ `/a/`. Paths made only of slashes (`/`, `//`) have no alias.
#[must_use]
pub fn loose_alias(path: &str) -> Option<String> {
    if path.bytes().all(|b| b == b'/') {
        None
    } else if let Some(trimmed) = path.strip_suffix('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{path}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_alias() {
        assert_eq!(loose_alias("/"), None);
        assert_eq!(loose_alias("//"), None);
        assert_eq!(loose_alias("/users"), Some("/users/".to_string()));
        assert_eq!(loose_alias("/users/"), Some("/users".to_string()));
    }
}
