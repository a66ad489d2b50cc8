use http::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::context::Context;
use crate::error::{HookError, RouteError};
use crate::hook::{merge_hook, RegisterHook};
use crate::lifecycle::{LifecycleEvent, LifecycleStore, RouteHandler};
use crate::response::HandlerResponse;
use crate::route::{loose_alias, Route};
use crate::validator::RouteValidators;

/// Application builder: global lifecycle hooks plus registered routes.
///
/// Global hooks are copied into each route at registration time, so hooks
/// added after a route is registered do not apply to it.
#[derive(Clone, Default)]
pub struct App {
    config: AppConfig,
    event: LifecycleStore,
    routes: Vec<Route>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The global hook store
    #[must_use]
    pub fn event(&self) -> &LifecycleStore {
        &self.event
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn on_start<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&App) + Send + Sync + 'static,
    {
        self.event.start.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Start)
    }

    pub fn on_request<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Context) -> Option<HandlerResponse> + Send + Sync + 'static,
    {
        self.event.request.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Request)
    }

    pub fn on_parse<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Context, &str) -> Option<Value> + Send + Sync + 'static,
    {
        self.event.parse.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Parse)
    }

    pub fn on_transform<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.event.transform.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Transform)
    }

    pub fn on_before_handle<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Context) -> Option<HandlerResponse> + Send + Sync + 'static,
    {
        self.event.before_handle.push(Arc::new(f));
        self.log_hook(LifecycleEvent::BeforeHandle)
    }

    pub fn on_error<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&HookError) -> Option<HandlerResponse> + Send + Sync + 'static,
    {
        self.event.error.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Error)
    }

    pub fn on_stop<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&App) + Send + Sync + 'static,
    {
        self.event.stop.push(Arc::new(f));
        self.log_hook(LifecycleEvent::Stop)
    }

    fn log_hook(&mut self, event: LifecycleEvent) -> &mut Self {
        debug!(event = %event, total = self.event.len_of(event), "Global hook registered");
        self
    }

    /// Register `handler` for `method` and `path`.
    ///
    /// The route's hooks are `merge_hook(global, hook)`; its schema, if any,
    /// is compiled now. Unless `strict_path` is set, the trailing-slash
    /// variant of `path` is registered too, sharing handler and hooks, as
    /// long as that variant is still free. A later explicit registration of
    /// the variant replaces the alias.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidPath`] if `path` does not start with `/`,
    /// [`RouteError::Duplicate`] if `method` and `path` are already explicitly
    /// registered, [`RouteError::Schema`] if a schema part does not compile.
    pub fn route<F>(
        &mut self,
        method: Method,
        path: &str,
        handler: F,
        hook: RegisterHook,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Context) -> HandlerResponse + Send + Sync + 'static,
    {
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath {
                path: path.to_string(),
            });
        }

        if self
            .find_route(&method, path)
            .is_some_and(|existing| !existing.alias)
        {
            return Err(RouteError::Duplicate {
                method: method.to_string(),
                path: path.to_string(),
            });
        }

        let validators = match &hook.schema {
            Some(schema) => {
                RouteValidators::compile(schema).map_err(|e| RouteError::Schema {
                    path: path.to_string(),
                    part: e.part.as_str(),
                    message: e.message,
                })?
            }
            None => RouteValidators::default(),
        };

        let handler: RouteHandler = Arc::new(handler);
        let route = Route {
            method,
            path: path.to_string(),
            handler,
            hook: merge_hook(&self.event, &hook),
            schema: hook.schema,
            validators,
            alias: false,
        };

        info!(
            method = %route.method,
            path = %route.path,
            transform = route.hook.transform.len(),
            before_handle = route.hook.before_handle.len(),
            error = route.hook.error.len(),
            validators = ?route.validators,
            "Route registered"
        );

        let replaced = self.routes.len();
        self.routes
            .retain(|r| !(r.alias && r.method == route.method && r.path == route.path));
        if self.routes.len() != replaced {
            debug!(method = %route.method, path = %route.path, "Loose path alias replaced by explicit route");
        }

        let alias = if self.config.strict_path {
            None
        } else {
            loose_alias(path).filter(|alias| self.find_route(&route.method, alias).is_none())
        };

        if let Some(alias) = alias {
            debug!(method = %route.method, path = %route.path, alias = %alias, "Loose path alias registered");
            let aliased = Route {
                path: alias,
                alias: true,
                ..route.clone()
            };
            self.routes.push(route);
            self.routes.push(aliased);
        } else {
            self.routes.push(route);
        }

        Ok(self)
    }

    fn find_route(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
    }

    /// Run `start` hooks in registration order.
    pub fn start(&self) {
        info!(
            routes = self.routes.len(),
            hooks = self.event.start.len(),
            "App starting"
        );
        for hook in &self.event.start {
            hook(self);
        }
    }

    /// Run `stop` hooks in registration order.
    pub fn stop(&self) {
        info!(hooks = self.event.stop.len(), "App stopping");
        for hook in &self.event.stop {
            hook(self);
        }
    }
}

macro_rules! insert_route {
    ($name:ident => Method::$method:ident) => {
        #[doc = concat!("Register a route for the `", stringify!($method), "` method.")]
        ///
        /// # Errors
        ///
        /// See [`App::route`].
        pub fn $name<F>(
            &mut self,
            path: &str,
            handler: F,
            hook: RegisterHook,
        ) -> Result<&mut Self, RouteError>
        where
            F: Fn(&Context) -> HandlerResponse + Send + Sync + 'static,
        {
            self.route(Method::$method, path, handler, hook)
        }
    };
}

impl App {
    insert_route!(get => Method::GET);
    insert_route!(put => Method::PUT);
    insert_route!(post => Method::POST);
    insert_route!(delete => Method::DELETE);
    insert_route!(head => Method::HEAD);
    insert_route!(options => Method::OPTIONS);
    insert_route!(patch => Method::PATCH);
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("event", &self.event)
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::RouteSchema;

    fn ok(_: &Context) -> HandlerResponse {
        HandlerResponse::json(200, Value::Null)
    }

    #[test]
    fn test_loose_alias_registered_by_default() {
        let mut app = App::new();
        app.get("/users", ok, RegisterHook::new()).unwrap();
        let paths: Vec<&str> = app.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/users", "/users/"]);
    }

    #[test]
    fn test_strict_path_registers_exact_only() {
        let mut app = App::with_config(AppConfig {
            strict_path: true,
            ..AppConfig::default()
        });
        app.get("/users/", ok, RegisterHook::new()).unwrap();
        assert_eq!(app.routes().len(), 1);
        assert_eq!(app.routes()[0].path, "/users/");
    }

    #[test]
    fn test_root_has_no_alias() {
        let mut app = App::new();
        app.get("/", ok, RegisterHook::new()).unwrap();
        assert_eq!(app.routes().len(), 1);
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut app = App::new();
        let err = app.get("users", ok, RegisterHook::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidPath {
                path: "users".to_string()
            }
        );
        assert!(app.routes().is_empty());
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let mut app = App::new();
        let hook = RegisterHook::new()
            .schema(RouteSchema::default().body(serde_json::json!({"pattern": "("})));
        let err = app.post("/pets", ok, hook).unwrap_err();
        assert!(matches!(err, RouteError::Schema { part: "body", .. }));
    }

    #[test]
    fn test_alias_never_shadows_explicit_routes() {
        let mut app = App::new();
        app.get("/a", ok, RegisterHook::new())
            .and_then(|app| app.get("/a/", ok, RegisterHook::new()))
            .and_then(|app| app.get("//", ok, RegisterHook::new()))
            .and_then(|app| app.get("/", ok, RegisterHook::new()))
            .unwrap();

        let paths: Vec<(&str, bool)> = app
            .routes()
            .iter()
            .map(|r| (r.path.as_str(), r.alias))
            .collect();
        assert_eq!(
            paths,
            vec![("/a", false), ("/a/", false), ("//", false), ("/", false)]
        );
    }

    #[test]
    fn test_alias_skipped_when_variant_taken() {
        let mut app = App::new();
        app.get("/a/", ok, RegisterHook::new())
            .and_then(|app| app.get("/a", ok, RegisterHook::new()))
            .unwrap();
        let paths: Vec<&str> = app.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/a/", "/a"]);
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut app = App::new();
        app.get("/a", ok, RegisterHook::new()).unwrap();
        let err = app.get("/a", ok, RegisterHook::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::Duplicate {
                method: "GET".to_string(),
                path: "/a".to_string()
            }
        );
        // other methods on the same path are fine
        app.post("/a", ok, RegisterHook::new()).unwrap();
        assert_eq!(app.routes().len(), 4);
    }

    #[test]
    fn test_chained_registration() {
        let mut app = App::new();
        app.get("/a", ok, RegisterHook::new())
            .and_then(|app| app.post("/b", ok, RegisterHook::new()))
            .unwrap();
        let methods: Vec<&Method> = app.routes().iter().map(|r| &r.method).collect();
        assert_eq!(methods, vec![&Method::GET, &Method::GET, &Method::POST, &Method::POST]);
    }
}
