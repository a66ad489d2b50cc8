use brisk::typed::{typed, TypedHandler, TypedRequest};
use brisk::{App, AppConfig, HandlerResponse, RegisterHook, RouteSchema, SchemaPart};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod common;
use common::{context, ok_handler, CallLog};

#[test]
fn test_start_and_stop_hooks_run_in_order() {
    let log = CallLog::new();
    let mut app = App::new();

    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    app.on_start(move |_| l1.push("start-1"))
        .on_start(move |app| l2.push(&format!("start-2 routes={}", app.routes().len())))
        .on_stop(move |_| l3.push("stop"));
    app.get("/", ok_handler, RegisterHook::new()).unwrap();

    app.start();
    app.stop();

    assert_eq!(log.entries(), vec!["start-1", "start-2 routes=1", "stop"]);
}

#[test]
fn test_request_and_parse_hooks_stay_global() {
    let mut app = App::new();
    app.on_request(|ctx| (ctx.path == "/blocked").then(|| HandlerResponse::error(403, "Forbidden")))
        .on_parse(|_, content_type| {
            (content_type == "text/plain").then(|| Value::String("parsed".into()))
        });
    app.get("/x", ok_handler, RegisterHook::new()).unwrap();

    let store = app.event();
    assert_eq!(store.run_request(&context(Method::GET, "/blocked")).unwrap().status, 403);
    assert!(store.run_request(&context(Method::GET, "/x")).is_none());
    assert_eq!(
        store.run_parse(&context(Method::POST, "/x"), "text/plain"),
        Some(json!("parsed"))
    );

    let route = &app.routes()[0];
    assert!(route.hook.is_empty());
}

#[test]
fn test_every_method_helper_registers_its_method() {
    let mut app = App::with_config(AppConfig {
        strict_path: true,
        ..AppConfig::default()
    });
    app.get("/r", ok_handler, RegisterHook::new())
        .and_then(|a| a.put("/r", ok_handler, RegisterHook::new()))
        .and_then(|a| a.post("/r", ok_handler, RegisterHook::new()))
        .and_then(|a| a.delete("/r", ok_handler, RegisterHook::new()))
        .and_then(|a| a.head("/r", ok_handler, RegisterHook::new()))
        .and_then(|a| a.options("/r", ok_handler, RegisterHook::new()))
        .and_then(|a| a.patch("/r", ok_handler, RegisterHook::new()))
        .unwrap();

    let methods: Vec<Method> = app.routes().iter().map(|r| r.method.clone()).collect();
    assert_eq!(
        methods,
        vec![
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
            Method::PATCH
        ]
    );
}

#[test]
fn test_alias_shares_handler_and_hooks() {
    let mut app = App::new();
    app.on_transform(|_| {});
    app.get("/users/", ok_handler, RegisterHook::new()).unwrap();

    let routes = app.routes();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[1].path, "/users");
    assert_eq!(routes[1].hook.transform.len(), 1);
    assert_eq!(routes[1].call(&context(Method::GET, "/users")).status, 200);
}

#[test]
fn test_registering_both_slash_variants_yields_two_routes() {
    let mut app = App::new();
    app.get("/a", ok_handler, RegisterHook::new()).unwrap();
    app.get("/a/", ok_handler, RegisterHook::new()).unwrap();

    let routes = app.routes();
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().all(|r| !r.alias));
    assert_eq!(
        routes.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
        vec!["/a", "/a/"]
    );
}

#[test]
fn test_double_slash_does_not_collide_with_root() {
    let mut app = App::new();
    app.get("//", ok_handler, RegisterHook::new()).unwrap();
    app.get("/", ok_handler, RegisterHook::new()).unwrap();
    assert_eq!(app.routes().len(), 2);
    assert!(app.get("/", ok_handler, RegisterHook::new()).is_err());
}

#[test]
fn test_route_schema_validates_context() {
    let schema = RouteSchema::default()
        .body(json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        }))
        .query(json!({
            "type": "object",
            "properties": { "limit": { "type": "string", "pattern": "^[0-9]+$" } }
        }));

    let mut app = App::new();
    app.post("/pets", ok_handler, RegisterHook::new().schema(schema))
        .unwrap();
    let route = &app.routes()[0];
    assert!(route.schema.is_some());

    let ok = context(Method::POST, "/pets?limit=10").with_body(json!({"name": "rex"}));
    assert!(route.validators.validate_context(&ok).is_ok());

    let bad_body = context(Method::POST, "/pets").with_body(json!({"name": 7}));
    let err = route.validators.validate_context(&bad_body).unwrap_err();
    assert_eq!(err.part, SchemaPart::Body);
    assert!(!err.errors.is_empty());

    let missing_body = context(Method::POST, "/pets");
    assert_eq!(
        route.validators.validate_context(&missing_body).unwrap_err().part,
        SchemaPart::Body
    );

    let bad_query = context(Method::POST, "/pets?limit=ten").with_body(json!({"name": "rex"}));
    assert_eq!(
        route.validators.validate_context(&bad_query).unwrap_err().part,
        SchemaPart::Query
    );
}

#[test]
fn test_route_without_schema_accepts_anything() {
    let mut app = App::new();
    app.post("/free", ok_handler, RegisterHook::new()).unwrap();
    let ctx = context(Method::POST, "/free").with_body(json!([1, "two", null]));
    assert!(app.routes()[0].validators.validate_context(&ctx).is_ok());
}

#[derive(Deserialize)]
struct Greeting {
    greeting: String,
}

#[derive(Deserialize)]
struct Lang {
    #[serde(default)]
    lang: Option<String>,
}

#[derive(Deserialize)]
struct UserParams {
    id: String,
}

#[derive(Serialize)]
struct Reply {
    message: String,
}

struct Greet;

impl TypedHandler for Greet {
    type Body = Greeting;
    type Query = Lang;
    type Params = UserParams;
    type Response = Reply;

    fn handle(&self, req: TypedRequest<Greeting, Lang, UserParams>) -> Reply {
        Reply {
            message: format!(
                "{} {} ({})",
                req.body.greeting,
                req.params.id,
                req.query.lang.unwrap_or_else(|| "en".into())
            ),
        }
    }
}

#[test]
fn test_typed_handler_through_route() {
    let mut app = App::new();
    app.post("/users/:id/greet", typed(Greet), RegisterHook::new())
        .unwrap();
    let route = &app.routes()[0];

    let ctx = context(Method::POST, "/users/7/greet?lang=fr")
        .with_param("id", "7")
        .with_body(json!({"greeting": "salut"}));
    let res = route.call(&ctx);
    assert_eq!(res.status, 200);
    assert_eq!(res.body["message"], "salut 7 (fr)");

    let missing = context(Method::POST, "/users/7/greet").with_param("id", "7");
    let res = route.call(&missing);
    assert_eq!(res.status, 400);
    assert_eq!(res.body["part"], "body");
}
