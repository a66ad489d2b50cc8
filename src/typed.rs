//! # Typed Handlers
//!
//! A route's schema describes the shape of its body, query, params and
//! response. [`TypedHandler`] states the same contract with Rust types: the
//! associated types are deserialized from the [`Context`] before the handler
//! runs, and the response is serialized back to JSON.
//!
//! ```
//! use brisk::typed::{typed, TypedHandler, TypedRequest};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct NewPet { name: String }
//!
//! #[derive(Serialize)]
//! struct Created { id: u64, name: String }
//!
//! struct AddPet;
//!
//! impl TypedHandler for AddPet {
//!     type Body = NewPet;
//!     type Query = serde_json::Value;
//!     type Params = serde_json::Value;
//!     type Response = Created;
//!
//!     fn handle(&self, req: TypedRequest<NewPet, serde_json::Value, serde_json::Value>) -> Created {
//!         Created { id: 1, name: req.body.name }
//!     }
//! }
//!
//! let mut app = brisk::App::new();
//! app.post("/pets", typed(AddPet), Default::default()).unwrap();
//! ```

use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::context::Context;
use crate::response::HandlerResponse;

/// Handler whose inputs and output are typed.
pub trait TypedHandler: Send + Sync + 'static {
    /// Request body; a missing body deserializes from `null`
    type Body: DeserializeOwned;
    /// Query parameters as a string-valued record
    type Query: DeserializeOwned;
    /// Path parameters as a string-valued record
    type Params: DeserializeOwned;
    type Response: Serialize;

    fn handle(&self, req: TypedRequest<Self::Body, Self::Query, Self::Params>) -> Self::Response;
}

/// Typed view of a [`Context`] passed to a [`TypedHandler`].
#[derive(Debug, Clone)]
pub struct TypedRequest<B, Q, P> {
    pub method: Method,
    pub path: String,
    pub body: B,
    pub query: Q,
    pub params: P,
}

impl<B, Q, P> TypedRequest<B, Q, P>
where
    B: DeserializeOwned,
    Q: DeserializeOwned,
    P: DeserializeOwned,
{
    /// Deserialize body, query and params of `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the part name and the serde error of the first part that fails.
    pub fn from_context(ctx: &Context) -> Result<Self, (&'static str, serde_json::Error)> {
        let body = B::deserialize(ctx.body.clone().unwrap_or(Value::Null)).map_err(|e| ("body", e))?;
        let query = Q::deserialize(ctx.query_value()).map_err(|e| ("query", e))?;
        let params = P::deserialize(ctx.params_value()).map_err(|e| ("params", e))?;
        Ok(TypedRequest {
            method: ctx.method.clone(),
            path: ctx.path.clone(),
            body,
            query,
            params,
        })
    }
}

/// Erase a [`TypedHandler`] into a plain route handler.
///
/// Deserialization failures answer `400` with the failing part; a successful
/// call answers `200` with the serialized response.
pub fn typed<H>(handler: H) -> impl Fn(&Context) -> HandlerResponse + Send + Sync + 'static
where
    H: TypedHandler,
{
    move |ctx: &Context| {
        let req = match TypedRequest::<H::Body, H::Query, H::Params>::from_context(ctx) {
            Ok(req) => req,
            Err((part, err)) => {
                warn!(
                    request_id = %ctx.request_id,
                    path = %ctx.path,
                    part = part,
                    error = %err,
                    "Typed request conversion failed"
                );
                return HandlerResponse::json(
                    400,
                    serde_json::json!({
                        "error": "Invalid request data",
                        "part": part,
                        "message": err.to_string()
                    }),
                );
            }
        };

        match serde_json::to_value(handler.handle(req)) {
            Ok(body) => HandlerResponse::json(200, body),
            Err(err) => HandlerResponse::json(
                500,
                serde_json::json!({
                    "error": "Failed to serialize response",
                    "message": err.to_string()
                }),
            ),
        }
    }
}
