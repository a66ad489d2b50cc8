//! # Route Schema Validation
//!
//! A route may declare a JSON Schema for each request part (`body`, `header`,
//! `query`, `params`) and for its `response`. Each declared part is compiled
//! once, at registration, into a [`jsonschema::Validator`] shared through `Arc`.
//!
//! Parts are independent: a part without a schema is unconstrained and always
//! passes, it is never rejected.

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::context::Context;

/// Which part of the exchange a schema constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaPart {
    Body,
    Header,
    Query,
    Params,
    Response,
}

impl SchemaPart {
    pub const ALL: [SchemaPart; 5] = [
        SchemaPart::Body,
        SchemaPart::Header,
        SchemaPart::Query,
        SchemaPart::Params,
        SchemaPart::Response,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaPart::Body => "body",
            SchemaPart::Header => "header",
            SchemaPart::Query => "query",
            SchemaPart::Params => "params",
            SchemaPart::Response => "response",
        }
    }
}

impl fmt::Display for SchemaPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional per-part JSON Schemas declared on a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSchema {
    pub body: Option<Value>,
    pub header: Option<Value>,
    pub query: Option<Value>,
    pub params: Option<Value>,
    pub response: Option<Value>,
}

impl RouteSchema {
    #[must_use]
    pub fn get(&self, part: SchemaPart) -> Option<&Value> {
        match part {
            SchemaPart::Body => self.body.as_ref(),
            SchemaPart::Header => self.header.as_ref(),
            SchemaPart::Query => self.query.as_ref(),
            SchemaPart::Params => self.params.as_ref(),
            SchemaPart::Response => self.response.as_ref(),
        }
    }

    #[must_use]
    pub fn body(mut self, schema: Value) -> Self {
        self.body = Some(schema);
        self
    }

    #[must_use]
    pub fn header(mut self, schema: Value) -> Self {
        self.header = Some(schema);
        self
    }

    #[must_use]
    pub fn query(mut self, schema: Value) -> Self {
        self.query = Some(schema);
        self
    }

    #[must_use]
    pub fn params(mut self, schema: Value) -> Self {
        self.params = Some(schema);
        self
    }

    #[must_use]
    pub fn response(mut self, schema: Value) -> Self {
        self.response = Some(schema);
        self
    }
}

/// A schema part that failed to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCompileError {
    pub part: SchemaPart,
    pub message: String,
}

impl fmt::Display for SchemaCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} schema: {}", self.part, self.message)
    }
}

impl std::error::Error for SchemaCompileError {}

/// A value that did not conform to its part's schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub part: SchemaPart,
    /// One message per schema violation
    pub errors: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation: {}", self.part, self.errors.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Compiled validators for the parts a route declared.
#[derive(Clone, Default)]
pub struct RouteValidators {
    body: Option<Arc<Validator>>,
    header: Option<Arc<Validator>>,
    query: Option<Arc<Validator>>,
    params: Option<Arc<Validator>>,
    response: Option<Arc<Validator>>,
}

impl RouteValidators {
    /// Compile every declared part of `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first part whose schema is not a valid JSON Schema.
    pub fn compile(schema: &RouteSchema) -> Result<Self, SchemaCompileError> {
        let mut validators = RouteValidators::default();
        for part in SchemaPart::ALL {
            let Some(definition) = schema.get(part) else {
                continue;
            };
            match jsonschema::validator_for(definition) {
                Ok(compiled) => {
                    debug!(part = %part, "Schema validator compiled");
                    *validators.slot_mut(part) = Some(Arc::new(compiled));
                }
                Err(e) => {
                    error!(part = %part, error = %e, "Failed to compile JSON Schema");
                    return Err(SchemaCompileError {
                        part,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(validators)
    }

    fn slot(&self, part: SchemaPart) -> Option<&Arc<Validator>> {
        match part {
            SchemaPart::Body => self.body.as_ref(),
            SchemaPart::Header => self.header.as_ref(),
            SchemaPart::Query => self.query.as_ref(),
            SchemaPart::Params => self.params.as_ref(),
            SchemaPart::Response => self.response.as_ref(),
        }
    }

    fn slot_mut(&mut self, part: SchemaPart) -> &mut Option<Arc<Validator>> {
        match part {
            SchemaPart::Body => &mut self.body,
            SchemaPart::Header => &mut self.header,
            SchemaPart::Query => &mut self.query,
            SchemaPart::Params => &mut self.params,
            SchemaPart::Response => &mut self.response,
        }
    }

    #[must_use]
    pub fn has(&self, part: SchemaPart) -> bool {
        self.slot(part).is_some()
    }

    /// Validate `value` against `part`'s schema; parts without a schema pass.
    ///
    /// # Errors
    ///
    /// Returns every violation message when the value does not conform.
    pub fn validate(&self, part: SchemaPart, value: &Value) -> Result<(), ValidationError> {
        let Some(validator) = self.slot(part) else {
            return Ok(());
        };
        let errors: Vec<String> = validator.iter_errors(value).map(|e| e.to_string()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { part, errors })
        }
    }

    /// Validate body, headers, query and params of `ctx`, in that order.
    ///
    /// A missing body is validated as `null`, so a body schema rejects it
    /// unless it admits `null`.
    ///
    /// # Errors
    ///
    /// Returns the first part that fails.
    pub fn validate_context(&self, ctx: &Context) -> Result<(), ValidationError> {
        if self.has(SchemaPart::Body) {
            self.validate(SchemaPart::Body, ctx.body.as_ref().unwrap_or(&Value::Null))?;
        }
        if self.has(SchemaPart::Header) {
            self.validate(SchemaPart::Header, &ctx.headers_value())?;
        }
        if self.has(SchemaPart::Query) {
            self.validate(SchemaPart::Query, &ctx.query_value())?;
        }
        if self.has(SchemaPart::Params) {
            self.validate(SchemaPart::Params, &ctx.params_value())?;
        }
        Ok(())
    }
}

impl fmt::Debug for RouteValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = SchemaPart::ALL
            .iter()
            .filter(|p| self.has(**p))
            .map(SchemaPart::as_str)
            .collect();
        f.debug_struct("RouteValidators").field("parts", &parts).finish()
    }
}
