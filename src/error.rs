//! Error types shared by hooks, registration and URL helpers.
//!
//! Lifecycle `error` hooks receive a [`HookError`], whose [`ErrorCode`] names the
//! framework-level failure. Registration failures surface as [`RouteError`],
//! URL parsing failures as [`UrlError`].

use std::fmt;

/// Framework error taxonomy passed to `error` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No route matched the request
    NotFound,
    /// A handler or hook failed
    InternalServerError,
    /// The request body exceeded the configured `body_limit`
    BodyLimit,
    /// Anything else
    Unknown,
}

impl ErrorCode {
    /// Wire name of the code (`NOT_FOUND`, `BODY_LIMIT`, ...)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::BodyLimit => "BODY_LIMIT",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// HTTP status used when no error hook produces a response
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::BodyLimit => 413,
            ErrorCode::InternalServerError | ErrorCode::Unknown => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value handed to lifecycle `error` hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    pub code: ErrorCode,
    pub message: String,
}

impl HookError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("no route for '{path}'"))
    }

    pub fn body_limit(len: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::BodyLimit,
            format!("body of {len} bytes exceeds limit of {limit} bytes"),
        )
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for HookError {}

/// URL could not be split into path and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// Input was the empty string
    Empty,
    /// Neither an absolute path nor `scheme://authority...`
    Malformed {
        url: String,
    },
    /// Scheme before `://` is empty or contains characters outside `[A-Za-z0-9+.-]`
    InvalidScheme {
        url: String,
    },
    /// Nothing between `://` and the path
    MissingAuthority {
        url: String,
    },
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::Empty => write!(f, "URL is empty"),
            UrlError::Malformed { url } => write!(
                f,
                "URL '{}' is neither an absolute path nor scheme://authority",
                url
            ),
            UrlError::InvalidScheme { url } => write!(f, "URL '{}' has an invalid scheme", url),
            UrlError::MissingAuthority { url } => {
                write!(f, "URL '{}' has no authority after the scheme", url)
            }
        }
    }
}

impl std::error::Error for UrlError {}

/// Route registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Route paths must start with `/`
    InvalidPath { path: String },
    /// The method and path pair is already taken by another explicit route
    Duplicate { method: String, path: String },
    /// A schema part did not compile
    Schema {
        path: String,
        part: &'static str,
        message: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidPath { path } => {
                write!(f, "route path '{}' must start with '/'", path)
            }
            RouteError::Duplicate { method, path } => {
                write!(f, "route {} '{}' is already registered", method, path)
            }
            RouteError::Schema {
                path,
                part,
                message,
            } => write!(
                f,
                "route '{}' has an invalid {} schema: {}",
                path, part, message
            ),
        }
    }
}

impl std::error::Error for RouteError {}
