use serde_json::Value;
use shared::api::error::{ServerError, ValidationError, WrongContentTypeError};
use thiserror::Error;

/// Everything that can go wrong talking to the server or the browser
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request never got a response, e.g. the network is down
    #[error("Request failed: {message}")]
    Request { message: String },
    /// The server answered with an error body. The typed inner error of the
    /// route is kept as json so every route can share this variant
    #[error("Server error: {inner}")]
    Server { inner: ServerError<Value> },
    #[error("Invalid request: {inner}")]
    Validation { inner: ValidationError },
    #[error("{inner}")]
    WrongContentType { inner: WrongContentTypeError },
    #[error("Json error: {message}")]
    Json { message: String },
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("{context}: {inner}")]
    WithContext { context: String, inner: Box<Self> },
}

impl ClientError {
    /// The server error under any added context
    pub fn server_error(&self) -> Option<&ServerError<Value>> {
        match self {
            ClientError::Server { inner } => Some(inner),
            ClientError::WithContext { inner, .. } => inner.server_error(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.server_error()
            .map_or(false, |e| e.status_code() == http::StatusCode::NOT_FOUND)
    }
}

impl From<ServerError<Value>> for ClientError {
    fn from(inner: ServerError<Value>) -> Self {
        Self::Server { inner }
    }
}

impl From<ValidationError> for ClientError {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

impl From<WrongContentTypeError> for ClientError {
    fn from(inner: WrongContentTypeError) -> Self {
        Self::WrongContentType { inner }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo::net::Error> for ClientError {
    fn from(err: gloo::net::Error) -> Self {
        Self::Request {
            message: format!("gloo-net error: {err}"),
        }
    }
}

pub trait ErrorContext<E> {
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> E;
    fn context<S: Into<String>>(self, context: S) -> E;
}

impl<E: Into<ClientError>> ErrorContext<ClientError> for E {
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> ClientError {
        self.context(context())
    }

    fn context<S: Into<String>>(self, context: S) -> ClientError {
        ClientError::WithContext {
            context: context.into(),
            inner: Box::new(self.into()),
        }
    }
}

pub trait ResultContext<T> {
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> Result<T, ClientError>;
    fn context<S: Into<String>>(self, context: S) -> Result<T, ClientError>;
}

impl<T, E: Into<ClientError>> ResultContext<T> for Result<T, E> {
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> Result<T, ClientError> {
        self.map_err(|e| ErrorContext::with_context(e, context))
    }

    fn context<S: Into<String>>(self, context: S) -> Result<T, ClientError> {
        self.map_err(|e| ErrorContext::context(e, context))
    }
}
