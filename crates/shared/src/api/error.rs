use std::{error::Error, fmt};

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Inner error type for routes that have no typed failures of their own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl Error for Nothing {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongContentTypeError {
    pub expected: String,
    pub got: Option<String>,
    pub body: String,
}

impl fmt::Display for WrongContentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected content type {} but got {:?}",
            self.expected, self.got
        )
    }
}

impl Error for WrongContentTypeError {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    /// Turns the collected messages into a result, `Ok` if there were none
    pub fn check(error_messages: Vec<String>) -> Result<(), ValidationError> {
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.error_messages.join(", "))
    }
}

impl Error for ValidationError {}

/// The error body every route responds with
///
/// Serialized with an `error` tag so clients can tell a typed route failure
/// apart from a validation failure or a store failure without knowing `T`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ServerError<T> {
    Inner {
        #[serde(with = "http_serde::status_code")]
        code: StatusCode,
        inner: T,
    },
    Validation {
        inner: ValidationError,
    },
    Other {
        message: String,
    },
}

impl<T> ServerError<T> {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Inner { code, .. } => *code,
            ServerError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServerError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Prefixes the message of `Other` errors, typed errors are left alone
    pub fn context<S: Into<String>>(self, context: S) -> Self {
        match self {
            ServerError::Other { message } => ServerError::Other {
                message: format!("{}: {}", context.into(), message),
            },
            e => e,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { code, inner } => write!(f, "{code}: {inner}"),
            ServerError::Validation { inner } => write!(f, "{inner}"),
            ServerError::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> Error for ServerError<T> {}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        ServerError::Validation { inner }
    }
}

/// Builds a [`ServerError::Other`] from format args
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other {
            message: format!($($arg)*),
        }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use axum::{
        extract::rejection::{JsonRejection, PathRejection},
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use serde::Serialize;
    use tracing::error;

    use super::{ServerError, ValidationError};

    // Render ServerError into a json response with the matching status
    impl<T: Serialize> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            let code = self.status_code();
            if code.is_server_error() {
                if let ServerError::Other { message } = &self {
                    error!(%code, %message, "Responding with server error");
                }
            }
            (code, Json(self)).into_response()
        }
    }

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            other_error!("Database error: {err}")
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            other_error!("Database interaction failed: {err}")
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            other_error!("Failed to get a database connection: {err}")
        }
    }

    impl<T> From<sea_query::error::Error> for ServerError<T> {
        fn from(err: sea_query::error::Error) -> Self {
            other_error!("Query building failed: {err}")
        }
    }

    impl<T> From<serde_json::Error> for ServerError<T> {
        fn from(err: serde_json::Error) -> Self {
            other_error!("Json error: {err}")
        }
    }

    // Extractor rejections are answered as validation failures
    impl<T> From<JsonRejection> for ServerError<T> {
        fn from(rejection: JsonRejection) -> Self {
            ServerError::Validation {
                inner: ValidationError {
                    error_messages: vec![rejection.body_text()],
                },
            }
        }
    }

    impl<T> From<PathRejection> for ServerError<T> {
        fn from(rejection: PathRejection) -> Self {
            ServerError::Validation {
                inner: ValidationError {
                    error_messages: vec![rejection.body_text()],
                },
            }
        }
    }
}
