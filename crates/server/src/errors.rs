use deadpool_sqlite::HookError;
use shared::api::error::{Nothing, ServerError};

/// Converts a failure while preparing a pooled connection into the error the
/// pool hooks expect
pub fn hook_error(err: ServerError<Nothing>) -> HookError {
    HookError::Message(err.to_string().into())
}
