use std::{any::type_name, fmt::Debug};

use http::Method;
use mime::APPLICATION_JSON;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    api::{
        error::{ServerError, WrongContentTypeError},
        Object,
    },
    model::ValidateModel,
};
use tracing::debug;

use crate::error::{ClientError, ResultContext};

mod categories;

mod workouts;

mod exercises;
pub use exercises::*;

#[cfg(target_arch = "wasm32")]
mod http_transport;
#[cfg(target_arch = "wasm32")]
pub use http_transport::*;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Scheme, host and port of the server, without a trailing path
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// A response with the parts [`json_request`] looks at
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request with an optional json body and hands back the raw response.
/// Only fails if no response was received at all
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RawResponse, ClientError>;
}

impl<T: Transport> Transport for &T {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RawResponse, ClientError> {
        T::send(self, method, url, body).await
    }
}

/// Validates and sends `body` and decodes the json answer
///
/// Non success responses are decoded as a [`ServerError`]. An empty success
/// response decodes as json `null` so routes answering `204 No Content` can be
/// requested with `R = ()`
pub async fn json_request<T, B, R>(
    transport: &T,
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<R, ClientError>
where
    T: Transport,
    B: Serialize + Debug + ValidateModel,
    R: DeserializeOwned,
{
    // Check the body is valid
    debug!(
        "json_request({method}, {url}, body type: {})",
        type_name::<B>()
    );
    if let Some(body) = body {
        body.validate()?;
    }

    let json_body = body
        .map(serde_json::to_string)
        .transpose()
        .with_context(|| format!("Converting {:?} to json body (for: {method} {url})", body))?;

    let response = transport
        .send(method.clone(), url, json_body)
        .await
        .with_context(|| format!("Sending {:?} to {method} {url}", body))?;

    if response.ok() && response.body.trim().is_empty() {
        debug!("json_request::empty response");
        return serde_json::from_value(Value::Null)
            .with_context(|| format!("Empty response from {method} {url}"));
    }

    // Check the content-type is what we're expecting
    let is_json = response
        .content_type
        .as_ref()
        .map_or(false, |v| v.starts_with(APPLICATION_JSON.essence_str()));
    if !is_json {
        return Err(WrongContentTypeError {
            expected: APPLICATION_JSON.to_string(),
            got: response.content_type,
            body: response.body,
        })
        .with_context(|| format!("Response from {method} {url}"));
    }

    if !response.ok() {
        let err = serde_json::from_str::<ServerError<Value>>(&response.body).with_context(|| {
            format!("Deserializing error response ({}) from {method} {url}", response.status)
        })?;
        return Err(err).with_context(|| format!("{method} {url}"));
    }

    debug!("json_request::deserialize");
    serde_json::from_str(&response.body).with_context(|| {
        format!(
            "Deserializing OK response ({}) from {method} {url}",
            type_name::<R>()
        )
    })
}

/// The server's routes, one method per operation
#[derive(Debug, Clone)]
pub struct Api<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn request<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + Debug + ValidateModel,
        R: DeserializeOwned,
    {
        json_request(&self.transport, method, &self.url(path), body).await
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        self.request(Method::GET, Object::Ping.path(), None::<&()>).await
    }
}
