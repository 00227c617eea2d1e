use gloo::net::http::Request;
use http::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use mime::APPLICATION_JSON;

use super::{RawResponse, Transport};
use crate::error::{ClientError, ResultContext};

/// Sends requests with the browser's `fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RawResponse, ClientError> {
        let builder = match method.as_str() {
            "POST" => Request::post(url),
            "PUT" => Request::put(url),
            "DELETE" => Request::delete(url),
            _ => Request::get(url),
        }
        .header(ACCEPT.as_str(), APPLICATION_JSON.essence_str());

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE.as_str(), APPLICATION_JSON.essence_str())
                .body(body),
            None => builder.build(),
        }
        .with_context(|| format!("Building {method} {url}"))?;

        let response = request.send().await?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE.as_str());
        let body = response
            .text()
            .await
            .with_context(|| format!("Extracting response body as text from {method} {url}"))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
