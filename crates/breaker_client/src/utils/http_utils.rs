use std::error::Error;
use std::time::Instant;

use async_trait::async_trait;
use http::Extensions;
use log::{debug, error, info};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, GENERIC_REQUEST_ERROR};

/// Logs every request and its outcome. Bodies are never logged since they
/// carry tokens and OTP codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        info!("Sending {} request to {}", method, url.path());
        let start_time = Instant::now();

        match next.run(req, extensions).await {
            Ok(resp) => {
                info!(
                    "Got response from {} after {:?} with status {}",
                    url.path(),
                    start_time.elapsed(),
                    resp.status()
                );
                Ok(resp)
            }
            Err(e) => {
                error!("Failed HTTP request to {}: {}", url, e);
                if let reqwest_middleware::Error::Reqwest(inner) = &e {
                    if inner.is_timeout() {
                        error!("Request timed out");
                    }
                    if inner.is_connect() {
                        error!("Connection error");
                    }
                    if let Some(source) = inner.source() {
                        debug!("Error source: {:?}", source);
                    }
                }
                Err(e)
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turns a response into its JSON envelope.
///
/// Non-2xx responses become [`ApiError::Status`] carrying the body's
/// `message`, or a generic message when there is none.
pub async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_REQUEST_ERROR.to_string());
        debug!("API rejected request with status {status}: {message}");
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_slice::<T>(&body).map_err(|e| {
        error!("Failed to decode API response ({} bytes): {e}", body.len());
        ApiError::Decode(e.to_string())
    })
}
