//! Generic HTTP request handling
//!
//! Sending, status classification, logging and JSON parsing shared by every
//! endpoint of [`ProcurementClient`](crate::ProcurementClient). Each call site
//! builds its own `RequestBuilder`; this module only runs it.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502/503/504 become
    /// [`ProviderError::NetworkError`] here so the retry loop can see them.
    /// Every other status is returned to the caller for [`Self::check_status`].
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `endpoint` - resource name for logs and errors
    /// * `method_name` - `GET`, `POST`, `PUT` (logs only)
    /// * `url` - full URL (logs only)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{endpoint}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{endpoint}] Response Status: {status_code}");

        // Read Retry-After before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Gateway error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{endpoint}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Map a non-2xx status to a structured error.
    ///
    /// # Arguments
    /// * `status` - HTTP status code
    /// * `body` - response text, used as the raw message
    /// * `endpoint` - resource name
    /// * `resource` - identifier reported by [`ProviderError::NotFound`]
    pub fn check_status(
        status: u16,
        body: &str,
        endpoint: &str,
        resource: &str,
    ) -> Result<(), ProviderError> {
        let raw_message = Some(body.trim())
            .filter(|b| !b.is_empty())
            .map(truncate_for_log);
        let endpoint = endpoint.to_string();

        match status {
            200..=299 => Ok(()),
            401 => Err(ProviderError::Unauthorized {
                endpoint,
                raw_message,
            }),
            403 => Err(ProviderError::PermissionDenied {
                endpoint,
                raw_message,
            }),
            404 => Err(ProviderError::NotFound {
                endpoint,
                resource: resource.to_string(),
                raw_message,
            }),
            400 | 409 | 422 => Err(ProviderError::Rejected {
                endpoint,
                status,
                raw_message,
            }),
            500..=599 => Err(ProviderError::ServerError {
                endpoint,
                status,
                raw_message,
            }),
            _ => Err(ProviderError::Unknown {
                endpoint,
                raw_status: Some(status),
                raw_message: raw_message.unwrap_or_else(|| format!("HTTP {status}")),
            }),
        }
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, endpoint: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{endpoint}] JSON parse failed: {e}");
            log::error!(
                "[{endpoint}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request with retries on transient failures.
    ///
    /// Only [`ProviderError::is_retryable`] errors are retried. Backoff is
    /// exponential from 100ms, capped at 10s, unless the server sent
    /// `Retry-After` (capped at 30s).
    ///
    /// # Arguments
    /// * `max_retries` - maximum number of retries (0 means a single attempt)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, endpoint, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{endpoint}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, endpoint, method_name, url).await;
            };

            match Self::execute_request(req, endpoint, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        endpoint,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            endpoint: endpoint.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// `Retry-After` when rate limited (capped at 30s), exponential backoff otherwise.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
