//! HTTP fetching with retry logic and status-code error mapping

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::error::AppError;

/// How many times and how fast a transient failure is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry::BASE_DELAY_MS),
        }
    }
}

/// Fetches the raw body of `url`.
///
/// - Retries whatever `AppError::is_retryable` accepts (429, 5xx, timeouts,
///   connection failures) with exponential backoff
/// - Caps each backoff step at the error's `retry_delay_seconds`
/// - Respects Retry-After headers (seconds) on retried responses
/// - Maps the final non-success status to a specific `AppError` variant
///
/// The body is returned untouched; decoding belongs to the caller.
#[instrument(skip(client, policy))]
pub(super) async fn fetch_bytes(
    client: &Client,
    url: &str,
    policy: RetryPolicy,
) -> Result<Bytes, AppError> {
    info!("Fetching data from URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = policy.base_delay;
    loop {
        let (error, retry_after) = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Response status: {}", response.status());
                let body = response.bytes().await.map_err(|e| {
                    error!("Failed to read response body from URL {}: {}", url, e);
                    AppError::ApiFetch(e)
                })?;
                debug!("Response length: {} bytes", body.len());
                return Ok(body);
            }
            Ok(response) => {
                let status = response.status();
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                let reason = status.canonical_reason().unwrap_or("Unknown error");
                (status_error(status.as_u16(), reason, url), retry_after)
            }
            Err(e) => (request_error(e, url), None),
        };

        if !error.is_retryable() || attempt >= policy.max_retries {
            error!("Request failed for URL {}: {}", url, error);
            return Err(error);
        }

        let wait = retry_after.unwrap_or_else(|| capped_backoff(backoff, &error));
        warn!(
            "{}. Retrying in {:?} (attempt {}/{})",
            error,
            wait,
            attempt + 1,
            policy.max_retries
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
        backoff = backoff.saturating_mul(2);
    }
}

/// The backoff step, never longer than the delay suggested for `error`
fn capped_backoff(backoff: Duration, error: &AppError) -> Duration {
    match error.retry_delay_seconds() {
        Some(cap) => backoff.min(Duration::from_secs(cap)),
        None => backoff,
    }
}

/// Maps a failed request (no response at all) to the matching transport error
fn request_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Maps a non-success HTTP status to the matching transport error
fn status_error(status_code: u16, reason: &str, url: &str) -> AppError {
    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_http_client_with_timeout;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 0,
            base_delay: Duration::from_millis(1),
        }
    }

    fn client() -> Client {
        create_http_client_with_timeout(5).unwrap()
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(404, "Not Found", "u"),
            AppError::ApiNotFound { .. }
        ));
        assert!(matches!(
            status_error(429, "Too Many Requests", "u"),
            AppError::ApiRateLimit { .. }
        ));
        assert!(matches!(
            status_error(400, "Bad Request", "u"),
            AppError::ApiClientError { status: 400, .. }
        ));
        assert!(matches!(
            status_error(503, "Service Unavailable", "u"),
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
        assert!(matches!(
            status_error(500, "Internal Server Error", "u"),
            AppError::ApiServerError { status: 500, .. }
        ));
    }

    #[test]
    fn test_backoff_is_capped_by_error_kind() {
        let long = Duration::from_secs(600);
        assert_eq!(
            capped_backoff(long, &AppError::network_timeout("u")),
            Duration::from_secs(retry::NETWORK_TIMEOUT_DELAY_SECONDS)
        );
        assert_eq!(
            capped_backoff(long, &AppError::api_rate_limit("m", "u")),
            Duration::from_secs(retry::RATE_LIMIT_DELAY_SECONDS)
        );
        let short = Duration::from_millis(250);
        assert_eq!(
            capped_backoff(short, &AppError::api_service_unavailable(503, "m", "u")),
            short
        );
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body_unchanged() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\":\"t1\"}]"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/teams", mock_server.uri());
        let body = fetch_bytes(&client(), &url, no_retry()).await.unwrap();
        assert_eq!(&body[..], b"[{\"id\":\"t1\"}]");
    }

    #[tokio::test]
    async fn test_fetch_bytes_maps_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/teams/missing", mock_server.uri());
        let error = fetch_bytes(&client(), &url, no_retry()).await.unwrap_err();
        assert!(matches!(error, AppError::ApiNotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_bytes_retries_server_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/players"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        };
        let url = format!("{}/players", mock_server.uri());
        let body = fetch_bytes(&client(), &url, policy).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }

    #[tokio::test]
    async fn test_fetch_bytes_gives_up_after_max_retries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&mock_server)
            .await;

        let policy = RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(1),
        };
        let url = format!("{}/standings", mock_server.uri());
        let error = fetch_bytes(&client(), &url, policy).await.unwrap_err();
        assert!(matches!(error, AppError::ApiServiceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&mock_server)
            .await;

        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        };
        let url = format!("{}/games", mock_server.uri());
        let error = fetch_bytes(&client(), &url, policy).await.unwrap_err();
        assert!(matches!(error, AppError::ApiClientError { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_rate_limited_requests_are_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaders"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leaders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        };
        let url = format!("{}/leaders", mock_server.uri());
        let body = fetch_bytes(&client(), &url, policy).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }
}
