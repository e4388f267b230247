use std::future::Future;

use http::Method;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use super::{HttpClientConfiguration, HttpResponse};
use crate::error::{Error, Result};

/// Execute a request with the configured timeout and retry policy.
///
/// Requests whose method is not listed in `request_methods_to_retry` get a
/// single attempt.
pub async fn with_retry<F, Fut>(
    config: &HttpClientConfiguration,
    method: &Method,
    mut operation: F,
) -> Result<HttpResponse>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<HttpResponse>>,
{
    let max_attempts = if config.request_methods_to_retry.contains(method) {
        config.number_of_retries.saturating_add(1)
    } else {
        1
    };
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        debug!("Attempt {} of {}", attempt, max_attempts);
        let is_last = attempt == max_attempts;

        match timeout(config.timeout, operation()).await {
            Ok(Ok(response)) => {
                if is_last || !config.status_codes_to_retry.contains(&response.status) {
                    return Ok(response);
                }
                warn!("Attempt {} returned HTTP {}, retrying", attempt, response.status);
            }
            Ok(Err(e)) => {
                if !e.is_retryable() {
                    debug!("Error is not retryable: {}", e);
                    return Err(e);
                }
                warn!("Attempt {} failed: {}", attempt, e);
                last_error = Some(e);
            }
            Err(_) => {
                warn!("Attempt {} timed out after {:?}", attempt, config.timeout);
                last_error = Some(Error::Timeout(config.timeout));
            }
        }

        if !is_last {
            sleep(config.retry_delay(attempt)).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::Transport("Retry failed with no error captured".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_config(retries: u32) -> HttpClientConfiguration {
        HttpClientConfiguration::default()
            .with_number_of_retries(retries)
            .with_retry_interval(Duration::from_millis(1))
            .with_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_retry_success_on_second_attempt() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result = with_retry(&fast_config(3), &Method::GET, || {
            let count = attempt_count_clone.clone();
            async move {
                if count.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::Transport("connection reset".into()))
                } else {
                    Ok(HttpResponse::new(200, "ok"))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(attempt_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_on_status_code() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result = with_retry(&fast_config(2), &Method::GET, || {
            let count = attempt_count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(HttpResponse::new(503, ""))
            }
        })
        .await;

        // the final response is handed back for the caller to classify
        assert_eq!(result.unwrap().status, 503);
        assert_eq!(attempt_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_non_retryable_error() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result = with_retry(&fast_config(3), &Method::GET, || {
            let count = attempt_count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Err::<HttpResponse, _>(Error::Unauthorized("expired".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Unauthorized(_))));
        assert_eq!(attempt_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_method_not_retried() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result = with_retry(&fast_config(3), &Method::POST, || {
            let count = attempt_count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Err::<HttpResponse, _>(Error::Transport("refused".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(attempt_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let config = fast_config(1).with_timeout(Duration::from_millis(10));

        let result = with_retry(&config, &Method::GET, || async {
            sleep(Duration::from_secs(5)).await;
            Ok(HttpResponse::new(200, ""))
        })
        .await;

        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
