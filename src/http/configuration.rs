use std::fmt;
use std::time::Duration;

use http::Method;

/// Transport settings shared by every request a client issues.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpClientConfiguration {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Number of retries after the first attempt
    pub number_of_retries: u32,
    /// Multiplier for exponential backoff
    pub backoff_factor: f64,
    /// Delay before the first retry
    pub retry_interval: Duration,
    /// Upper bound for any single delay
    pub maximum_retry_wait_time: Duration,
    /// Response status codes that trigger a retry
    pub status_codes_to_retry: Vec<u16>,
    /// Only requests with these methods are retried
    pub request_methods_to_retry: Vec<Method>,
}

impl Default for HttpClientConfiguration {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(100),
            number_of_retries: 0,
            backoff_factor: 2.0,
            retry_interval: Duration::from_secs(1),
            maximum_retry_wait_time: Duration::from_secs(120),
            status_codes_to_retry: vec![408, 413, 429, 500, 502, 503, 504, 521, 522, 524],
            request_methods_to_retry: vec![Method::GET, Method::PUT],
        }
    }
}

impl HttpClientConfiguration {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_number_of_retries(mut self, number_of_retries: u32) -> Self {
        self.number_of_retries = number_of_retries;
        self
    }

    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = backoff_factor;
        self
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn with_maximum_retry_wait_time(mut self, maximum_retry_wait_time: Duration) -> Self {
        self.maximum_retry_wait_time = maximum_retry_wait_time;
        self
    }

    pub fn with_status_codes_to_retry(mut self, status_codes: Vec<u16>) -> Self {
        self.status_codes_to_retry = status_codes;
        self
    }

    pub fn with_request_methods_to_retry(mut self, methods: Vec<Method>) -> Self {
        self.request_methods_to_retry = methods;
        self
    }

    /// Delay to wait before the retry following `attempt` (1-based).
    ///
    /// Never exceeds `maximum_retry_wait_time`. A negative or NaN product
    /// yields no delay.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.retry_interval.as_secs_f64() * self.backoff_factor.powi(exponent);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.maximum_retry_wait_time)
            .min(self.maximum_retry_wait_time)
    }
}

impl fmt::Display for HttpClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timeout = {:?}, NumberOfRetries = {}, BackoffFactor = {}, RetryInterval = {:?}, MaximumRetryWaitTime = {:?}",
            self.timeout,
            self.number_of_retries,
            self.backoff_factor,
            self.retry_interval,
            self.maximum_retry_wait_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_backoff() {
        let config = HttpClientConfiguration::default()
            .with_retry_interval(Duration::from_millis(100))
            .with_backoff_factor(2.0)
            .with_maximum_retry_wait_time(Duration::from_millis(350));

        assert_eq!(config.retry_delay(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay(2), Duration::from_millis(200));
        assert_eq!(config.retry_delay(3), Duration::from_millis(350));
    }

    #[test]
    fn test_defaults_do_not_retry() {
        let config = HttpClientConfiguration::default();
        assert_eq!(config.number_of_retries, 0);
        assert!(config.status_codes_to_retry.contains(&503));
        assert!(!config.request_methods_to_retry.contains(&Method::POST));
    }

    #[test]
    fn test_retry_delay_negative_backoff_is_zero() {
        let config = HttpClientConfiguration::default().with_backoff_factor(-2.0);
        assert_eq!(config.retry_delay(1), Duration::from_secs(1));
        assert_eq!(config.retry_delay(2), Duration::ZERO);
        assert_eq!(config.retry_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_retry_delay_overflow_is_capped() {
        let config = HttpClientConfiguration::default()
            .with_retry_interval(Duration::from_secs(u64::MAX / 2))
            .with_maximum_retry_wait_time(Duration::MAX);
        assert_eq!(config.retry_delay(5), Duration::MAX);

        let config = HttpClientConfiguration::default()
            .with_backoff_factor(f64::INFINITY)
            .with_maximum_retry_wait_time(Duration::from_secs(30));
        assert_eq!(config.retry_delay(2), Duration::from_secs(30));
    }
}
