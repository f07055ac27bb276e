use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use super::types::CheckStatus;
use crate::DEFAULT_TIMEOUT;
use crate::error::{CheckError, ConfigError};

/// Checker trait for liveness probes
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Probe `target` and return the response status code.
    ///
    /// Anything other than a 200 is reported as an error.
    async fn check(&self, target: &str) -> Result<u16, CheckError>;
}

/// HTTP/HTTPS GET checker
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("pulse/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, target: &str) -> Result<u16, CheckError> {
        let response = self.client.get(target).send().await.map_err(|e| {
            if e.is_timeout() { CheckError::Timeout } else { CheckError::Request(e) }
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(status.as_u16())
        } else {
            Err(CheckError::UnexpectedStatus(status.as_u16()))
        }
    }
}

/// Classification of one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: CheckStatus,
    pub observed_at: DateTime<Utc>,
}

/// Runs a [`Checker`] and folds every failure into [`CheckStatus::Down`].
#[derive(Clone)]
pub struct Prober {
    checker: Arc<dyn Checker>,
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober").finish_non_exhaustive()
    }
}

impl Prober {
    /// HTTP prober with the given per-request timeout
    pub fn http(timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(HttpChecker::new(timeout)?)))
    }

    pub fn new(checker: Arc<dyn Checker>) -> Self {
        Self { checker }
    }

    pub fn with_default_timeout() -> Result<Self, ConfigError> {
        Self::http(DEFAULT_TIMEOUT)
    }

    /// UP only on an exact 200. Never fails.
    pub async fn check(&self, target: &str) -> ProbeOutcome {
        let start = Instant::now();

        let status = match self.checker.check(target).await {
            Ok(code) if code == StatusCode::OK.as_u16() => CheckStatus::Up,
            Ok(code) => {
                tracing::warn!(target_url = target, code, "Probe returned non-200 status");
                CheckStatus::Down
            }
            Err(e) => {
                tracing::warn!(target_url = target, error = %e, "Probe failed");
                CheckStatus::Down
            }
        };

        tracing::debug!(
            target_url = target,
            %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Probe finished"
        );

        ProbeOutcome { status, observed_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_returning(code: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(code))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_200_is_up() {
        let server = server_returning(200).await;
        let prober = Prober::with_default_timeout().unwrap();

        let outcome = prober.check(&format!("{}/health", server.uri())).await;
        assert_eq!(outcome.status, CheckStatus::Up);
    }

    #[tokio::test]
    async fn test_non_200_is_down() {
        let prober = Prober::with_default_timeout().unwrap();

        for code in [201, 204, 404, 500, 503] {
            let server = server_returning(code).await;
            let outcome = prober.check(&format!("{}/health", server.uri())).await;
            assert_eq!(outcome.status, CheckStatus::Down, "status {code}");
        }
    }

    #[tokio::test]
    async fn test_checker_reports_reason() {
        let server = server_returning(503).await;
        let checker = HttpChecker::new(DEFAULT_TIMEOUT).unwrap();

        let result = checker.check(&format!("{}/health", server.uri())).await;
        assert!(matches!(result, Err(CheckError::UnexpectedStatus(503))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_down() {
        // Grab a free port, then close it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let prober = Prober::with_default_timeout().unwrap();
        let outcome = prober.check(&format!("http://{addr}/health")).await;
        assert_eq!(outcome.status, CheckStatus::Down);
    }

    #[tokio::test]
    async fn test_timeout_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let checker = HttpChecker::new(Duration::from_millis(200)).unwrap();
        let result = checker.check(&server.uri()).await;
        assert!(matches!(result, Err(CheckError::Timeout)), "{result:?}");

        let prober = Prober::new(Arc::new(checker));
        let started = Instant::now();
        let outcome = prober.check(&server.uri()).await;
        assert_eq!(outcome.status, CheckStatus::Down);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_malformed_url_is_down() {
        let prober = Prober::with_default_timeout().unwrap();
        let outcome = prober.check("not a url").await;
        assert_eq!(outcome.status, CheckStatus::Down);
    }
}
