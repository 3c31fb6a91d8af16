use crate::model::HealthSnapshot;
use anyhow::Context;
use std::time::Duration;
use url::Url;

/// Time budget for the health probe.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Time budget for a single gather request.
///
/// Also used as the reported latency sentinel when a request runs over budget, so a timed out
/// scenario always reports the full budget rather than a measured duration.
pub const GATHER_TIMEOUT: Duration = Duration::from_secs(30);

/// The recognition confidence the server is told to assume for every scenario.
const FIXED_CONFIDENCE: &str = "0.9";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("request exceeded its time budget")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(reqwest::Error),

    #[error("health body is not valid JSON: {0}")]
    MalformedHealth(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WebhookError::Timeout
        } else {
            WebhookError::Transport(err)
        }
    }
}

/// Client for the two endpoints the baseline exercises on the webhook server.
///
/// Requests are issued one at a time and block the run until they resolve or their per-request
/// time budget fires. There is no retry behaviour at this layer.
pub struct WebhookClient {
    http: reqwest::Client,
    health_url: Url,
    gather_url: Url,
    gather_timeout: Duration,
}

impl WebhookClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL `{}`", base_url))?;
        let health_url = base_url.join("health").context("Invalid health URL")?;
        let gather_url = base_url
            .join("twilio/gather")
            .context("Invalid gather URL")?;

        Ok(Self {
            http: reqwest::Client::new(),
            health_url,
            gather_url,
            gather_timeout: GATHER_TIMEOUT,
        })
    }

    /// Override the gather time budget.
    pub fn with_gather_timeout(mut self, gather_timeout: Duration) -> Self {
        self.gather_timeout = gather_timeout;
        self
    }

    pub fn gather_timeout(&self) -> Duration {
        self.gather_timeout
    }

    /// Probe the server's health endpoint.
    ///
    /// Any response counts as reachable, whatever its HTTP status. The body must parse as a
    /// [HealthSnapshot] document; a body that is not valid JSON is reported as
    /// [WebhookError::MalformedHealth] so the caller can treat it as fatal rather than as an
    /// unreachable server.
    pub async fn health(&self) -> Result<HealthSnapshot, WebhookError> {
        log::debug!("Probing {}", self.health_url);

        let response = self
            .http
            .get(self.health_url.clone())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(WebhookError::from)?;
        let body = response.text().await.map_err(WebhookError::from)?;

        let snapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }

    /// Issue one gather webhook request and hand back the raw response body.
    ///
    /// The form payload carries the scenario's call identifier and recognised speech, plus a
    /// fixed confidence value. The status line is deliberately ignored: the server speaks TwiML
    /// even on its error paths and the baseline inspects the body either way.
    pub async fn gather(&self, call_sid: &str, speech_result: &str) -> Result<String, WebhookError> {
        log::debug!("Posting gather for {} to {}", call_sid, self.gather_url);

        let params = [
            ("CallSid", call_sid),
            ("SpeechResult", speech_result),
            ("Confidence", FIXED_CONFIDENCE),
        ];

        let response = self
            .http
            .post(self.gather_url.clone())
            .form(&params)
            .timeout(self.gather_timeout)
            .send()
            .await
            .map_err(WebhookError::from)?;
        let body = response.text().await.map_err(WebhookError::from)?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_derived_from_base_url() {
        let client = WebhookClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.health_url.as_str(), "http://localhost:3000/health");
        assert_eq!(
            client.gather_url.as_str(),
            "http://localhost:3000/twilio/gather"
        );
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        assert!(WebhookClient::new("not a url").is_err());
    }
}
