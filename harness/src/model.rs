use crate::twiml::TwimlBreakdown;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One fixed test case for the baseline.
///
/// The scenarios are literals compiled into the scenario binary. They are not read from any
/// external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Human-readable label used in the console report and the result record
    pub name: &'static str,
    /// The speech recognition result the server is told the caller produced
    pub speech: &'static str,
    /// The Twilio call identifier the request is attributed to
    pub call_sid: &'static str,
}

impl Scenario {
    pub fn new(name: &'static str, speech: &'static str, call_sid: &'static str) -> Self {
        Self {
            name,
            speech,
            call_sid,
        }
    }
}

/// Outcome of a single scenario.
///
/// Exactly one record is produced per scenario and it is never mutated afterwards. The optional
/// fields partition by outcome: a completed request carries the body breakdown, a timed out
/// request carries the `timeout` flag and the budget sentinel, and a transport failure carries
/// only the error text. Fields that do not apply to an outcome are omitted from the serialized
/// record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResult {
    /// The scenario label
    pub scenario: String,
    /// Wall-clock latency of the whole exchange, in milliseconds
    ///
    /// For a timed out request this is the configured time budget, not a measurement. Absent
    /// for transport failures where no meaningful duration exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
    /// Whether a response was received at all, whatever its HTTP status
    pub success: bool,
    /// Number of synthesised audio segments (`<Play>` tags) in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_instances: Option<usize>,
    /// Number of fallback text-to-speech segments (`<Say>` tags) in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_instances: Option<usize>,
    /// The gather `timeout="…"` attribute, when the response carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gather_timeout: Option<String>,
    /// The `speechTimeout="…"` attribute, when the response carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_timeout: Option<String>,
    /// Set to `true` when the request ran over its time budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<bool>,
    /// Failure text for transport errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioResult {
    /// Record for a request that completed with a response body.
    pub fn completed(scenario: &str, response_time_ms: f64, breakdown: &TwimlBreakdown) -> Self {
        Self {
            scenario: scenario.to_string(),
            response_time_ms: Some(response_time_ms),
            success: true,
            tts_instances: Some(breakdown.tts_instances),
            fallback_instances: Some(breakdown.fallback_instances),
            gather_timeout: breakdown.gather_timeout.clone(),
            speech_timeout: breakdown.speech_timeout.clone(),
            timeout: None,
            error: None,
        }
    }

    /// Record for a request that ran over its time budget.
    ///
    /// The reported latency is the budget itself, so repeated runs produce a stable sentinel
    /// rather than whatever the clock read when the request was abandoned.
    pub fn timed_out(scenario: &str, budget: Duration) -> Self {
        Self {
            scenario: scenario.to_string(),
            response_time_ms: Some(budget.as_millis() as f64),
            success: false,
            tts_instances: None,
            fallback_instances: None,
            gather_timeout: None,
            speech_timeout: None,
            timeout: Some(true),
            error: None,
        }
    }

    /// Record for a request that failed before a response arrived.
    pub fn failed(scenario: &str, error: String) -> Self {
        Self {
            scenario: scenario.to_string(),
            response_time_ms: None,
            success: false,
            tts_instances: None,
            fallback_instances: None,
            gather_timeout: None,
            speech_timeout: None,
            timeout: None,
            error: Some(error),
        }
    }
}

/// Latency statistics over the successful subset of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencySummary {
    /// Number of scenarios in the run, successful or not
    pub total_tests: usize,
    /// Number of scenarios that received a response
    pub successful_tests: usize,
    pub avg_response_time_ms: f64,
    pub min_response_time_ms: f64,
    pub max_response_time_ms: f64,
}

/// The persisted summary document for one baseline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineReport {
    /// When the report was produced, as a Unix timestamp in seconds
    pub timestamp: i64,
    pub summary: LatencySummary,
    /// Every scenario record from the run, in execution order
    pub detailed_results: Vec<ScenarioResult>,
}

impl BaselineReport {
    pub fn new(summary: LatencySummary, detailed_results: Vec<ScenarioResult>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            summary,
            detailed_results,
        }
    }
}

/// What the health endpoint reported.
///
/// Every field is optional: the probe renders missing fields as `unknown` rather than failing,
/// and only a body that is not JSON at all is treated as an error.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthSnapshot {
    pub status: Option<String>,
    #[serde(default)]
    pub services: ServiceHealth,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServiceHealth {
    pub database: Option<String>,
    pub redis: Option<String>,
}

/// Write the report to `path`, replacing any report from a previous run.
///
/// The document is pretty-printed so it can be read directly as well as parsed.
pub fn store_report(report: &BaselineReport, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Load a report produced by [store_report].
pub fn load_report(path: &Path) -> anyhow::Result<BaselineReport> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let report = serde_json::from_reader(reader)?;
    Ok(report)
}
