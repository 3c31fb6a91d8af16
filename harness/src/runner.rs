use crate::client::{WebhookClient, WebhookError};
use crate::model::{store_report, BaselineReport, Scenario, ScenarioResult};
use crate::{report, stats, twiml};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Where the summary document lands, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "baseline-results.json";

/// Pause after each scenario so consecutive requests do not arrive back-to-back.
const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// A configured baseline run over a fixed list of scenarios.
///
/// The shipped scenario binary uses the defaults; the overrides exist so the run can be pointed
/// at a temporary report path and stripped of its pacing in tests.
pub struct BaselineRun {
    scenarios: Vec<Scenario>,
    pause: Duration,
    report_path: PathBuf,
}

impl BaselineRun {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            scenarios,
            pause: DEFAULT_PAUSE,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_report_path(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = report_path.into();
        self
    }

    /// Execute the run end to end: health probe, scenarios, summary, report file.
    ///
    /// An unreachable server stops the run before any scenario is issued and nothing is
    /// written. A reachable server whose health body is not valid JSON is a hard error.
    /// Individual scenario failures are recorded and the run continues; the report file is
    /// only written when at least one scenario succeeded.
    ///
    /// Returns every scenario record that was produced, in execution order.
    pub async fn execute(self, client: &WebhookClient) -> anyhow::Result<Vec<ScenarioResult>> {
        report::print_banner();

        match client.health().await {
            Ok(snapshot) => report::print_health(&snapshot),
            Err(err @ WebhookError::MalformedHealth(_)) => return Err(err.into()),
            Err(err) => {
                log::error!("Health probe failed: {:?}", err);
                report::print_unreachable(&err.to_string());
                return Ok(Vec::new());
            }
        }

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            results.push(run_scenario(client, scenario).await);
            tokio::time::sleep(self.pause).await;
        }

        match stats::summarize(&results) {
            Some(summary) => {
                report::print_summary(&results, &summary);
                let report_doc = BaselineReport::new(summary, results.clone());
                store_report(&report_doc, &self.report_path)?;
                report::print_report_saved(&self.report_path);
            }
            None => report::print_no_successes(),
        }

        Ok(results)
    }
}

/// Issue one gather request and convert whatever happened into a result record.
///
/// Latency is wall-clock time around the whole exchange, from issuing the request to having
/// the body in hand. A request that runs over budget reports the budget itself instead of a
/// measured time, and any other failure is captured as text; neither aborts the run.
pub async fn run_scenario(client: &WebhookClient, scenario: &Scenario) -> ScenarioResult {
    report::print_scenario_header(scenario.name);

    let started = Instant::now();
    match client.gather(scenario.call_sid, scenario.speech).await {
        Ok(body) => {
            let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
            let breakdown = twiml::inspect(&body);
            report::print_gather_outcome(response_time_ms, &breakdown);
            ScenarioResult::completed(scenario.name, response_time_ms, &breakdown)
        }
        Err(WebhookError::Timeout) => {
            report::print_timed_out(client.gather_timeout());
            ScenarioResult::timed_out(scenario.name, client.gather_timeout())
        }
        Err(err) => {
            log::error!("Gather request for {} failed: {:?}", scenario.name, err);
            report::print_request_failed(&err.to_string());
            ScenarioResult::failed(scenario.name, err.to_string())
        }
    }
}
