use crate::model::{HealthSnapshot, LatencySummary, ScenarioResult};
use crate::twiml::TwimlBreakdown;
use std::path::Path;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Placeholder for health fields the server did not report.
const UNKNOWN: &str = "unknown";

#[derive(Tabled)]
struct ScenarioRow {
    scenario: String,
    #[tabled(display = "opt_float2")]
    response_time_ms: Option<f64>,
    success: bool,
    #[tabled(display = "opt_count")]
    tts: Option<usize>,
    #[tabled(display = "opt_count")]
    fallback: Option<usize>,
}

fn opt_float2(n: &Option<f64>) -> String {
    match n {
        Some(n) => format!("{:.2}", n),
        None => "-".to_string(),
    }
}

fn opt_count(n: &Option<usize>) -> String {
    match n {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

pub(crate) fn print_banner() {
    println!("BASELINE PERFORMANCE TEST");
    println!("{}", "=".repeat(50));
}

pub(crate) fn print_health(snapshot: &HealthSnapshot) {
    println!(
        "Server status: {}",
        snapshot.status.as_deref().unwrap_or(UNKNOWN)
    );
    println!(
        "Database: {}",
        snapshot.services.database.as_deref().unwrap_or(UNKNOWN)
    );
    println!(
        "Redis: {}",
        snapshot.services.redis.as_deref().unwrap_or(UNKNOWN)
    );
}

pub(crate) fn print_scenario_header(name: &str) {
    println!("\nTesting: {}", name);
    println!("{}", "-".repeat(40));
}

pub(crate) fn print_gather_outcome(response_time_ms: f64, breakdown: &TwimlBreakdown) {
    println!("Response time: {:.2}ms", response_time_ms);
    println!("Status: success");
    println!("Synthesised TTS segments: {}", breakdown.tts_instances);
    println!("Fallback TTS segments: {}", breakdown.fallback_instances);

    if let Some(gather_timeout) = &breakdown.gather_timeout {
        println!("Gather timeout: {}s", gather_timeout);
    }
    if let Some(speech_timeout) = &breakdown.speech_timeout {
        println!("Speech timeout: {}s", speech_timeout);
    }

    if breakdown.has_error_marker {
        println!("Warning: response contains error indicators");
    }
}

pub(crate) fn print_timed_out(budget: Duration) {
    println!("Request timed out after {} seconds", budget.as_secs());
}

pub(crate) fn print_request_failed(error: &str) {
    println!("Request failed: {}", error);
}

pub(crate) fn print_unreachable(error: &str) {
    println!("Cannot connect to server: {}", error);
}

/// Print the closing summary: the headline statistics followed by a per-scenario table.
pub(crate) fn print_summary(results: &[ScenarioResult], summary: &LatencySummary) {
    println!("\nBASELINE SUMMARY");
    println!("{}", "=".repeat(30));
    println!("Total scenarios tested: {}", summary.total_tests);
    println!("Successful tests: {}", summary.successful_tests);
    println!("Average response time: {:.2}ms", summary.avg_response_time_ms);
    println!("Min response time: {:.2}ms", summary.min_response_time_ms);
    println!("Max response time: {:.2}ms", summary.max_response_time_ms);

    let rows = results
        .iter()
        .map(|result| ScenarioRow {
            scenario: result.scenario.clone(),
            response_time_ms: result.response_time_ms,
            success: result.success,
            tts: result.tts_instances,
            fallback: result.fallback_instances,
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

pub(crate) fn print_report_saved(path: &Path) {
    println!("\nResults saved to {}", path.display());
}

pub(crate) fn print_no_successes() {
    println!("\nNo successful tests to analyze");
}
