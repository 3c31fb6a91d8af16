use crate::model::{LatencySummary, ScenarioResult};

/// Compute latency statistics over the successful results only.
///
/// Returns `None` when nothing succeeded, which callers must treat as "do not write a report".
/// Failed records never contribute to the averages, so the timeout sentinel cannot skew them.
pub fn summarize(results: &[ScenarioResult]) -> Option<LatencySummary> {
    let times: Vec<f64> = results
        .iter()
        .filter(|result| result.success)
        .filter_map(|result| result.response_time_ms)
        .collect();

    if times.is_empty() {
        return None;
    }

    let sum: f64 = times.iter().sum();
    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(LatencySummary {
        total_tests: results.len(),
        successful_tests: times.len(),
        avg_response_time_ms: sum / times.len() as f64,
        min_response_time_ms: min,
        max_response_time_ms: max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twiml::TwimlBreakdown;
    use std::time::Duration;

    fn completed(label: &str, ms: f64) -> ScenarioResult {
        ScenarioResult::completed(label, ms, &TwimlBreakdown::default())
    }

    #[test]
    fn test_summary_over_four_successful_runs() {
        let results = vec![
            completed("a", 100.0),
            completed("b", 200.0),
            completed("c", 300.0),
            completed("d", 400.0),
        ];

        let summary = summarize(&results).expect("summary should exist");
        assert_eq!(summary.total_tests, 4);
        assert_eq!(summary.successful_tests, 4);
        assert_eq!(summary.avg_response_time_ms, 250.0);
        assert_eq!(summary.min_response_time_ms, 100.0);
        assert_eq!(summary.max_response_time_ms, 400.0);
    }

    #[test]
    fn test_failures_are_excluded_from_the_averages() {
        let results = vec![
            completed("a", 120.0),
            ScenarioResult::timed_out("b", Duration::from_secs(30)),
            ScenarioResult::failed("c", "connection refused".to_string()),
        ];

        let summary = summarize(&results).expect("summary should exist");
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.successful_tests, 1);
        assert_eq!(summary.avg_response_time_ms, 120.0);
        assert_eq!(summary.min_response_time_ms, 120.0);
        assert_eq!(summary.max_response_time_ms, 120.0);
    }

    #[test]
    fn test_no_successes_means_no_summary() {
        let results = vec![
            ScenarioResult::timed_out("a", Duration::from_secs(30)),
            ScenarioResult::failed("b", "connection refused".to_string()),
        ];
        assert!(summarize(&results).is_none());
    }

    #[test]
    fn test_empty_run_means_no_summary() {
        assert!(summarize(&[]).is_none());
    }
}
