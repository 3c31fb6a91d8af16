pub mod client;
pub mod model;
pub mod report;
pub mod runner;
pub mod stats;
pub mod twiml;

pub mod prelude {
    pub use crate::client::{WebhookClient, WebhookError};
    pub use crate::model::{
        load_report, store_report, BaselineReport, HealthSnapshot, LatencySummary, Scenario,
        ScenarioResult,
    };
    pub use crate::runner::{run_scenario, BaselineRun, DEFAULT_REPORT_PATH};
    pub use crate::stats::summarize;
    pub use crate::twiml::{inspect, TwimlBreakdown};
}
