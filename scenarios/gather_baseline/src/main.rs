use ivr_harness::prelude::*;

/// The webhook server under test. The baseline always runs against a local instance.
const BASE_URL: &str = "http://localhost:3000";

/// The fixed demo scenarios the baseline replays on every run.
fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "Termite Emergency",
            "Hi I have a termite emergency in Mosman",
            "baseline-test-1",
        ),
        Scenario::new(
            "Service Inquiry",
            "Do you service Cremorne what services do you offer",
            "baseline-test-2",
        ),
        Scenario::new(
            "Booking Request",
            "My name is John and I need to book a pest control treatment for Friday",
            "baseline-test-3",
        ),
        Scenario::new(
            "Business Hours",
            "What are your business hours",
            "baseline-test-4",
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let client = WebhookClient::new(BASE_URL)?;
    BaselineRun::new(scenarios()).execute(&client).await?;

    Ok(())
}
