use contract_relay::config::Settings;
use contract_relay::Application;
use service_core::observability::{init_tracing, install_prometheus_recorder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // AppError already renders as "Configuration error: ...".
    let settings = Settings::load()?;

    init_tracing(
        "contract-relay",
        &settings.telemetry.log_level,
        settings.telemetry.otlp_endpoint.as_deref(),
    )?;

    let metrics = install_prometheus_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    let application = Application::build(settings, Some(metrics)).await?;
    application.run_until_stopped().await?;

    Ok(())
}
