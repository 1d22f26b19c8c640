use anyhow::Context;
use prudentia_flow::FlowError;
use prudentia_service::{ServiceConfig, create_app, init_tracing};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(ServiceConfig::log_format_from_env());

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(FlowError::MissingCredential(var)) => {
            error!("{} not set", var);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let app = create_app(config.inference);
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    let addr = listener.local_addr()?;

    info!("Prudentia service running on http://{}", addr);
    info!("Health check endpoint: http://{}/health", addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
