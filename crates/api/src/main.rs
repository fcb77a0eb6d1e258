use anyhow::Context;

use splitledger_infra::BalanceConfig;

const BIND_ADDR_ENV: &str = "SPLITLEDGER_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    splitledger_observability::init();

    let config = BalanceConfig::from_env();
    let app = splitledger_api::app::build_app(config);

    let addr = std::env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
