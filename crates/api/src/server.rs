//! Service lifecycle: first load, background refresh, HTTP serving, shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use catalog_infra::{AppConfig, CatalogStore, HttpFeedSource, RefreshCoordinator};

use crate::app::{build_app, AppServices};

/// Run the service until `shutdown` is cancelled.
///
/// The first catalog load must succeed before the listener is bound; if it
/// fails this returns the error and nothing is served.
pub async fn run(config: AppConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    info!(
        bind_addr = %config.bind_addr,
        refresh_interval_secs = config.refresh_interval.as_secs(),
        "starting catalog service"
    );

    let feed = HttpFeedSource::new(config.feed.url.clone(), config.feed.timeout)
        .context("failed to build feed client")?;
    let store = Arc::new(CatalogStore::new());
    let refresh = Arc::new(RefreshCoordinator::new(Arc::new(feed), store));

    let initial = refresh.refresh().await.context("initial catalog load failed")?;
    info!(product_count = initial.product_count, "initial catalog loaded");

    let periodic = Arc::clone(&refresh).spawn_periodic(config.refresh_interval, shutdown.clone());

    let services = AppServices::new(refresh, config.visma, reqwest::Client::new());
    let app = build_app(services);

    let served = serve(config.bind_addr, app, shutdown.clone()).await;

    // Stop the refresh loop whether serving ended cleanly or not.
    shutdown.cancel();
    periodic.await.context("periodic refresh task panicked")?;
    served?;

    info!("catalog service stopped");
    Ok(())
}

async fn serve(
    addr: std::net::SocketAddr,
    app: axum::Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("server crashed")
}
