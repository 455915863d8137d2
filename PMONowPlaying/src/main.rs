use pmonowcard::{api_rest, CardRenderer, CardState};
use pmonowconfig::get_config;
use pmonowfeed::{FeedSubscriber, SnapshotStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{signal, sync::broadcast};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let config = get_config();
    let store = SnapshotStore::new();

    // ========== PHASE 2 : Abonnement au flux ==========

    info!("📡 Starting track feed subscriber...");
    let (shutdown_tx, _) = broadcast::channel(1);

    let subscriber = FeedSubscriber::new(config.get_feed_url(), store.clone())?;
    info!("  - feed endpoint: {}", subscriber.url());

    let subscriber_handle = tokio::spawn({
        let shutdown_rx = shutdown_tx.subscribe();
        async move { subscriber.run(shutdown_rx).await }
    });

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🎨 Initializing card renderer...");
    let renderer = CardRenderer::new(
        config.get_theme_file(),
        Duration::from_secs(config.get_artwork_timeout_secs()),
    )?;

    let router = api_rest::create_router(CardState {
        store,
        renderer: Arc::new(renderer),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.get_http_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 HTTP server running at http://{}", addr);

    info!("✅ PMONowPlaying is ready!");
    info!("Press Ctrl+C to stop...");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.expect("failed to listen for ctrl_c");
            info!("Ctrl+C reçu, arrêt gracieux");
        })
        .await?;

    // Le serveur est arrêté : stopper aussi l'abonné au flux
    let _ = shutdown_tx.send(());
    let _ = subscriber_handle.await;

    Ok(())
}
