use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use location_tracker::{
    config::Config,
    handlers::AppState,
    router,
    services::{db, MongoLocationStore},
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "location_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast: an uncaught panic anywhere must take the process down with
    // a failure code instead of leaving a wounded task behind.
    std::panic::set_hook(Box::new(|info| {
        error!("Unrecoverable panic, exiting: {}", info);
        std::process::exit(1);
    }));

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting location tracker service");

    // The service cannot operate without storage: connection failure at
    // startup is fatal, with no retry loop.
    let client = match db::connect(&config.db_connection_string).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Connected to database");

    let store = MongoLocationStore::new(&client);
    if let Err(e) = store.ensure_indexes().await {
        warn!("Failed to create createdAt index: {}", e);
    }

    let state = AppState {
        store: Arc::new(store),
    };
    let app = router::build(&config, state).expect("Failed to build router");

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("HTTP server listening on {}", addr);

    // Serve in a task so the drain can be bounded: the oneshot tells axum to
    // stop accepting connections and finish in-flight requests.
    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            match result {
                Ok(Ok(())) => error!("HTTP server stopped unexpectedly"),
                Ok(Err(e)) => error!("HTTP server failed: {}", e),
                Err(e) => error!("HTTP server task panicked: {}", e),
            }
            client.shutdown().await;
            std::process::exit(1);
        }
        _ = shutdown_signal() => {
            info!("Termination signal received, draining in-flight requests");
        }
    }

    let _ = drain_tx.send(());
    let deadline = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(deadline, &mut server).await {
        Ok(Ok(Ok(()))) => info!("Listener drained"),
        Ok(Ok(Err(e))) => error!("HTTP server failed during drain: {}", e),
        Ok(Err(e)) => error!("HTTP server task panicked during drain: {}", e),
        Err(_) => {
            warn!(
                "Drain deadline of {}s exceeded, dropping remaining connections",
                config.shutdown_timeout_secs
            );
            server.abort();
        }
    }

    client.shutdown().await;
    info!("Database connection closed, shutting down");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate => {},
    }
}
