#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use sheetviz::config::{self, load_configuration};
use sheetviz::http::server::run_http_server;
use sheetviz::http::state::HttpServerState;
use sheetviz::storage::storage_factory::create_storage_from_connection_string;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    info!("Connecting to storage: {}", config.storage_connection_string);
    let storage = create_storage_from_connection_string(&config.storage_connection_string)
        .await
        .context("Failed to create storage backend")?;
    storage
        .create_or_migrate()
        .await
        .context("Failed to prepare the storage backend")?;

    // Exit the program if a panic occurs
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        std::process::exit(1);
    }));

    let address = SocketAddr::from((config.endpoint, config.port));
    let state = HttpServerState {
        name: Arc::new("SheetViz".to_string()),
        storage: storage.clone(),
    };

    let result = run_http_server(state, address).await;

    if let Err(err) = storage.close().await {
        warn!("Failed to close storage: {}", err);
    }

    match result {
        Ok(_) => {
            info!("HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            error!("HTTP server failed: {}", err);
            Err(err)
        }
    }
}
