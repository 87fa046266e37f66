//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{cors_layer, create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database, Persistence, RedisSessionStore, SessionStore};
use crate::jobs::{connect_mailer, spawn_reminder_scheduler};
use crate::services::{ServiceContainer, Services};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    tracing::info!(?config, "Starting server");

    let db = Arc::new(
        Database::connect(&config)
            .await
            .map_err(|e| AppError::dependency(format!("Database connection failed: {}", e)))?,
    );

    let cache = Cache::connect(&config)
        .await
        .map_err(|e| AppError::dependency(format!("Redis connection failed: {}", e)))?;
    let sessions: Arc<dyn SessionStore> = Arc::new(RedisSessionStore::new(cache));

    let mailer = connect_mailer(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    let services = Services::new(uow, sessions.clone(), mailer, config.session_ttl_seconds());

    if args.no_reminders {
        tracing::info!("Reminder scheduler disabled");
    } else {
        spawn_reminder_scheduler(services.reminders(), config.reminder_time);
    }

    let app_state = AppState::from_config(&services, db, sessions, &config);
    let mut app = create_router(app_state);
    if let Some(layer) = config.frontend_url.as_deref().and_then(cors_layer) {
        app = app.layer(layer);
    }

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
