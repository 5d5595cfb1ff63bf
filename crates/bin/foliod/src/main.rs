//! # foliod — folio daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Load and validate the portfolio content
//! - Construct the EmailJS relay (adapter)
//! - Construct the session registry that owns one contact form controller
//!   per visitor, injecting the relay via the port trait
//! - Build the axum router, bind to a TCP port and serve
//! - Sweep idle sessions in the background
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod content;

use std::sync::Arc;
use std::time::Duration;

use folio_adapter_http_axum::router;
use folio_adapter_http_axum::sessions::ContactSessions;
use folio_adapter_http_axum::state::AppState;
use folio_adapter_relay_emailjs::EmailJsRelay;
use folio_app::ports::MessageRelay;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Content
    let profile = content::load(&config.content.path)?;
    tracing::info!(
        owner = %profile.owner.name,
        path = %config.content.path,
        "portfolio content loaded"
    );

    // Relay
    if !config.relay.is_configured() {
        tracing::warn!("EmailJS credentials are not configured, contact submissions will fail");
    }
    let relay = EmailJsRelay::new(&config.relay.emailjs())?;

    // Sessions
    let sessions = Arc::new(ContactSessions::new(
        relay,
        config.contact_config(),
        config.session_limits(),
    ));
    let sweeper = spawn_session_sweeper(Arc::clone(&sessions), config.contact.sweep_interval());

    // HTTP
    let state = AppState::from_arcs(Arc::new(profile), Arc::clone(&sessions));
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "foliod listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    sessions.shutdown();
    tracing::info!("foliod stopped");

    Ok(())
}

/// Periodically drop sessions that have been idle for longer than their TTL.
fn spawn_session_sweeper<R>(sessions: Arc<ContactSessions<R>>, every: Duration) -> JoinHandle<()>
where
    R: MessageRelay + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.evict_expired();
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
