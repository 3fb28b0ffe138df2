use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_server::{
    config::Config,
    db::Database,
    routes::auth::hash_password,
    services::mailer::{LogNotifier, Notifier, SmtpNotifier},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `folio-server hash-password <password>` prints a value for ADMIN_PASSWORD_HASH
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().context("usage: folio-server hash-password <password>")?;
        println!("{}", hash_password(&password)?);
        return Ok(());
    }

    // Load configuration
    let config = Config::from_env();

    // Ensure media directory exists
    std::fs::create_dir_all(&config.media_path)?;

    // Initialize database
    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.run_migrations().await?;

    let notifier: Arc<dyn Notifier> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpNotifier::new(smtp, &config.default_from_email)?),
        None => {
            tracing::warn!("SMTP_HOST is not set; contact notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };

    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH is not set; admin login is disabled");
    }

    let port = config.port;
    let state = AppState::new(db, config, notifier)?;
    let app = folio_server::app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
