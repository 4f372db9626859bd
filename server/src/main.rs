use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use std::sync::Arc;

use login_server::config::AppConfig;
use login_server::db::{DbGateway, MySqlConnector};
use login_server::handlers;
use login_server::session::{MemorySessionStore, SessionStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    // Try loading from current directory first, then from server/ directory
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("server/.env").ok();
    }

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting login server...");

    let config = AppConfig::from_env();
    log::info!(
        "Database target: {}@{}:{}/{}",
        config.db.user,
        config.db.host,
        config.db.port,
        config.db.database
    );

    let gateway = DbGateway::new(Arc::new(MySqlConnector::new(config.db.clone())));

    // The server still starts without a database; each request reports it.
    if let Err(err) = gateway.ensure_schema().await {
        log::warn!("Could not prepare users table: {}", err);
    }

    let session_store: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::new(config.session_expiry_hours));
    log::info!("Session expiry set to {} hours", config.session_expiry_hours);

    log::info!(
        "Starting HTTP server at {}:{}...",
        config.server_host,
        config.server_port
    );

    let gateway = web::Data::new(gateway);
    let session_store = web::Data::from(session_store);

    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .app_data(session_store.clone())
            .wrap(actix_middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
