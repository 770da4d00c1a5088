//! Single binary web server exposing the tournament REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env (or .env): HOST, PORT,
//! INACTIVITY_TIMEOUT_SECS, CLEANUP_INTERVAL_SECS.

use actix_web::{App, HttpServer};
use bracket_tournament_web::config::ServerConfig;
use bracket_tournament_web::http::{configure, new_state, remove_inactive};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = new_state();

    // Background task: periodically remove tournaments nobody has touched for a while.
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    let mut interval = tokio::time::interval(config.cleanup_interval);
    actix_web::rt::spawn(async move {
        loop {
            interval.tick().await;
            let removed = remove_inactive(&state_cleanup, timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}s)",
                    removed,
                    timeout.as_secs()
                );
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
