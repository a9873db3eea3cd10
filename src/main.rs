use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use tokio::sync::broadcast::error::RecvError;

use pruefung_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate().map_err(std::io::Error::other)?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origins = config.allowed_origins.clone();

    let state = Arc::new(AppState::new(config).await.map_err(std::io::Error::other)?);

    let mut score_events = state.session_service.subscribe_scores();
    tokio::spawn(async move {
        loop {
            match score_events.recv().await {
                Ok(event) => log::debug!(
                    "Score carried: session {} {} = {}",
                    event.session_id,
                    event.stage,
                    event.value
                ),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Score event listener skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
