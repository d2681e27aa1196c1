use actix_web::{web, App, HttpServer};
use sets_backend::middleware::cors::cors_middleware;
use sets_backend::middleware::structured_logger::StructuredLogger;
use sets_backend::telemetry;
use sets_backend::{routes, AppState, ServerConfig};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        origins = ?config.cors_origins,
        "Starting Sets game server"
    );

    let data = web::Data::new(AppState::new());
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
