use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every HTTP route. `main.rs` adds middleware around this; tests
/// mount it bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Banner and health: /, /health
    cfg.configure(health::configure_routes);

    // Realtime: /ws
    cfg.configure(realtime::configure_routes);
}
