use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware for the configured browser origins.
///
/// Only the methods the server actually exposes are allowed; the websocket
/// upgrade is a plain GET.
pub fn cors_middleware(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
