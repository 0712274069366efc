use actix_cors::Cors;
use actix_web::http::header;

/// Credentialed CORS. With no configured origin every caller's origin is echoed back.
pub fn middleware(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
            header::SET_COOKIE,
        ])
        .expose_headers(&[header::SET_COOKIE])
        .supports_credentials()
        .max_age(3600)
}
