use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};

pub mod cors;

#[get("/")]
async fn welcome() -> Res<impl Responder> {
    Success::message("Welcome to Bloom Haven Nursery API")
}

/// Mounts every route of the API. Cart and order scopes require a logged-in session.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(common::http::json_config())
        .service(welcome)
        .service(
            web::scope("/api")
                .configure(api_auth::mount_auth)
                .service(api_plants::mount_plants())
                .service(api_cart::mount_cart().wrap(api_auth::auth_middleware()))
                .service(api_orders::mount_orders().wrap(api_auth::auth_middleware())),
        );
}
