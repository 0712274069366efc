use actix_session::{
    SessionMiddleware,
    config::{BrowserSession, CookieContentSecurity},
};
use actix_web::{
    cookie::{Key, SameSite, time::Duration},
    web,
};
use middleware::auth::AuthMiddleware;
use session::MemorySessionStore;

pub mod routes {
    pub mod auth;
}
pub mod middleware {
    pub mod auth;
}
pub mod session;

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}
mod dtos {
    pub(crate) mod auth;
}

pub const SESSION_COOKIE_NAME: &str = "bloomhaven_session";

pub fn mount_auth(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::auth::post_signup)
        .service(routes::auth::post_login)
        .service(routes::auth::get_logout);
}

// Rejects requests without a logged-in user
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

/// Cookie-carried opaque session token backed by the shared server-side store.
/// Cross-origin credentialed requests need `SameSite=None`, which browsers only accept
/// on secure cookies.
pub fn session_middleware(
    store: MemorySessionStore,
    key: Key,
    cookie_secure: bool,
    ttl_hours: i64,
) -> SessionMiddleware<MemorySessionStore> {
    let same_site = if cookie_secure {
        SameSite::None
    } else {
        SameSite::Lax
    };

    SessionMiddleware::builder(store, key)
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(BrowserSession::default().state_ttl(Duration::hours(ttl_hours)))
        .build()
}
