use actix_files::Files;
use actix_web::{App, HttpServer, cookie::Key, web};
use api_auth::session::MemorySessionStore;
use bloomhaven::{cors, routes};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let cookie_secure = config.is_production();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(config.log_file.as_deref()).expect("Failed to set up logger");
    }

    // init db connection, schema and plant catalog
    let pool = db::setup(&config.database_url, config.num_workers as u32 * 2)
        .await
        .expect("Failed to set up database");

    // one key and one store shared by every worker
    let key = match config.session_secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => panic!("SESSION_SECRET is not usable as a cookie key: {}", e),
        None => {
            log::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            Key::generate()
        }
    };
    let sessions = MemorySessionStore::new();

    log::info!(
        "Bloom Haven listening on {}:{} ({})",
        config.server_host,
        config.server_port,
        config.environment
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 3rd
            .wrap(api_auth::session_middleware(
                sessions.clone(),
                key.clone(),
                cookie_secure,
                config_data.session_ttl_hours,
            )) // 2nd
            .wrap(cors::middleware(origin.as_deref())) // 1st
            .configure(routes)
            .service(Files::new("/images", &config_data.images_dir))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
