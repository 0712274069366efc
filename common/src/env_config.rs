use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to bind the HTTP server, open the database,
/// build absolute image URLs, configure CORS and sign session cookies.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the SQLite database to open (created if missing).
    pub database_url: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// Public base address used to turn image paths into absolute URLs.
    pub public_url: String,
    /// The single allowed CORS origin. `None` reflects any caller origin.
    pub cors_allowed_origin: Option<String>,
    /// Directory served under `/images`.
    pub images_dir: String,
    /// Cookie signing/encryption secret, at least 64 bytes.
    pub session_secret: Option<String>,
    /// Lifetime of a server-side session in hours.
    pub session_ttl_hours: i64,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Optional file that receives a copy of the log output.
    pub log_file: Option<String>,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// All optional (with defaults):
    /// - `ENVIRONMENT`: "development" or "production" (default: "development")
    /// - `DATABASE_URL`: SQLite URL (default: "sqlite://bloomhaven.db")
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 5000)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `PUBLIC_URL`: Base for absolute image URLs (default: "http://127.0.0.1:5000")
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin, unset or "*" reflects any origin
    /// - `IMAGES_DIR`: Static image directory (default: "images")
    /// - `SESSION_SECRET`: Cookie key material; a random key is used when unset
    /// - `SESSION_TTL_HOURS`: Session lifetime (default: 168)
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Optional log file path
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://bloomhaven.db".to_string()),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.is_empty() && origin != "*"),
            images_dir: env::var("IMAGES_DIR").unwrap_or_else(|_| "images".to_string()),
            session_secret: env::var("SESSION_SECRET").ok(),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .unwrap_or(168),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            log_file: env::var("LOG_FILE").ok(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
