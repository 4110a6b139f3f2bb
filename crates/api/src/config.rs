//! Process configuration from the environment.

use std::path::PathBuf;

/// Settings consumed at startup.
///
/// `DATABASE_URL` selects the storage backend: set, the API runs against
/// Postgres; unset, it runs on in-memory stores (which start empty on every
/// boot, hence the seed flag only applies there).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub public_dir: PathBuf,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "PORT is not a valid port number; using 8080");
                8080
            }),
            Err(_) => 8080,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
        }

        let public_dir = std::env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let seed_demo_data = std::env::var("SEED_DEMO_DATA")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            port,
            database_url,
            public_dir,
            seed_demo_data,
        }
    }
}
