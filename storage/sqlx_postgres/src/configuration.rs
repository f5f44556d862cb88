use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DbSettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        config::<Settings>()
    }
}

#[derive(Debug, Deserialize)]
pub struct DbSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    username: String,
    password: Secret<String>,
    database_name: String,
    require_ssl: bool,
}

impl DbSettings {
    /// Options for the Postgres server itself, before a database is picked.
    /// The test bootstrap uses this to create a throwaway database first.
    pub fn connect_options_without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        self.connect_options_without_db()
            .database(&self.database_name)
    }
}
