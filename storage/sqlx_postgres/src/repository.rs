use crate::configuration::Settings;
use sqlx::postgres::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    pg_pool: Arc<PgPool>,
}

impl Repository {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    #[cfg(not(test))]
    pub async fn new() -> anyhow::Result<Self> {
        use anyhow::Context;

        let settings = Settings::load()?;
        let pg_pool = PgPool::connect_with(settings.database.connect_options())
            .await
            .context("Failed to connect to DB")
            .map(Arc::new)?;

        Ok(Self { pg_pool })
    }

    /// Repository over a freshly created, fully migrated database with a
    /// random name, so concurrent test runs never share state.
    #[cfg(any(test, feature = "testing"))]
    pub async fn new_test_repo() -> Self {
        use sqlx::Executor;
        use sqlx::{Connection, PgConnection};
        use uuid::Uuid;

        let db_settings = Settings::load().unwrap().database;
        let connection_options = db_settings.connect_options_without_db();

        let mut connection = PgConnection::connect_with(&connection_options)
            .await
            .expect("Failed to connect to Postgres");

        let db_name = Uuid::new_v4();
        connection
            .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_name))
            .await
            .expect("Failed to create database.");

        let connection_pool =
            PgPool::connect_with(connection_options.database(&db_name.to_string()))
                .await
                .expect("Failed to connect to Postgres.");
        sqlx::migrate!()
            .run(&connection_pool)
            .await
            .expect("Failed to migrate the database");

        Self {
            pg_pool: Arc::new(connection_pool),
        }
    }
}
