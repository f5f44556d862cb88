use crate::app_container::Application;
use actix_web::{web, App, HttpServer};
use actix_web_opentelemetry::RequestTracing;
use anyhow::Context;
use sqlx_postgres::repository::Repository;
use tracing_actix_web::TracingLogger;

mod app_container;
mod errors;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("http_server");
    start().await?;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    Ok(())
}

async fn start() -> anyhow::Result<()> {
    let repository = Repository::new().await?;

    HttpServer::new(move || {
        let app = Application::new(repository.clone());
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestTracing::new())
            .configure(routes::config)
            .app_data(web::Data::new(app))
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
    .context("Server failed to run")
}
