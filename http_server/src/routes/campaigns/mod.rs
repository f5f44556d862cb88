use actix_web::web;

pub mod metrics;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/campaigns").configure(metrics::init_routes));
}
