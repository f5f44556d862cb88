pub mod billing;
pub mod campaigns;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(billing::init_routes)
            .configure(campaigns::init_routes),
    );
}
