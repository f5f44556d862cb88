use actix_web::web;

pub mod change_preview;
pub mod subscription_status;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stores/{store_id}/billing")
            .configure(subscription_status::init_routes)
            .configure(change_preview::init_routes),
    );
}
