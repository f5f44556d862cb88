use actix_web::web;
use billing::data_transfer::{ChangeMode, PlanChangeRequest};
use billing::plan_catalog::{classify_plan_change, PlanChangeType};
use entities::subscriptions::StoreId;
use serde::Serialize;
use uuid::Uuid;

use crate::app_container::Application;
use crate::errors::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePreviewResponse {
    mode: ChangeMode,
    change_type: PlanChangeType,
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn preview_plan_change(
    store_id: web::Path<Uuid>,
    data: web::Json<PlanChangeRequest>,
    app: web::Data<Application>,
) -> Result<web::Json<ChangePreviewResponse>, ApiError> {
    let store_id = StoreId::from(store_id.into_inner());
    let snapshot = app
        .repository
        .get_subscription_snapshot(store_id)
        .await
        .map_err(ApiError::InternalServerError)?
        .unwrap_or_default();

    let request = data.into_inner();
    let mode = app.billing.decide_change_mode(&snapshot, &request);
    let change_type = classify_plan_change(
        snapshot.resolved_plan_code().as_ref(),
        request.normalized_plan_code().as_ref(),
    );

    Ok(web::Json(ChangePreviewResponse { mode, change_type }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/change-preview")
            .service(web::resource("").route(web::post().to(preview_plan_change))),
    );
}
