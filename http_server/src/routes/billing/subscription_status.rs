use actix_web::web;
use billing::data_transfer::{BillingAction, PlanOption};
use entities::subscriptions::{BillingInterval, Currency, PendingChange, PlanCode, StoreId};
use serde::Serialize;
use uuid::Uuid;

use crate::app_container::Application;
use crate::errors::ApiError;

/// Normalized view of the stored subscription. Clients render from this
/// rather than from the raw row, so stale pending changes are already
/// filtered out here.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionView {
    active: bool,
    plan_code: Option<PlanCode>,
    status: &'static str,
    cancel_at_period_end: bool,
    pending_change: Option<PendingChange>,
    currency: Currency,
    interval: Option<BillingInterval>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionStatusResponse {
    subscription: SubscriptionView,
    actions: Vec<BillingAction>,
    available_options: Vec<PlanOption>,
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn get_subscription_status(
    store_id: web::Path<Uuid>,
    app: web::Data<Application>,
) -> Result<web::Json<SubscriptionStatusResponse>, ApiError> {
    let store_id = StoreId::from(store_id.into_inner());
    let snapshot = app
        .repository
        .get_subscription_snapshot(store_id)
        .await
        .map_err(ApiError::InternalServerError)?
        .unwrap_or_default();

    let actions = app.billing.allowed_actions(&snapshot);
    let available_options = app.billing.available_options(&snapshot);
    let pending_change = snapshot
        .pending_change
        .clone()
        .filter(|pending| app.billing.is_valid_scheduled_change(&snapshot, pending));

    Ok(web::Json(SubscriptionStatusResponse {
        subscription: SubscriptionView {
            active: snapshot.active,
            plan_code: snapshot.resolved_plan_code(),
            status: snapshot.status.as_str(),
            cancel_at_period_end: snapshot.cancel_at_period_end,
            pending_change,
            currency: snapshot.currency.clone(),
            interval: snapshot.billing_interval(),
        },
        actions,
        available_options,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscription")
            .service(web::resource("").route(web::get().to(get_subscription_status))),
    );
}
