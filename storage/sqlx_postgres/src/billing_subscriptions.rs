use crate::repository::Repository;
use anyhow::Context;
use entities::subscriptions::{
    Currency, PendingChange, StoreId, SubscriptionSnapshot, SubscriptionStatus,
};

/// Subscription row as the billing sync writes it. Most columns are
/// nullable since older syncs did not populate all of them.
#[derive(sqlx::FromRow, Debug)]
struct DbSubscription {
    active: bool,
    plan_code: Option<String>,
    plan_type: Option<String>,
    status: Option<String>,
    cancel_at_period_end: Option<bool>,
    pending_change: Option<serde_json::Value>,
    currency: Option<String>,
    interval: Option<String>,
}

impl DbSubscription {
    fn into_snapshot(self) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            active: self.active,
            plan_code: self.plan_code,
            plan_type: self.plan_type,
            status: SubscriptionStatus::parse(self.status.as_deref()),
            cancel_at_period_end: self.cancel_at_period_end.unwrap_or(false),
            pending_change: self.pending_change.and_then(parse_pending_change),
            currency: Currency::new(self.currency.as_deref().unwrap_or_default()),
            interval: self.interval,
        }
    }
}

fn parse_pending_change(value: serde_json::Value) -> Option<PendingChange> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(pending_change) => Some(pending_change),
        Err(err) => {
            tracing::warn!("Ignoring malformed pending_change payload: {err:?}");
            None
        }
    }
}

impl Repository {
    pub async fn get_subscription_snapshot(
        &self,
        store_id: StoreId,
    ) -> anyhow::Result<Option<SubscriptionSnapshot>> {
        let pool = self.pool();
        let subscription = sqlx::query_as::<_, DbSubscription>(
            "
            SELECT active, plan_code, plan_type, status, cancel_at_period_end,
                   pending_change, currency, interval
            FROM billing.subscriptions WHERE store_id = $1
            ",
        )
        .bind(store_id.inner())
        .fetch_optional(pool)
        .await
        .context("Failed to fetch the subscription of the store")?;

        Ok(subscription.map(DbSubscription::into_snapshot))
    }
}
