use crate::data_transfer::PlanOption;
use crate::plan_catalog::{PlanCatalog, PlanSku, USER_SELECTABLE_SKUS};
use entities::subscriptions::{PlanCode, SubscriptionSnapshot};
use itertools::Itertools;

pub struct AvailableOptionsInteractor;

impl AvailableOptionsInteractor {
    /// Plans a store can move to, in display order, restricted to what the
    /// catalog sells in the subscription's currency. The entry matching the
    /// current plan and interval is flagged so clients can render it as the
    /// active choice.
    pub fn list(subscription: &SubscriptionSnapshot, catalog: &dyn PlanCatalog) -> Vec<PlanOption> {
        let on_sale = catalog.list_supported_skus(&subscription.currency);
        let current_plan = subscription.resolved_plan_code();
        let current_interval = subscription.billing_interval();

        USER_SELECTABLE_SKUS
            .iter()
            .map(|(plan_code, interval)| PlanSku {
                plan_code: PlanCode::from(*plan_code),
                interval: *interval,
            })
            .filter(|sku| on_sale.contains(sku))
            .map(|sku| {
                let current = current_plan.as_ref() == Some(&sku.plan_code)
                    && current_interval == Some(sku.interval);
                PlanOption {
                    plan_code: sku.plan_code,
                    interval: sku.interval,
                    current,
                }
            })
            .collect_vec()
    }
}
