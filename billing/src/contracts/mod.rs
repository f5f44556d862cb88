pub mod allowed_actions;
pub mod available_options;
pub mod change_mode;
pub mod scheduled_change;

use crate::data_transfer::{BillingAction, ChangeMode, PlanChangeRequest, PlanOption};
use crate::plan_catalog::{PlanCatalog, SettingsBackedCatalog};
use entities::subscriptions::{PendingChange, SubscriptionSnapshot};
use std::sync::Arc;

/// Billing policy entry point held by the outer layers; wires the plan
/// catalog into the pure decision functions.
pub struct BillingSubsystem {
    catalog: Arc<dyn PlanCatalog>,
}

impl BillingSubsystem {
    pub fn new(catalog: Arc<dyn PlanCatalog>) -> Self {
        Self { catalog }
    }

    pub fn from_config() -> Self {
        Self::new(Arc::new(SettingsBackedCatalog::from_config()))
    }

    pub fn allowed_actions(&self, subscription: &SubscriptionSnapshot) -> Vec<BillingAction> {
        allowed_actions::AllowedActionsInteractor::compute(subscription, self.catalog.as_ref())
    }

    pub fn is_action_allowed(
        &self,
        subscription: &SubscriptionSnapshot,
        action: BillingAction,
    ) -> bool {
        allowed_actions::AllowedActionsInteractor::is_allowed(
            subscription,
            self.catalog.as_ref(),
            action,
        )
    }

    pub fn decide_change_mode(
        &self,
        current: &SubscriptionSnapshot,
        target: &PlanChangeRequest,
    ) -> ChangeMode {
        change_mode::ChangeModeInteractor::decide(current, target)
    }

    pub fn is_valid_scheduled_change(
        &self,
        current: &SubscriptionSnapshot,
        pending_change: &PendingChange,
    ) -> bool {
        scheduled_change::ScheduledChangeInteractor::is_valid(current, pending_change)
    }

    pub fn available_options(&self, subscription: &SubscriptionSnapshot) -> Vec<PlanOption> {
        available_options::AvailableOptionsInteractor::list(subscription, self.catalog.as_ref())
    }
}
