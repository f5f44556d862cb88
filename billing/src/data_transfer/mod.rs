use entities::subscriptions::{normalize_plan_code, BillingInterval, PlanCode};
use serde::{Deserialize, Serialize};

/// Identifiers of the billing actions a client may offer. The serialized
/// ids are part of the client contract and never change casing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingAction {
    Subscribe,
    ViewPlans,
    ViewInvoices,
    UpdatePaymentMethod,
    RefreshFromStripe,
    /// Historical id emitted for incomplete subscriptions; clients match on
    /// it, so it stays distinct from `refreshFromStripe`.
    RefreshStripe,
    ChangePlan,
    CancelAtPeriodEnd,
    ResumeSubscription,
    CancelScheduledChange,
    SwitchInterval,
}

/// How a requested plan/interval change is carried out.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMode {
    Immediate,
    Checkout,
    Scheduled,
}

/// Target of a requested change, as submitted by a client. Values arrive
/// in whatever casing the client used; the normalized accessors own the
/// comparison rules.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanChangeRequest {
    pub plan_code: Option<String>,
    pub interval: Option<String>,
}

impl PlanChangeRequest {
    pub fn normalized_plan_code(&self) -> Option<PlanCode> {
        normalize_plan_code(self.plan_code.as_deref())
    }

    pub fn normalized_interval(&self) -> Option<BillingInterval> {
        BillingInterval::parse(self.interval.as_deref())
    }
}

/// One plan a store can move to, in display order, with the store's
/// current SKU flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOption {
    pub plan_code: PlanCode,
    pub interval: BillingInterval,
    pub current: bool,
}
