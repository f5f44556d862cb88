use crate::contracts::change_mode::ChangeModeInteractor;
use crate::data_transfer::{ChangeMode, PlanChangeRequest};
use entities::subscriptions::{PendingChange, SubscriptionSnapshot};

pub struct ScheduledChangeInteractor;

impl ScheduledChangeInteractor {
    /// A stored pending change is only honored while re-deciding it against
    /// the current subscription still yields a scheduled change. Stale rows
    /// read as invalid and get filtered from responses; clearing them is the
    /// billing sync's job.
    pub fn is_valid(subscription: &SubscriptionSnapshot, pending: &PendingChange) -> bool {
        if pending.normalized_plan_code().is_none() {
            return false;
        }
        let as_request = PlanChangeRequest {
            plan_code: pending.plan_code.clone(),
            interval: pending.interval.clone(),
        };
        ChangeModeInteractor::decide(subscription, &as_request) == ChangeMode::Scheduled
    }
}
