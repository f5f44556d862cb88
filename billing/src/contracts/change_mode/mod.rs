use crate::data_transfer::{ChangeMode, PlanChangeRequest};
use crate::plan_catalog::{PRO_PLAN, STARTER_PLAN};
use entities::subscriptions::{BillingInterval, SubscriptionSnapshot};

pub struct ChangeModeInteractor;

impl ChangeModeInteractor {
    /// Picks how a plan change is carried out. Downgrading away from annual
    /// pro waits for the period end, moving from monthly to annual billing
    /// goes through a fresh checkout, everything else applies immediately.
    /// Immediate is also the fallback whenever the current plan, current
    /// interval or target plan cannot be resolved.
    pub fn decide(subscription: &SubscriptionSnapshot, request: &PlanChangeRequest) -> ChangeMode {
        let (current_plan, current_interval, target_plan) = match (
            subscription.resolved_plan_code(),
            subscription.billing_interval(),
            request.normalized_plan_code(),
        ) {
            (Some(plan), Some(interval), Some(target)) => (plan, interval, target),
            _ => return ChangeMode::Immediate,
        };

        if current_plan.as_ref() == PRO_PLAN
            && current_interval == BillingInterval::Year
            && target_plan.as_ref() == STARTER_PLAN
        {
            return ChangeMode::Scheduled;
        }

        if current_interval == BillingInterval::Month
            && request.normalized_interval() == Some(BillingInterval::Year)
        {
            return ChangeMode::Checkout;
        }

        ChangeMode::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entities::subscriptions::SubscriptionStatus;
    use rstest::rstest;

    fn snapshot(plan_code: Option<&str>, interval: Option<&str>) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            active: true,
            plan_code: plan_code.map(str::to_owned),
            status: SubscriptionStatus::Active,
            interval: interval.map(str::to_owned),
            ..Default::default()
        }
    }

    fn request(plan_code: &str, interval: Option<&str>) -> PlanChangeRequest {
        PlanChangeRequest {
            plan_code: Some(plan_code.to_owned()),
            interval: interval.map(str::to_owned),
        }
    }

    #[rstest]
    #[case::annual_pro_downgrade(
        snapshot(Some("pro"), Some("year")),
        request("starter", None),
        ChangeMode::Scheduled
    )]
    #[case::annual_pro_downgrade_ignores_target_interval(
        snapshot(Some("pro"), Some("year")),
        request("starter", Some("Year")),
        ChangeMode::Scheduled
    )]
    #[case::normalization_applies_before_the_rules(
        snapshot(Some(" PRO "), Some("Year")),
        request("  Starter", None),
        ChangeMode::Scheduled
    )]
    #[case::monthly_pro_downgrade_is_immediate(
        snapshot(Some("pro"), Some("month")),
        request("starter", None),
        ChangeMode::Immediate
    )]
    #[case::monthly_to_annual_goes_through_checkout(
        snapshot(Some("starter"), Some("month")),
        request("pro", Some("year")),
        ChangeMode::Checkout
    )]
    #[case::monthly_to_annual_on_the_same_plan(
        snapshot(Some("starter"), Some("month")),
        request("starter", Some("year")),
        ChangeMode::Checkout
    )]
    #[case::monthly_upgrade_keeping_the_interval(
        snapshot(Some("starter"), Some("month")),
        request("pro", Some("month")),
        ChangeMode::Immediate
    )]
    #[case::monthly_upgrade_without_target_interval(
        snapshot(Some("starter"), Some("month")),
        request("pro", None),
        ChangeMode::Immediate
    )]
    #[case::annual_upgrade_is_immediate(
        snapshot(Some("starter"), Some("year")),
        request("pro", Some("year")),
        ChangeMode::Immediate
    )]
    #[case::already_annual_keeping_the_plan(
        snapshot(Some("starter"), Some("year")),
        request("starter", Some("year")),
        ChangeMode::Immediate
    )]
    #[case::unresolvable_current_plan(
        snapshot(None, Some("month")),
        request("pro", Some("year")),
        ChangeMode::Immediate
    )]
    #[case::unresolvable_current_interval(
        snapshot(Some("pro"), None),
        request("starter", None),
        ChangeMode::Immediate
    )]
    #[case::unrecognized_current_interval(
        snapshot(Some("pro"), Some("weekly")),
        request("starter", None),
        ChangeMode::Immediate
    )]
    #[case::blank_target_plan(
        snapshot(Some("pro"), Some("year")),
        request("   ", None),
        ChangeMode::Immediate
    )]
    fn deciding_the_change_mode(
        #[case] subscription: SubscriptionSnapshot,
        #[case] request: PlanChangeRequest,
        #[case] expected: ChangeMode,
    ) {
        assert_eq!(
            ChangeModeInteractor::decide(&subscription, &request),
            expected
        );
    }

    #[test]
    fn legacy_plan_type_feeds_the_decision() {
        let subscription = SubscriptionSnapshot {
            plan_code: None,
            plan_type: Some("pro".to_owned()),
            ..snapshot(None, Some("year"))
        };
        assert_eq!(
            ChangeModeInteractor::decide(&subscription, &request("starter", None)),
            ChangeMode::Scheduled
        );
    }
}
