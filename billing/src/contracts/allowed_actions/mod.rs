use crate::data_transfer::BillingAction;
use crate::plan_catalog::PlanCatalog;
use entities::subscriptions::{BillingInterval, SubscriptionSnapshot, SubscriptionStatus};
use itertools::Itertools;

pub struct AllowedActionsInteractor;

impl AllowedActionsInteractor {
    /// Decision table behind the billing screen: the first matching guard
    /// wins and the returned order is the order a client renders.
    pub fn compute(
        subscription: &SubscriptionSnapshot,
        catalog: &dyn PlanCatalog,
    ) -> Vec<BillingAction> {
        use crate::data_transfer::BillingAction::*;

        if !subscription.has_usable_subscription() {
            return vec![Subscribe, ViewPlans];
        }

        match subscription.status {
            SubscriptionStatus::Canceled => vec![Subscribe, ViewInvoices],
            SubscriptionStatus::PastDue | SubscriptionStatus::Unpaid => {
                vec![UpdatePaymentMethod, RefreshFromStripe, ViewInvoices]
            }
            SubscriptionStatus::Active | SubscriptionStatus::Trialing => {
                if subscription.cancel_at_period_end {
                    return vec![
                        ResumeSubscription,
                        UpdatePaymentMethod,
                        ViewInvoices,
                        RefreshFromStripe,
                    ];
                }
                if subscription.pending_change.is_some() {
                    return vec![
                        ChangePlan,
                        CancelScheduledChange,
                        UpdatePaymentMethod,
                        ViewInvoices,
                        RefreshFromStripe,
                    ];
                }

                let mut actions = vec![ChangePlan];
                if Self::interval_switch_available(subscription, catalog) {
                    actions.push(SwitchInterval);
                }
                actions.extend([
                    CancelAtPeriodEnd,
                    UpdatePaymentMethod,
                    ViewInvoices,
                    RefreshFromStripe,
                ]);
                actions
            }
            SubscriptionStatus::Incomplete | SubscriptionStatus::IncompleteExpired => {
                vec![UpdatePaymentMethod, ViewInvoices, RefreshStripe]
            }
            SubscriptionStatus::Inactive => vec![ViewInvoices, RefreshFromStripe],
        }
    }

    pub fn is_allowed(
        subscription: &SubscriptionSnapshot,
        catalog: &dyn PlanCatalog,
        action: BillingAction,
    ) -> bool {
        Self::compute(subscription, catalog).contains(&action)
    }

    /// An interval switch is only offered when the catalog can actually
    /// fulfill it: the current plan must be sold both monthly and yearly
    /// in the subscription's currency.
    fn interval_switch_available(
        subscription: &SubscriptionSnapshot,
        catalog: &dyn PlanCatalog,
    ) -> bool {
        let plan_code = match subscription.resolved_plan_code() {
            Some(plan_code) => plan_code,
            None => return false,
        };
        let intervals_on_sale = catalog
            .list_supported_skus(&subscription.currency)
            .into_iter()
            .filter(|sku| sku.plan_code == plan_code)
            .map(|sku| sku.interval)
            .collect_vec();

        intervals_on_sale.contains(&BillingInterval::Month)
            && intervals_on_sale.contains(&BillingInterval::Year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan_catalog::PlanSku;
    use entities::subscriptions::{Currency, PendingChange, PlanCode};
    use rstest::rstest;
    use crate::data_transfer::BillingAction::*;

    struct StaticCatalog {
        currency: &'static str,
        skus: Vec<PlanSku>,
    }

    impl StaticCatalog {
        fn selling(currency: &'static str, skus: &[(&str, BillingInterval)]) -> Self {
            Self {
                currency,
                skus: skus
                    .iter()
                    .map(|(plan_code, interval)| PlanSku {
                        plan_code: PlanCode::from(*plan_code),
                        interval: *interval,
                    })
                    .collect(),
            }
        }

        fn empty() -> Self {
            Self {
                currency: "EUR",
                skus: Vec::new(),
            }
        }
    }

    impl PlanCatalog for StaticCatalog {
        fn list_supported_skus(&self, currency: &Currency) -> Vec<PlanSku> {
            if currency.as_str() == self.currency {
                self.skus.clone()
            } else {
                Vec::new()
            }
        }
    }

    fn active_snapshot(plan_code: &str) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            active: true,
            plan_code: Some(plan_code.to_owned()),
            status: SubscriptionStatus::Active,
            ..Default::default()
        }
    }

    fn pending_change() -> PendingChange {
        PendingChange {
            plan_code: Some("starter".to_owned()),
            interval: Some("month".to_owned()),
            effective_at: None,
        }
    }

    #[rstest]
    #[case(SubscriptionSnapshot::default())]
    #[case(SubscriptionSnapshot {
        active: false,
        plan_code: Some("pro".to_owned()),
        status: SubscriptionStatus::Active,
        cancel_at_period_end: true,
        pending_change: Some(pending_change()),
        ..Default::default()
    })]
    #[case(SubscriptionSnapshot {
        active: false,
        plan_code: Some("pro".to_owned()),
        status: SubscriptionStatus::Canceled,
        ..Default::default()
    })]
    fn inactive_snapshots_only_offer_subscribe(#[case] snapshot: SubscriptionSnapshot) {
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions, vec![Subscribe, ViewPlans]);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("".to_owned()), Some("   ".to_owned()))]
    fn plan_less_snapshots_only_offer_subscribe(
        #[case] plan_code: Option<String>,
        #[case] plan_type: Option<String>,
    ) {
        let snapshot = SubscriptionSnapshot {
            active: true,
            plan_code,
            plan_type,
            status: SubscriptionStatus::Active,
            ..Default::default()
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions, vec![Subscribe, ViewPlans]);
    }

    #[test]
    fn legacy_plan_type_counts_as_subscribed() {
        let snapshot = SubscriptionSnapshot {
            active: true,
            plan_type: Some("starter".to_owned()),
            status: SubscriptionStatus::Active,
            ..Default::default()
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(
            actions,
            vec![
                ChangePlan,
                CancelAtPeriodEnd,
                UpdatePaymentMethod,
                ViewInvoices,
                RefreshFromStripe
            ]
        );
    }

    #[test]
    fn canceled_subscriptions_offer_resubscribe() {
        let snapshot = SubscriptionSnapshot {
            status: SubscriptionStatus::Canceled,
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions, vec![Subscribe, ViewInvoices]);
    }

    #[rstest]
    #[case(SubscriptionStatus::PastDue)]
    #[case(SubscriptionStatus::Unpaid)]
    fn past_due_and_unpaid_lock_plan_changes(#[case] status: SubscriptionStatus) {
        let snapshot = SubscriptionSnapshot {
            status,
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(
            actions,
            vec![UpdatePaymentMethod, RefreshFromStripe, ViewInvoices]
        );
        assert!(!actions.contains(&ChangePlan));
        assert!(!actions.contains(&Subscribe));
    }

    #[test]
    fn cancelling_subscription_offers_resume() {
        let snapshot = SubscriptionSnapshot {
            cancel_at_period_end: true,
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(
            actions,
            vec![
                ResumeSubscription,
                UpdatePaymentMethod,
                ViewInvoices,
                RefreshFromStripe
            ]
        );
    }

    #[test]
    fn cancel_at_period_end_wins_over_pending_change() {
        let snapshot = SubscriptionSnapshot {
            cancel_at_period_end: true,
            pending_change: Some(pending_change()),
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions[0], ResumeSubscription);
        assert!(!actions.contains(&CancelScheduledChange));
    }

    #[test]
    fn pending_change_offers_cancelling_the_scheduled_change() {
        let snapshot = SubscriptionSnapshot {
            pending_change: Some(pending_change()),
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(
            actions,
            vec![
                ChangePlan,
                CancelScheduledChange,
                UpdatePaymentMethod,
                ViewInvoices,
                RefreshFromStripe
            ]
        );
    }

    #[test]
    fn interval_switch_offered_when_catalog_sells_both_intervals() {
        let catalog = StaticCatalog::selling(
            "EUR",
            &[
                ("starter", BillingInterval::Month),
                ("starter", BillingInterval::Year),
            ],
        );
        let actions = AllowedActionsInteractor::compute(&active_snapshot("starter"), &catalog);
        assert_eq!(
            actions,
            vec![
                ChangePlan,
                SwitchInterval,
                CancelAtPeriodEnd,
                UpdatePaymentMethod,
                ViewInvoices,
                RefreshFromStripe
            ]
        );
    }

    #[test]
    fn interval_switch_requires_both_intervals() {
        let catalog = StaticCatalog::selling("EUR", &[("starter", BillingInterval::Month)]);
        let actions = AllowedActionsInteractor::compute(&active_snapshot("starter"), &catalog);
        assert_eq!(
            actions,
            vec![
                ChangePlan,
                CancelAtPeriodEnd,
                UpdatePaymentMethod,
                ViewInvoices,
                RefreshFromStripe
            ]
        );
    }

    #[test]
    fn interval_switch_ignores_other_plans_intervals() {
        let catalog = StaticCatalog::selling(
            "EUR",
            &[
                ("starter", BillingInterval::Month),
                ("pro", BillingInterval::Year),
            ],
        );
        let actions = AllowedActionsInteractor::compute(&active_snapshot("starter"), &catalog);
        assert!(!actions.contains(&SwitchInterval));
    }

    #[test]
    fn catalog_lookup_uses_the_snapshot_currency() {
        let catalog = StaticCatalog::selling(
            "USD",
            &[
                ("starter", BillingInterval::Month),
                ("starter", BillingInterval::Year),
            ],
        );

        // Default snapshot currency is EUR, which this catalog does not serve.
        let actions = AllowedActionsInteractor::compute(&active_snapshot("starter"), &catalog);
        assert!(!actions.contains(&SwitchInterval));

        let snapshot = SubscriptionSnapshot {
            currency: Currency::new("usd"),
            ..active_snapshot("starter")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &catalog);
        assert!(actions.contains(&SwitchInterval));
    }

    #[test]
    fn trialing_counts_as_active() {
        let catalog = StaticCatalog::selling(
            "EUR",
            &[
                ("starter", BillingInterval::Month),
                ("starter", BillingInterval::Year),
            ],
        );
        let snapshot = SubscriptionSnapshot {
            status: SubscriptionStatus::Trialing,
            ..active_snapshot("starter")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &catalog);
        assert_eq!(actions[1], SwitchInterval);
    }

    #[rstest]
    #[case(SubscriptionStatus::Incomplete)]
    #[case(SubscriptionStatus::IncompleteExpired)]
    fn incomplete_subscriptions_point_at_the_payment_method(#[case] status: SubscriptionStatus) {
        let snapshot = SubscriptionSnapshot {
            status,
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions, vec![UpdatePaymentMethod, ViewInvoices, RefreshStripe]);
        assert!(!actions.contains(&RefreshFromStripe));
    }

    #[test]
    fn unknown_statuses_fall_back_to_passive_actions() {
        let snapshot = SubscriptionSnapshot {
            status: SubscriptionStatus::Inactive,
            ..active_snapshot("pro")
        };
        let actions = AllowedActionsInteractor::compute(&snapshot, &StaticCatalog::empty());
        assert_eq!(actions, vec![ViewInvoices, RefreshFromStripe]);
    }

    #[test]
    fn is_allowed_is_membership_over_the_computed_list() {
        let catalog = StaticCatalog::empty();
        let inactive = SubscriptionSnapshot::default();
        assert!(AllowedActionsInteractor::is_allowed(
            &inactive, &catalog, Subscribe
        ));
        assert!(!AllowedActionsInteractor::is_allowed(
            &inactive, &catalog, ChangePlan
        ));
    }
}
