use entities::subscriptions::{normalize_plan_code, BillingInterval, Currency, PlanCode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const STARTER_PLAN: &str = "starter";
pub const PRO_PLAN: &str = "pro";

/// Plans a store can pick from the UI, in display order.
pub const USER_SELECTABLE_SKUS: [(&str, BillingInterval); 2] = [
    (STARTER_PLAN, BillingInterval::Month),
    (PRO_PLAN, BillingInterval::Year),
];

/// A sellable plan/interval pair within one currency.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PlanSku {
    pub plan_code: PlanCode,
    pub interval: BillingInterval,
}

/// Source of sellable SKUs for a currency. Injected wherever decisions
/// depend on it so callers can supply fixture catalogs.
pub trait PlanCatalog: Send + Sync {
    fn list_supported_skus(&self, currency: &Currency) -> Vec<PlanSku>;
}

/// One configured catalog entry. An entry is sellable only once a payment
/// provider price id has been assigned to it.
#[derive(Clone, Debug, Deserialize)]
pub struct SkuSettings {
    pub plan_code: String,
    pub interval: String,
    pub currency: String,
    #[serde(default)]
    pub price_id: Option<String>,
}

impl SkuSettings {
    fn is_sellable(&self) -> bool {
        self.price_id
            .as_deref()
            .map_or(false, |price_id| !price_id.trim().is_empty())
    }

    fn as_sku(&self) -> Option<PlanSku> {
        let plan_code = normalize_plan_code(Some(&self.plan_code))?;
        let interval = BillingInterval::parse(Some(&self.interval))?;
        Some(PlanSku {
            plan_code,
            interval,
        })
    }
}

pub struct SettingsBackedCatalog {
    skus: Vec<SkuSettings>,
}

impl SettingsBackedCatalog {
    pub fn new(skus: Vec<SkuSettings>) -> Self {
        Self { skus }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::SETTINGS_CONFIG.catalog.skus.clone())
    }
}

impl PlanCatalog for SettingsBackedCatalog {
    fn list_supported_skus(&self, currency: &Currency) -> Vec<PlanSku> {
        self.skus
            .iter()
            .filter(|entry| entry.is_sellable())
            .filter(|entry| &Currency::new(&entry.currency) == currency)
            .filter_map(|entry| {
                let sku = entry.as_sku();
                if sku.is_none() {
                    tracing::warn!("Ignoring catalog entry with unrecognized plan or interval: {entry:?}");
                }
                sku
            })
            .collect_vec()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanChangeType {
    Upgrade,
    Downgrade,
    Same,
}

fn plan_rank(plan_code: &PlanCode) -> Option<u8> {
    match plan_code.as_ref() {
        STARTER_PLAN => Some(1),
        PRO_PLAN => Some(2),
        _ => None,
    }
}

/// Ranks two plans against each other. Plans without a configured rank
/// classify as `Same`.
pub fn classify_plan_change(
    current: Option<&PlanCode>,
    target: Option<&PlanCode>,
) -> PlanChangeType {
    let ranks = (
        current.and_then(plan_rank),
        target.and_then(plan_rank),
    );
    match ranks {
        (Some(current_rank), Some(target_rank)) => match target_rank.cmp(&current_rank) {
            Ordering::Greater => PlanChangeType::Upgrade,
            Ordering::Less => PlanChangeType::Downgrade,
            Ordering::Equal => PlanChangeType::Same,
        },
        _ => PlanChangeType::Same,
    }
}
