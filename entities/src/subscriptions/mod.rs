use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::{string_key, uuid_key};

uuid_key!(StoreId);
string_key!(PlanCode);

/// Lifecycle states a subscription can be in, as persisted by the billing
/// sync. Parsing is strict about casing: values outside the known literal
/// set degrade to `Inactive`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Unpaid,
    Canceled,
    Incomplete,
    IncompleteExpired,
    Inactive,
}

impl SubscriptionStatus {
    /// Statuses are matched verbatim against the stored literals; both the
    /// `canceled` and `cancelled` spellings occur in old rows.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => SubscriptionStatus::Active,
            Some("trialing") => SubscriptionStatus::Trialing,
            Some("past_due") => SubscriptionStatus::PastDue,
            Some("unpaid") => SubscriptionStatus::Unpaid,
            Some("canceled") | Some("cancelled") => SubscriptionStatus::Canceled,
            Some("incomplete") => SubscriptionStatus::Incomplete,
            Some("incomplete_expired") => SubscriptionStatus::IncompleteExpired,
            _ => SubscriptionStatus::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Inactive
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

impl BillingInterval {
    /// Intervals compare case-insensitively; anything unrecognized carries
    /// no interval information.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let normalized = raw?.trim().to_lowercase();
        match normalized.as_str() {
            "month" => Some(BillingInterval::Month),
            "year" => Some(BillingInterval::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

pub const DEFAULT_CURRENCY: &str = "EUR";

/// ISO 4217 currency code, always held uppercased. Blank input falls back
/// to the platform default.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            Currency::default()
        } else {
            Currency(normalized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency(DEFAULT_CURRENCY.to_owned())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Plan codes compare lowercased; blank values carry no plan information.
pub fn normalize_plan_code(raw: Option<&str>) -> Option<PlanCode> {
    let normalized = raw?.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(PlanCode::from(normalized))
    }
}

/// A scheduled future modification recorded against a subscription. The
/// billing sync applies it once effective; until then readers see it as
/// part of the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingChange {
    pub plan_code: Option<String>,
    pub interval: Option<String>,
    pub effective_at: Option<DateTime<Utc>>,
}

impl PendingChange {
    pub fn normalized_plan_code(&self) -> Option<PlanCode> {
        normalize_plan_code(self.plan_code.as_deref())
    }

    pub fn normalized_interval(&self) -> Option<BillingInterval> {
        BillingInterval::parse(self.interval.as_deref())
    }
}

/// Read-only view of a store's subscription at decision time. Fields hold
/// the values as persisted; readers go through the accessors, which own
/// the normalization rules.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionSnapshot {
    pub active: bool,
    pub plan_code: Option<String>,
    /// Legacy field still set on older rows; `plan_code` wins when both
    /// are present.
    pub plan_type: Option<String>,
    pub status: SubscriptionStatus,
    pub cancel_at_period_end: bool,
    pub pending_change: Option<PendingChange>,
    pub currency: Currency,
    pub interval: Option<String>,
}

impl SubscriptionSnapshot {
    pub fn resolved_plan_code(&self) -> Option<PlanCode> {
        normalize_plan_code(self.plan_code.as_deref())
            .or_else(|| normalize_plan_code(self.plan_type.as_deref()))
    }

    pub fn billing_interval(&self) -> Option<BillingInterval> {
        BillingInterval::parse(self.interval.as_deref())
    }

    /// A snapshot without the active flag or a resolvable plan identifier
    /// carries no usable subscription.
    pub fn has_usable_subscription(&self) -> bool {
        self.active && self.resolved_plan_code().is_some()
    }
}
