use shared_kernel::uuid_key;

pub mod delivery;

uuid_key!(CampaignId);

pub const GATEWAY_SOURCE_OF_TRUTH: &str = "gateway";

/// Raw outcome counts for one campaign, straight from the recipient store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RecipientOutcomeCounts {
    pub recipients: i64,
    pub accepted: i64,
    pub delivered: i64,
    pub failed: i64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CampaignTotals {
    pub recipients: u64,
    pub accepted: u64,
    pub sent: u64,
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeliveryBreakdown {
    pub pending_delivery: u64,
    pub delivered: u64,
    pub failed_delivery: u64,
}

/// The canonical per-campaign reporting record. Everything the reporting
/// surfaces show derives from the four counts folded in here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CanonicalCampaignMetrics {
    pub totals: CampaignTotals,
    pub delivery: DeliveryBreakdown,
    pub source_of_truth: &'static str,
}

/// Folds raw counts into the canonical record. Counts never go negative,
/// and `sent` mirrors `accepted`: gateway acceptance is the send signal.
pub fn build_canonical_campaign_metrics(
    counts: RecipientOutcomeCounts,
) -> CanonicalCampaignMetrics {
    let recipients = clamp_count(counts.recipients);
    let accepted = clamp_count(counts.accepted);
    let delivered = clamp_count(counts.delivered);
    let failed = clamp_count(counts.failed);

    let pending_delivery = accepted.saturating_sub(delivered + failed);

    CanonicalCampaignMetrics {
        totals: CampaignTotals {
            recipients,
            accepted,
            sent: accepted,
            delivered,
            failed,
        },
        delivery: DeliveryBreakdown {
            pending_delivery,
            delivered,
            failed_delivery: failed,
        },
        source_of_truth: GATEWAY_SOURCE_OF_TRUTH,
    }
}

fn clamp_count(count: i64) -> u64 {
    count.max(0) as u64
}
