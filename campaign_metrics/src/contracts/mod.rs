pub mod canonical_metrics;

use crate::contracts::canonical_metrics::{CanonicalMetricsInteractor, RecipientCountsRepo};
use entities::campaigns::{CampaignId, CanonicalCampaignMetrics};
use std::collections::HashMap;
use std::sync::Arc;

/// Campaign reporting entry point held by the outer layers.
pub struct CampaignMetricsSubsystem {
    canonical_metrics: CanonicalMetricsInteractor,
}

impl CampaignMetricsSubsystem {
    pub fn new(counts_repo: Arc<dyn RecipientCountsRepo>) -> Self {
        Self {
            canonical_metrics: CanonicalMetricsInteractor::new(counts_repo),
        }
    }

    pub async fn canonical_metrics_for_campaigns(
        &self,
        campaign_ids: &[CampaignId],
    ) -> anyhow::Result<HashMap<CampaignId, CanonicalCampaignMetrics>> {
        self.canonical_metrics
            .metrics_for_campaigns(campaign_ids)
            .await
    }
}
