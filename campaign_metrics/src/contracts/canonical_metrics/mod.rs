use anyhow::Context;
use async_trait::async_trait;
use entities::campaigns::{
    build_canonical_campaign_metrics, CampaignId, CanonicalCampaignMetrics,
    RecipientOutcomeCounts,
};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;

/// The grouped counts canonical metrics are assembled from. `Accepted`
/// covers recipients the gateway assigned a message id to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CountDimension {
    Recipients,
    Accepted,
    Delivered,
    Failed,
}

impl CountDimension {
    pub const ALL: [CountDimension; 4] = [
        CountDimension::Recipients,
        CountDimension::Accepted,
        CountDimension::Delivered,
        CountDimension::Failed,
    ];
}

/// Matching recipients per campaign along one dimension. Campaigns without
/// matching rows are absent rather than reported as zero.
#[derive(Clone, Debug)]
pub struct CampaignCount {
    pub campaign_id: CampaignId,
    pub count: i64,
}

#[async_trait]
pub trait RecipientCountsRepo: Send + Sync {
    async fn counts_by_campaign(
        &self,
        dimension: CountDimension,
        campaign_ids: &[CampaignId],
    ) -> anyhow::Result<Vec<CampaignCount>>;
}

pub struct CanonicalMetricsInteractor {
    counts_repo: Arc<dyn RecipientCountsRepo>,
}

impl CanonicalMetricsInteractor {
    pub fn new(counts_repo: Arc<dyn RecipientCountsRepo>) -> Self {
        Self { counts_repo }
    }

    /// Recipient-derived metrics for the given campaigns, keyed by campaign.
    /// The four dimensions are counted concurrently and the first failure
    /// fails the whole read. Requested campaigns without any rows still get
    /// all-zero metrics.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn metrics_for_campaigns(
        &self,
        campaign_ids: &[CampaignId],
    ) -> anyhow::Result<HashMap<CampaignId, CanonicalCampaignMetrics>> {
        if campaign_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut futures: FuturesUnordered<_> = CountDimension::ALL
            .into_iter()
            .map(|dimension| async move {
                self.counts_repo
                    .counts_by_campaign(dimension, campaign_ids)
                    .await
                    .map(|counts| (dimension, counts))
                    .with_context(|| format!("Failed to count {dimension:?} recipients"))
            })
            .collect();

        let mut counts_by_dimension: HashMap<CountDimension, HashMap<CampaignId, i64>> =
            HashMap::new();
        while let Some(result) = futures.next().await {
            let (dimension, counts) = result?;
            counts_by_dimension.insert(
                dimension,
                counts
                    .into_iter()
                    .map(|count| (count.campaign_id, count.count))
                    .collect(),
            );
        }

        let count_for = |dimension: CountDimension, campaign_id: &CampaignId| {
            counts_by_dimension
                .get(&dimension)
                .and_then(|counts| counts.get(campaign_id))
                .copied()
                .unwrap_or(0)
        };

        Ok(campaign_ids
            .iter()
            .map(|campaign_id| {
                let counts = RecipientOutcomeCounts {
                    recipients: count_for(CountDimension::Recipients, campaign_id),
                    accepted: count_for(CountDimension::Accepted, campaign_id),
                    delivered: count_for(CountDimension::Delivered, campaign_id),
                    failed: count_for(CountDimension::Failed, campaign_id),
                };
                (*campaign_id, build_canonical_campaign_metrics(counts))
            })
            .collect())
    }
}
