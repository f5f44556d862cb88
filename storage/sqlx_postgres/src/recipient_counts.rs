use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use campaign_metrics::contracts::canonical_metrics::{
    CampaignCount, CountDimension, RecipientCountsRepo,
};
use entities::campaigns::delivery::{DELIVERED_STATUS_VALUES, FAILED_STATUS_VALUES};
use entities::campaigns::CampaignId;
use itertools::Itertools;
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug)]
struct DbCampaignCount {
    campaign_id: Uuid,
    count: i64,
}

#[async_trait]
impl RecipientCountsRepo for Repository {
    async fn counts_by_campaign(
        &self,
        dimension: CountDimension,
        campaign_ids: &[CampaignId],
    ) -> anyhow::Result<Vec<CampaignCount>> {
        let ids = campaign_ids.iter().map(|id| id.inner()).collect_vec();
        let counts = match dimension {
            CountDimension::Recipients => self.count_recipients(&ids).await,
            CountDimension::Accepted => self.count_accepted(&ids).await,
            CountDimension::Delivered => self.count_delivered(&ids).await,
            CountDimension::Failed => self.count_failed(&ids).await,
        }?;

        Ok(counts
            .into_iter()
            .map(|count| CampaignCount {
                campaign_id: CampaignId::from(count.campaign_id),
                count: count.count,
            })
            .collect_vec())
    }
}

impl Repository {
    async fn count_recipients(&self, campaign_ids: &[Uuid]) -> anyhow::Result<Vec<DbCampaignCount>> {
        sqlx::query_as::<_, DbCampaignCount>(
            "
            SELECT campaign_id, COUNT(*) as count FROM messaging.campaign_recipients
            WHERE campaign_id = ANY($1)
            GROUP BY campaign_id
            ",
        )
        .bind(campaign_ids)
        .fetch_all(self.pool())
        .await
        .context("Failed to count campaign recipients")
    }

    async fn count_accepted(&self, campaign_ids: &[Uuid]) -> anyhow::Result<Vec<DbCampaignCount>> {
        sqlx::query_as::<_, DbCampaignCount>(
            "
            SELECT campaign_id, COUNT(*) as count FROM messaging.campaign_recipients
            WHERE campaign_id = ANY($1) AND gateway_message_id IS NOT NULL
            GROUP BY campaign_id
            ",
        )
        .bind(campaign_ids)
        .fetch_all(self.pool())
        .await
        .context("Failed to count recipients accepted by the gateway")
    }

    async fn count_delivered(&self, campaign_ids: &[Uuid]) -> anyhow::Result<Vec<DbCampaignCount>> {
        sqlx::query_as::<_, DbCampaignCount>(
            "
            SELECT campaign_id, COUNT(*) as count FROM messaging.campaign_recipients
            WHERE campaign_id = ANY($1)
              AND LOWER(TRIM(delivery_status)) = ANY($2)
            GROUP BY campaign_id
            ",
        )
        .bind(campaign_ids)
        .bind(&DELIVERED_STATUS_VALUES[..])
        .fetch_all(self.pool())
        .await
        .context("Failed to count delivered recipients")
    }

    /// A recipient counts as failed when the send failed outright or the
    /// gateway reported a failed delivery. Counting rows keeps recipients
    /// matching both conditions counted once.
    async fn count_failed(&self, campaign_ids: &[Uuid]) -> anyhow::Result<Vec<DbCampaignCount>> {
        sqlx::query_as::<_, DbCampaignCount>(
            "
            SELECT campaign_id, COUNT(*) as count FROM messaging.campaign_recipients
            WHERE campaign_id = ANY($1)
              AND (status = 'failed' OR LOWER(TRIM(delivery_status)) = ANY($2))
            GROUP BY campaign_id
            ",
        )
        .bind(campaign_ids)
        .bind(&FAILED_STATUS_VALUES[..])
        .fetch_all(self.pool())
        .await
        .context("Failed to count failed recipients")
    }
}
