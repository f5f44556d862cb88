use billing::contracts::BillingSubsystem;
use campaign_metrics::contracts::CampaignMetricsSubsystem;
use sqlx_postgres::repository::Repository;
use std::sync::Arc;

pub struct Application {
    pub billing: BillingSubsystem,
    pub campaign_metrics: CampaignMetricsSubsystem,
    pub repository: Repository,
}

impl Application {
    pub fn new(repository: Repository) -> Self {
        Application {
            billing: BillingSubsystem::from_config(),
            campaign_metrics: CampaignMetricsSubsystem::new(Arc::new(repository.clone())),
            repository,
        }
    }
}
