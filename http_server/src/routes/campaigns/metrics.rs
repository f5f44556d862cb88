use actix_web::web;
use entities::campaigns::{CampaignId, CanonicalCampaignMetrics};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::app_container::Application;
use crate::errors::ApiError;

#[derive(Deserialize, Debug)]
struct Request {
    /// Comma separated campaign ids.
    #[serde(default)]
    ids: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsResponse {
    recipients: u64,
    accepted: u64,
    sent: u64,
    delivered: u64,
    failed: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryResponse {
    pending_delivery: u64,
    delivered: u64,
    failed_delivery: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CampaignMetricsEntry {
    totals: TotalsResponse,
    delivery: DeliveryResponse,
    source_of_truth: &'static str,
}

impl From<CanonicalCampaignMetrics> for CampaignMetricsEntry {
    fn from(value: CanonicalCampaignMetrics) -> Self {
        Self {
            totals: TotalsResponse {
                recipients: value.totals.recipients,
                accepted: value.totals.accepted,
                sent: value.totals.sent,
                delivered: value.totals.delivered,
                failed: value.totals.failed,
            },
            delivery: DeliveryResponse {
                pending_delivery: value.delivery.pending_delivery,
                delivered: value.delivery.delivered,
                failed_delivery: value.delivery.failed_delivery,
            },
            source_of_truth: value.source_of_truth,
        }
    }
}

#[derive(Serialize)]
struct CampaignMetricsResponse {
    metrics: HashMap<CampaignId, CampaignMetricsEntry>,
}

fn parse_campaign_ids(raw: &str) -> Result<Vec<CampaignId>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part)
                .map(CampaignId::from)
                .map_err(|_| ApiError::BadRequest(format!("Invalid campaign id: {part}")))
        })
        .collect()
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn get_campaign_metrics(
    data: web::Query<Request>,
    app: web::Data<Application>,
) -> Result<web::Json<CampaignMetricsResponse>, ApiError> {
    let campaign_ids = parse_campaign_ids(&data.ids)?;
    let metrics = app
        .campaign_metrics
        .canonical_metrics_for_campaigns(&campaign_ids)
        .await
        .map_err(ApiError::InternalServerError)?;

    Ok(web::Json(CampaignMetricsResponse {
        metrics: metrics
            .into_iter()
            .map(|(campaign_id, record)| (campaign_id, record.into()))
            .collect(),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/metrics")
            .service(web::resource("").route(web::get().to(get_campaign_metrics))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_from_a_comma_separated_list() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let raw = format!(" {first} ,, {second},");

        let campaign_ids = parse_campaign_ids(&raw).unwrap();

        assert_eq!(
            campaign_ids,
            vec![CampaignId::from(first), CampaignId::from(second)]
        );
    }

    #[test]
    fn blank_input_parses_to_no_ids() {
        assert!(parse_campaign_ids("").unwrap().is_empty());
        assert!(parse_campaign_ids(" , ,").unwrap().is_empty());
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let result = parse_campaign_ids("not-a-uuid");
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
