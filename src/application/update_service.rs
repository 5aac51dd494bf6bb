use std::sync::Arc;
use futures_util::future::join_all;
use tracing::{debug, info, warn};
use crate::domain::{
    error::AutomationError,
    models::{BoxOutcome, UpdateRequest, UpdateSummary},
    ports::{AmountScraper, CrmClient},
};

pub struct UpdateService {
    crm_client: Arc<dyn CrmClient>,
    scraper: Arc<dyn AmountScraper>,
}

impl UpdateService {
    pub fn new(crm_client: Arc<dyn CrmClient>, scraper: Arc<dyn AmountScraper>) -> Self {
        Self { crm_client, scraper }
    }

    pub async fn update_raised_amounts(&self, request: &UpdateRequest) -> Result<UpdateSummary, AutomationError> {
        info!("UpdateJustGivingRaisedAmountInStreak Started.");

        // Step 1: Validate inputs
        request.validate()?;
        debug!("Step 1: Request valid - pipeline: {}, source field: {}, destination field: {}",
            request.pipeline_key, request.source_field_id, request.dest_field_id);

        // Step 2: List related boxes
        debug!("Step 2: Listing boxes for pipeline: {}", request.pipeline_key);
        let box_keys = match self.crm_client.get_box_keys(&request.credential, &request.pipeline_key).await {
            Some(keys) if !keys.is_empty() => keys,
            _ => {
                warn!("No box keys found for pipeline: {}", request.pipeline_key);
                return Err(AutomationError::NotFound(
                    "No box keys found for the specified box key.".to_string(),
                ));
            }
        };
        info!("Updating {} boxes", box_keys.len());

        // Step 3: Update every box concurrently
        let updates = box_keys.iter().map(|key| self.update_box(request, key));
        let outcomes = join_all(updates).await;

        // Step 4: Aggregate
        let summary = UpdateSummary::from_outcomes(outcomes);
        info!("UpdateJustGivingRaisedAmountInStreak Completed. {} updated, {} skipped, {} failed writes",
            summary.updated_urls.len(), summary.skipped, summary.write_failures);
        Ok(summary)
    }

    async fn update_box(&self, request: &UpdateRequest, key: &str) -> BoxOutcome {
        let url = match self.crm_client.get_box_url(&request.credential, key, &request.source_field_id).await {
            Some(url) if !url.is_empty() => url,
            _ => {
                debug!("Box {} has no donation URL, skipping", key);
                return BoxOutcome::Skipped;
            }
        };

        let amount = self.scraper.get_raised_amount(&url).await;
        debug!("Box {} raised '{}' at {}", key, amount, url);

        match self.crm_client.post_field(&request.credential, key, &amount, &request.dest_field_id).await {
            Ok(_) => BoxOutcome::Updated { url },
            Err(error) => {
                warn!("Write to box {} failed but it is still reported as updated: {}", key, error);
                BoxOutcome::WriteFailed { url, error }
            }
        }
    }
}
