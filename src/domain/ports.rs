use async_trait::async_trait;
use crate::domain::{error::AutomationError, models::BoxKey};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Keys of every box in the pipeline, or `None` when the listing could not be read.
    async fn get_box_keys(&self, credential: &str, pipeline_key: &str) -> Option<Vec<BoxKey>>;

    /// Value of a field on a box; `None` when the field could not be read.
    async fn get_box_url(&self, credential: &str, box_key: &str, field_id: &str) -> Option<String>;

    async fn post_field(
        &self,
        credential: &str,
        box_key: &str,
        value: &str,
        field_id: &str,
    ) -> Result<String, AutomationError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmountScraper: Send + Sync {
    /// Raised total shown on the page, or an empty string if it cannot be determined.
    async fn get_raised_amount(&self, url: &str) -> String;
}
