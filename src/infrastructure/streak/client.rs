use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, error, info, warn};
use crate::{
    domain::{error::AutomationError, models::BoxKey, ports::CrmClient},
    infrastructure::parsers::json_extract::{extract_keys, extract_value},
};

pub struct StreakClient {
    client: Client,
    base_url: String,
}

impl StreakClient {
    pub fn new(client: Client, base_url: String) -> Self {
        debug!("Initializing Streak client for base URL: {}", base_url);
        Self { client, base_url }
    }

    fn boxes_url(&self, pipeline_key: &str) -> String {
        format!("{}pipelines/{}/boxes", self.base_url, pipeline_key)
    }

    fn field_url(&self, box_key: &str, field_id: &str) -> String {
        format!("{}boxes/{}/fields/{}", self.base_url, box_key, field_id)
    }

    async fn get_authorized(&self, credential: &str, url: &str) -> Result<String, AutomationError> {
        let response = self.client
            .get(url)
            .header(header::AUTHORIZATION, format!("Basic {}", credential))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutomationError::Request {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CrmClient for StreakClient {
    async fn get_box_keys(&self, credential: &str, pipeline_key: &str) -> Option<Vec<BoxKey>> {
        let url = self.boxes_url(pipeline_key);
        debug!("Listing boxes: {}", url);

        let body = match self.get_authorized(credential, &url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not list boxes for pipeline {}: {}", pipeline_key, e);
                return None;
            }
        };

        match extract_keys(&body) {
            Ok(keys) => {
                info!("Found {} box keys in pipeline {}", keys.len(), pipeline_key);
                Some(keys)
            }
            Err(e) => {
                error!("Box listing for pipeline {} was not usable: {}", pipeline_key, e);
                None
            }
        }
    }

    async fn get_box_url(&self, credential: &str, box_key: &str, field_id: &str) -> Option<String> {
        let url = self.field_url(box_key, field_id);
        debug!("Reading field {} of box {}", field_id, box_key);

        match self.get_authorized(credential, &url).await {
            Ok(body) => Some(extract_value(&body)),
            Err(e) => {
                error!("Error occurred: {}", e);
                None
            }
        }
    }

    async fn post_field(
        &self,
        credential: &str,
        box_key: &str,
        value: &str,
        field_id: &str,
    ) -> Result<String, AutomationError> {
        let url = self.field_url(box_key, field_id);
        debug!("Writing field {} of box {}", field_id, box_key);

        let body = serde_json::json!({ "value": value });

        let response = self.client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Basic {}", credential))
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Exception caught while posting to Streak: {}", e);
                AutomationError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Posting field {} of box {} failed with status {}", field_id, box_key, status);
            return Err(AutomationError::Request {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}
