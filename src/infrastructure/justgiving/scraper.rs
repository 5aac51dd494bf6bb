use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, warn};
use crate::{
    domain::{error::AutomationError, ports::AmountScraper},
    infrastructure::parsers::html_amount::extract_amount,
};

pub struct JustGivingScraper {
    client: Client,
}

impl JustGivingScraper {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, AutomationError> {
        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| AutomationError::Scrape(e.to_string()))?;

        debug!("Fetched {} with status {}", url, response.status());

        response
            .text()
            .await
            .map_err(|e| AutomationError::Scrape(e.to_string()))
    }
}

#[async_trait]
impl AmountScraper for JustGivingScraper {
    async fn get_raised_amount(&self, url: &str) -> String {
        if url.is_empty() {
            warn!("Attempted to scrape a JustGiving page with an empty URL.");
            return String::new();
        }

        let page = match self.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                error!("Error occurred while scraping the JustGiving page {}: {}", url, e);
                return String::new();
            }
        };

        let amount = extract_amount(&page);
        if amount.is_empty() {
            warn!("No fundraising amount found on the JustGiving page {}", url);
        }
        amount
    }
}
