use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info, warn};
use crate::{
    application::update_service::UpdateService,
    domain::{error::AutomationError, models::UpdateRequest},
    infrastructure::{justgiving::scraper::JustGivingScraper, streak::client::StreakClient},
};

pub const CREDENTIAL_HEADER: &str = "x-StreakAPI";
pub const TRIGGER_ROUTE: &str = "/api/UpdateJustGivingRaisedAmountInStreak";

const DEFAULT_BASE_URL: &str = "https://api.streak.com/api/v1/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:7071";

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub bind_address: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, AutomationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AutomationError> {
        let mut base_url = lookup("STREAK_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>()
                .map_err(|e| AutomationError::Config(format!("HTTP_TIMEOUT_SECS '{}': {}", raw, e)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let raw_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = raw_address.parse::<SocketAddr>()
            .map_err(|e| AutomationError::Config(format!("BIND_ADDRESS '{}': {}", raw_address, e)))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            bind_address,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TriggerRequest {
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
}

impl TriggerRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        lookup_ignore_case(&self.headers, name)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        lookup_ignore_case(&self.query, name)
    }

    fn to_update_request(&self) -> UpdateRequest {
        let owned = |value: Option<&str>| value.unwrap_or_default().to_string();
        UpdateRequest {
            credential: owned(self.header(CREDENTIAL_HEADER)),
            pipeline_key: owned(self.query_param("boxKey")),
            source_field_id: owned(self.query_param("fieldid")),
            dest_field_id: owned(self.query_param("fieldtoupdateid")),
        }
    }
}

fn lookup_ignore_case<'a>(map: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerResponse {
    Ok(Vec<String>),
    BadRequest(String),
    NotFound(String),
    // Any other error kind; the update service only returns Validation and NotFound today.
    Failed(u16, String),
}

impl TriggerResponse {
    pub fn status(&self) -> u16 {
        match self {
            TriggerResponse::Ok(_) => 200,
            TriggerResponse::BadRequest(_) => 400,
            TriggerResponse::NotFound(_) => 404,
            TriggerResponse::Failed(status, _) => *status,
        }
    }
}

impl From<AutomationError> for TriggerResponse {
    fn from(e: AutomationError) -> Self {
        match e {
            AutomationError::Validation(msg) => TriggerResponse::BadRequest(msg),
            AutomationError::NotFound(msg) => TriggerResponse::NotFound(msg),
            other => TriggerResponse::Failed(other.status_code(), other.to_string()),
        }
    }
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        match self {
            TriggerResponse::Ok(urls) => (StatusCode::OK, Json(urls)).into_response(),
            TriggerResponse::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            TriggerResponse::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            TriggerResponse::Failed(status, msg) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, msg).into_response()
            }
        }
    }
}

pub struct FunctionService {
    service: UpdateService,
}

impl FunctionService {
    pub fn new(service: UpdateService) -> Self {
        Self { service }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AutomationError> {
        debug!("Initializing function service");

        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AutomationError::Config(e.to_string()))?;
        debug!("Shared HTTP client initialized with timeout {:?}", settings.timeout);

        info!("Using Streak API at: {}", settings.base_url);
        let crm_client = Arc::new(StreakClient::new(http_client.clone(), settings.base_url.clone()));
        let scraper = Arc::new(JustGivingScraper::new(http_client));

        Ok(Self::new(UpdateService::new(crm_client, scraper)))
    }

    pub async fn handle(&self, request: &TriggerRequest) -> TriggerResponse {
        let update_request = request.to_update_request();

        match self.service.update_raised_amounts(&update_request).await {
            Ok(summary) => TriggerResponse::Ok(summary.updated_urls),
            Err(e) => {
                match &e {
                    AutomationError::Validation(msg) => warn!("Rejected trigger: {}", msg),
                    AutomationError::NotFound(msg) => warn!("{}", msg),
                    other => error!("Update run failed: {}", other),
                }
                TriggerResponse::from(e)
            }
        }
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route(TRIGGER_ROUTE, get(trigger_handler))
            .route("/health", get(|| async { "ok" }))
            .with_state(self)
    }

    pub async fn run(self: Arc<Self>, bind_address: SocketAddr) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = tokio::net::TcpListener::bind(bind_address).await
            .map_err(|e| {
                error!("Failed to bind {}: {}", bind_address, e);
                e
            })?;
        info!("Listening for triggers on {}{}", bind_address, TRIGGER_ROUTE);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn trigger_handler(
    State(service): State<Arc<FunctionService>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> TriggerResponse {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    service.handle(&TriggerRequest { headers, query }).await
}
