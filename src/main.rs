use std::sync::Arc;
use streak_fundraising::function_service::{FunctionService, Settings};
use tracing::{info, debug};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("streak_fundraising=debug".parse()?)
            .add_directive("reqwest=info".parse()?)
            .add_directive("hyper=info".parse()?))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting Streak fundraising updater");
    debug!("Environment variables: STREAK_BASE_URL={}, HTTP_TIMEOUT_SECS={}, BIND_ADDRESS={}",
        std::env::var("STREAK_BASE_URL").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "not set".to_string())
    );

    let settings = Settings::from_env()?;
    let service = Arc::new(FunctionService::from_settings(&settings)?);
    info!("Function service initialized successfully");

    service.run(settings.bind_address).await
}
