use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request to {url} failed with status {status}")]
    Request { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AutomationError {
    /// HTTP status the trigger answers with when this error ends an invocation.
    pub fn status_code(&self) -> u16 {
        match self {
            AutomationError::Validation(_) => 400,
            AutomationError::NotFound(_) => 404,
            AutomationError::Request { status, .. } => *status,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for AutomationError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AutomationError::Request {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => AutomationError::Transport(e.to_string()),
        }
    }
}
