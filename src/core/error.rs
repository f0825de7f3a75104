/// Page behavior errors
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("required element not found: {selector}")]
    MissingElement { selector: String },

    #[error("invalid page configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("browser call failed: {0}")]
    Host(String),
}

impl PageError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}
