use thiserror::Error;

/// Message returned when a mutation is submitted without a title or body.
pub const TITLE_AND_BODY_REQUIRED: &str = "Título y cuerpo son requeridos";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    pub fn title_and_body_required() -> Self {
        Self::Validation(TITLE_AND_BODY_REQUIRED.to_string())
    }

    /// HTTP-like status attached to the failure handed back to callers.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Network(_) | Self::Parse(_) => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
