use thiserror::Error;

pub type Result<T> = std::result::Result<T, MplError>;

#[derive(Debug, Error)]
pub enum MplError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MplError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingConfig(_) => "MISSING_CONFIG",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            Self::Http(_) => "HTTP_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_lists_every_name() {
        let err = MplError::MissingConfig(vec!["DEV_SAP_USERNAME".to_string(), "IFLOW_URL".to_string()]);
        assert_eq!(err.code(), "MISSING_CONFIG");
        assert_eq!(
            err.to_string(),
            "missing required environment variables: DEV_SAP_USERNAME, IFLOW_URL"
        );
    }

    #[test]
    fn upstream_status_renders_status_and_body() {
        let err = MplError::UpstreamStatus {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.code(), "UPSTREAM_STATUS");
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("unauthorized"));
    }
}
