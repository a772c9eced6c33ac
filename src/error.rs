use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP response code ({status}) received from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed search result: {reason}")]
    MalformedResult { reason: String },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("detail tree nests deeper than {limit} levels")]
    TreeTooDeep { limit: usize },

    #[error("Invalid search query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl FundaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResult {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FundaError>;

/// Parse `raw` as an absolute URL, keeping the offending string in the error.
pub(crate) fn parse_absolute_url(raw: &str) -> Result<url::Url> {
    url::Url::parse(raw).map_err(|source| FundaError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_result_display() {
        let err = FundaError::malformed("result does not have photos");
        let msg = err.to_string();
        assert!(msg.contains("malformed"));
        assert!(msg.contains("photos"));
    }

    #[test]
    fn unexpected_status_display() {
        let err = FundaError::UnexpectedStatus {
            status: 503,
            url: "https://mobile.funda.io/api/v1/Aanbod/koop".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("/Aanbod/koop"));
    }

    #[test]
    fn tree_too_deep_display() {
        let err = FundaError::TreeTooDeep { limit: 8 };
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn parse_absolute_url_rejects_relative() {
        let err = parse_absolute_url("/koop/amsterdam/").unwrap_err();
        assert!(matches!(err, FundaError::InvalidUrl { ref url, .. } if url == "/koop/amsterdam/"));
        assert!(err.to_string().contains("/koop/amsterdam/"));
    }

    #[test]
    fn parse_absolute_url_accepts_absolute() {
        let url = parse_absolute_url("https://www.funda.nl/40443683").unwrap();
        assert_eq!(url.host_str(), Some("www.funda.nl"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{invalid").unwrap_err();
        let err: FundaError = json_err.into();
        assert!(matches!(err, FundaError::Decode(_)));
        assert!(err.to_string().contains("JSON decode error"));
    }
}
