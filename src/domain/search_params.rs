use serde::{Deserialize, Serialize};

use crate::error::{FundaError, Result};

/// One page of a Funda "koop" search.
///
/// `options` is the opaque search path appended to `/Aanbod/koop`, for
/// example `/amsterdam/` or `/amsterdam/200000-400000/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub options: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            options: String::new(),
            page: 1,
            page_size: 25,
        }
    }
}

impl SearchQuery {
    pub fn new(options: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            options: options.into(),
            page,
            page_size,
        }
    }

    /// The same query moved to another page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.options.is_empty() && !self.options.starts_with('/') {
            return Err(FundaError::InvalidQuery {
                reason: format!(
                    "search options '{}' must be empty or start with '/'",
                    self.options
                ),
            });
        }

        // Query string and fragment are built by the client
        if self.options.contains(['?', '#']) {
            return Err(FundaError::InvalidQuery {
                reason: format!(
                    "search options '{}' must not contain '?' or '#'",
                    self.options
                ),
            });
        }

        if self.options.chars().any(char::is_whitespace) {
            return Err(FundaError::InvalidQuery {
                reason: "search options must not contain whitespace".into(),
            });
        }

        Ok(())
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_valid() {
        assert!(SearchQuery::default().validate().is_ok());
    }

    #[test]
    fn path_options_are_valid() {
        let query = SearchQuery::new("/amsterdam/200000-400000/", 2, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn options_without_leading_slash_fail() {
        let query = SearchQuery::new("amsterdam/", 1, 25);
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("start with '/'"));
    }

    #[test]
    fn options_with_query_string_fail() {
        let query = SearchQuery::new("/amsterdam/?page=3", 1, 25);
        assert!(query.validate().is_err());
    }

    #[test]
    fn options_with_whitespace_fail() {
        let query = SearchQuery::new("/den haag/", 1, 25);
        assert!(query.validate().is_err());
    }

    #[test]
    fn with_page_keeps_other_fields() {
        let query = SearchQuery::new("/utrecht/", 1, 15).with_page(4);
        assert_eq!(query.page, 4);
        assert_eq!(query.page_size, 15);
        assert_eq!(query.options, "/utrecht/");
    }

    #[test]
    fn query_pairs_use_api_names() {
        let pairs = SearchQuery::new("", 3, 50).to_query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "3".to_string()), ("pageSize", "50".to_string())]
        );
    }
}
