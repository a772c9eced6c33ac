use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, trace};
use url::Url;

use crate::config::types::ApiConfig;
use crate::domain::search_params::SearchQuery;
use crate::error::{FundaError, Result, parse_absolute_url};
use crate::ports::funda_api::FundaApi;

const ACCEPTED_COOKIE_POLICY: &str = "10";
const STORED_DATA_COOKIE: &str =
    "X-Stored-Data=null; expires=Fri, 31 Dec 9999 23:59:59 GMT; path=/; samesite=lax; httponly";
const ACCEPT_LANGUAGE: &str = "nl-NL";

/// HTTP client for the Funda mobile API.
pub struct FundaHttpClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FundaHttpClient {
    pub fn new(config: &ApiConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        build_search_url(&self.base_url, query)
    }

    fn detail_url(&self, id: u64) -> Result<Url> {
        parse_absolute_url(&format!("{}/Aanbod/Detail/Koop/{id}", self.base_url))
    }

    /// GET `url` with the app headers and return the body of a 200 response.
    async fn get(&self, url: Url) -> Result<String> {
        debug!(url = %url, "Funda GET request");

        let response = self
            .http
            .get(url.as_str())
            .header("api_key", &self.api_key)
            .header("accepted_cookie_policy", ACCEPTED_COOKIE_POLICY)
            .header("Cookie", STORED_DATA_COOKIE)
            .header("Accept", "application/json")
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(FundaError::Http)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FundaError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(FundaError::Http)?;
        debug!(url = %url, body_len = body.len(), "Funda response received");
        trace!(body = %body, "Funda raw response");
        Ok(body)
    }
}

#[async_trait]
impl FundaApi for FundaHttpClient {
    async fn fetch_search(&self, query: &SearchQuery) -> Result<String> {
        query.validate()?;
        let url = self.search_url(query)?;
        self.get(url).await
    }

    async fn fetch_detail(&self, id: u64) -> Result<String> {
        let url = self.detail_url(id)?;
        self.get(url).await
    }
}

fn build_search_url(base_url: &str, query: &SearchQuery) -> Result<Url> {
    let mut url = parse_absolute_url(&format!("{base_url}/Aanbod/koop{}", query.options))?;
    url.query_pairs_mut().extend_pairs(query.to_query_pairs());
    Ok(url)
}
