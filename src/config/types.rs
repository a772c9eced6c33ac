use serde::{Deserialize, Serialize};

use crate::adapters::funda::parsers::detail::DEFAULT_MAX_TREE_DEPTH;
use crate::domain::search_params::SearchQuery;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub detail: DetailConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search path appended to `/Aanbod/koop`, e.g. `/amsterdam/`.
    #[serde(default)]
    pub options: String,
    #[serde(default = "default_start_page")]
    pub start_page: u32,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            options: String::new(),
            start_page: default_start_page(),
            pages: default_pages(),
            page_size: default_page_size(),
        }
    }
}

impl SearchConfig {
    pub fn first_query(&self) -> SearchQuery {
        SearchQuery::new(self.options.clone(), self.start_page, self.page_size)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetailConfig {
    #[serde(default = "default_max_tree_depth")]
    pub max_tree_depth: usize,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            max_tree_depth: default_max_tree_depth(),
        }
    }
}

fn default_base_url() -> String {
    "https://mobile.funda.io/api/v1".into()
}

fn default_user_agent() -> String {
    "Funda/2.17.0 (com.funda.two; build:80; Android 25) okhttp/3.5.0".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_start_page() -> u32 {
    1
}

fn default_pages() -> u32 {
    1
}

fn default_page_size() -> u32 {
    25
}

fn default_max_tree_depth() -> usize {
    DEFAULT_MAX_TREE_DEPTH
}
