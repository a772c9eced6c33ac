use async_trait::async_trait;

use crate::domain::search_params::SearchQuery;
use crate::error::Result;

/// Raw access to the Funda mobile API.
///
/// Implementations return the response body of a successful (HTTP 200) call
/// and leave all decoding to the parsers.
#[async_trait]
pub trait FundaApi: Send + Sync {
    async fn fetch_search(&self, query: &SearchQuery) -> Result<String>;
    async fn fetch_detail(&self, id: u64) -> Result<String>;
}
