use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::search_params::SearchQuery;
use crate::error::Result;
use crate::ports::funda_api::FundaApi;

type SearchFn = Box<dyn Fn(&SearchQuery) -> Result<String> + Send + Sync>;
type DetailFn = Box<dyn Fn(u64) -> Result<String> + Send + Sync>;

/// Closure-backed [`FundaApi`]. Defaults to an empty search page and an empty
/// detail tree.
pub struct MockFundaApi {
    search_fn: SearchFn,
    detail_fn: DetailFn,
}

impl Default for MockFundaApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFundaApi {
    pub fn new() -> Self {
        Self {
            search_fn: Box::new(|_| Ok("[]".into())),
            detail_fn: Box::new(|_| Ok("[]".into())),
        }
    }

    #[must_use]
    pub fn with_search(
        mut self,
        f: impl Fn(&SearchQuery) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.search_fn = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, f: impl Fn(u64) -> Result<String> + Send + Sync + 'static) -> Self {
        self.detail_fn = Box::new(f);
        self
    }
}

#[async_trait]
impl FundaApi for MockFundaApi {
    async fn fetch_search(&self, query: &SearchQuery) -> Result<String> {
        (self.search_fn)(query)
    }

    async fn fetch_detail(&self, id: u64) -> Result<String> {
        (self.detail_fn)(id)
    }
}

/// A search entry with a photo and four single-line info blocks.
pub fn search_entry(item_type: i64, id: u64) -> Value {
    json!({
        "ItemType": item_type,
        "GlobalId": id,
        "Link": format!("https://mobile.funda.io/api/v1/Aanbod/Detail/Koop/{id}"),
        "Fotos": [{ "Link": format!("https://cloud.funda.nl/valentina_media/{id}_720x480.jpg") }],
        "Info": [
            { "Line": [{ "Text": format!("Teststraat {id}") }] },
            { "Line": [{ "Text": "1000 AA Amsterdam" }] },
            { "Line": [{ "Text": "€ 250.000 k.k." }] },
            { "Line": [{ "Text": "50 m²" }] }
        ]
    })
}

pub fn search_body(entries: &[Value]) -> String {
    Value::Array(entries.to_vec()).to_string()
}

/// A detail response with a canonical URL and a nested asking price.
pub fn detail_body(id: u64, price: &str) -> String {
    json!([
        { "URL": format!("https://www.funda.nl/{id}"), "Section": 1, "List": [] },
        {
            "Section": 4,
            "List": [{
                "Label": "Overdracht",
                "List": [{ "Label": "Vraagprijs", "Value": price }]
            }]
        }
    ])
    .to_string()
}
