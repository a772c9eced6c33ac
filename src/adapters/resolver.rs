use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::funda::parsers::detail::DetailTreeFlattener;
use crate::adapters::funda::parsers::search::parse_search_results;
use crate::domain::listing::Listing;
use crate::domain::report::{ListingOutcome, SearchReport};
use crate::domain::search_params::SearchQuery;
use crate::error::Result;
use crate::ports::funda_api::FundaApi;

/// Turns search pages into fully populated listings.
///
/// A search page that cannot be fetched or parsed fails as a whole. A listing
/// whose detail call fails is logged, recorded as
/// [`ListingOutcome::Failed`] and the rest of the page carries on.
pub struct ListingResolver {
    api: Arc<dyn FundaApi>,
    flattener: DetailTreeFlattener,
}

impl ListingResolver {
    pub fn new(api: Arc<dyn FundaApi>, flattener: DetailTreeFlattener) -> Self {
        Self { api, flattener }
    }

    pub async fn resolve_page(&self, query: &SearchQuery) -> Result<SearchReport> {
        query.validate()?;

        let body = self.api.fetch_search(query).await?;
        let listings = parse_search_results(body.as_bytes())?;
        debug!(
            page = query.page,
            listings = listings.len(),
            "Resolving listing details"
        );

        let mut outcomes = Vec::with_capacity(listings.len());
        for mut listing in listings {
            let id = listing.id;
            match self.resolve_details(&mut listing).await {
                Ok(()) => outcomes.push(ListingOutcome::Resolved(listing)),
                Err(e) => {
                    warn!(id, error = %e, "Could not get listing details, skipping");
                    outcomes.push(ListingOutcome::Failed {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let report = SearchReport::new(query.page, outcomes);
        info!(
            page = report.page,
            resolved = report.listings().count(),
            failed = report.failures().count(),
            "Search page resolved"
        );
        Ok(report)
    }

    /// Resolve up to `pages` consecutive pages starting at `query.page`.
    /// Stops after the first page without genuine listings.
    pub async fn resolve_pages(&self, query: &SearchQuery, pages: u32) -> Result<Vec<SearchReport>> {
        let mut reports = Vec::new();
        for offset in 0..pages {
            let page = query.page.saturating_add(offset);
            let report = self.resolve_page(&query.with_page(page)).await?;
            let last = report.is_empty();
            reports.push(report);
            if last {
                debug!(page, "No more listings");
                break;
            }
        }
        Ok(reports)
    }

    async fn resolve_details(&self, listing: &mut Listing) -> Result<()> {
        let body = self.api.fetch_detail(listing.id).await?;
        self.flattener.populate(listing, body.as_bytes())
    }
}
