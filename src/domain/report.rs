use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::listing::Listing;

/// What happened to one genuine listing of a search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListingOutcome {
    Resolved(Listing),
    Failed { id: u64, reason: String },
}

impl ListingOutcome {
    pub fn id(&self) -> u64 {
        match self {
            Self::Resolved(listing) => listing.id,
            Self::Failed { id, .. } => *id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Result of resolving one search page: one outcome per genuine listing, in
/// search order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub page: u32,
    pub fetched_at: DateTime<Utc>,
    pub outcomes: Vec<ListingOutcome>,
}

impl SearchReport {
    pub fn new(page: u32, outcomes: Vec<ListingOutcome>) -> Self {
        Self {
            page,
            fetched_at: Utc::now(),
            outcomes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.outcomes.iter().filter_map(|o| match o {
            ListingOutcome::Resolved(listing) => Some(listing),
            ListingOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (u64, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            ListingOutcome::Failed { id, reason } => Some((*id, reason.as_str())),
            ListingOutcome::Resolved(_) => None,
        })
    }

    /// Completed listings only; failed ones are dropped.
    pub fn into_listings(self) -> Vec<Listing> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                ListingOutcome::Resolved(listing) => Some(listing),
                ListingOutcome::Failed { .. } => None,
            })
            .collect()
    }
}

impl std::fmt::Display for SearchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resolved = self.listings().count();
        writeln!(
            f,
            "Page {}: {resolved} of {} listings resolved",
            self.page,
            self.outcomes.len()
        )?;
        for listing in self.listings() {
            writeln!(f, "- {listing}")?;
        }
        for (id, reason) in self.failures() {
            writeln!(f, "! {id}: {reason}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn listing(id: u64) -> Listing {
        Listing::new(
            id,
            format!("Straat {id}"),
            Url::parse("https://cloud.funda.nl/a.jpg").unwrap(),
        )
    }

    fn mixed_report() -> SearchReport {
        SearchReport::new(
            1,
            vec![
                ListingOutcome::Resolved(listing(1)),
                ListingOutcome::Failed {
                    id: 2,
                    reason: "HTTP 500".into(),
                },
                ListingOutcome::Resolved(listing(3)),
            ],
        )
    }

    #[test]
    fn every_outcome_is_accounted_for() {
        let report = mixed_report();
        assert_eq!(report.listings().count() + report.failures().count(), 3);
        let ids: Vec<u64> = report.outcomes.iter().map(ListingOutcome::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn into_listings_drops_failures() {
        let ids: Vec<u64> = mixed_report().into_listings().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn display_lists_failures() {
        let text = mixed_report().to_string();
        assert!(text.contains("2 of 3 listings resolved"));
        assert!(text.contains("! 2: HTTP 500"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let failed = ListingOutcome::Failed {
            id: 7,
            reason: "boom".into(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["id"], 7);
        assert!(!failed.is_resolved());
    }
}
