use serde::Deserialize;
use tracing::{debug, trace};

use super::null_as_default;
use crate::domain::listing::Listing;
use crate::error::{FundaError, Result, parse_absolute_url};

/// `ItemType` of an actual property; everything else is a promotional slot.
const GENUINE_ITEM_TYPE: i64 = 1;

/// Address, price and size lines are spread over the first four info blocks.
const MIN_INFO_BLOCKS: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    item_type: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    global_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    fotos: Vec<Foto>,
    #[serde(default, deserialize_with = "null_as_default")]
    info: Vec<InfoBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Foto {
    #[serde(default, deserialize_with = "null_as_default")]
    link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InfoBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    line: Vec<InfoLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InfoLine {
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
}

/// Parse a `/Aanbod/koop` response body into partially populated listings.
///
/// Promotional entries are skipped. Output order follows the payload. A
/// `null` body is an empty page.
pub fn parse_search_results(payload: &[u8]) -> Result<Vec<Listing>> {
    let entries =
        serde_json::from_slice::<Option<Vec<SearchEntry>>>(payload)?.unwrap_or_default();
    let total = entries.len();

    let mut listings = Vec::new();
    for entry in entries {
        if entry.item_type != GENUINE_ITEM_TYPE {
            trace!(
                item_type = entry.item_type,
                id = entry.global_id,
                "Skipping promotional search entry"
            );
            continue;
        }
        listings.push(listing_from_entry(entry)?);
    }

    debug!(
        entries = total,
        listings = listings.len(),
        "Parsed search results"
    );
    Ok(listings)
}

fn listing_from_entry(entry: SearchEntry) -> Result<Listing> {
    let Some(photo) = entry.fotos.first() else {
        return Err(FundaError::malformed(format!(
            "result {} does not have photos",
            entry.global_id
        )));
    };

    if entry.info.len() < MIN_INFO_BLOCKS {
        return Err(FundaError::malformed(format!(
            "result {} has {} info blocks, expected at least {MIN_INFO_BLOCKS}",
            entry.global_id,
            entry.info.len()
        )));
    }

    if entry.info.iter().any(|block| block.line.is_empty()) {
        return Err(FundaError::malformed(format!(
            "result {} has an info block without lines",
            entry.global_id
        )));
    }

    let image_url = parse_absolute_url(&photo.link)?;
    let address = entry.info[0].line[0].text.clone();

    trace!(id = entry.global_id, link = %entry.link, "Parsed search entry");
    Ok(Listing::new(entry.global_id, address, image_url))
}
