use serde::{Deserialize, Serialize};
use url::Url;

/// A house or other real-estate object offered on Funda.
///
/// `id` and `image_url` are always known once the search result has been
/// parsed. The remaining fields are filled in from the detail call and stay
/// empty when the detail tree does not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub address: String,
    /// Canonical listing page, set once the detail call has been resolved.
    pub url: Option<Url>,
    pub image_url: Url,
    /// Asking price as displayed, e.g. "€ 400.000 k.k.".
    #[serde(default)]
    pub price: String,
    /// Living area with unit suffix, e.g. "68 m²".
    #[serde(default)]
    pub surface_area: String,
    /// Room count, possibly composite, e.g. "3 kamers (1 slaapkamer)".
    #[serde(default)]
    pub rooms: String,
}

impl Listing {
    pub fn new(id: u64, address: impl Into<String>, image_url: Url) -> Self {
        Self {
            id,
            address: address.into(),
            url: None,
            image_url,
            price: String::new(),
            surface_area: String::new(),
            rooms: String::new(),
        }
    }

    /// True when none of the detail fields have been filled in.
    pub fn is_bare(&self) -> bool {
        self.url.is_none()
            && self.price.is_empty()
            && self.surface_area.is_empty()
            && self.rooms.is_empty()
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.address, self.id)?;
        if !self.price.is_empty() {
            write!(f, " - {}", self.price)?;
        }
        if !self.surface_area.is_empty() {
            write!(f, " | {}", self.surface_area)?;
        }
        if !self.rooms.is_empty() {
            write!(f, " | {}", self.rooms)?;
        }
        if let Some(ref url) = self.url {
            write!(f, " | {url}")?;
        }
        Ok(())
    }
}
