pub mod detail;
pub mod search;

use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` the same way as a missing key.
///
/// Funda fills absent fields with `null` rather than leaving them out.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
