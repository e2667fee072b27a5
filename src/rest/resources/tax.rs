//! Tax resource and the country rate lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::Tax;
//!
//! // {"21": 1, "15": 2, "10": 3}: integer rate to tax rules group
//! let groups = Tax::by_country_iso(&client, "CZ").await?;
//! let standard_group = groups.get("21");
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::clients::Transport;
use crate::rest::normalize::id_value;
use crate::rest::resources::{Country, TaxRule};
use crate::rest::{QueryOptions, ResourceError, ResourceId, ResourceMapper};

/// Taxes (`/api/taxes`).
#[derive(Clone, Copy, Debug)]
pub struct Tax;

impl Tax {
    /// CRUD operations on taxes.
    pub const MAPPER: ResourceMapper = ResourceMapper::new("taxes", "tax");

    /// Maps each tax rate applied in a country to its tax rules group.
    ///
    /// Rates are keyed by their integer part as text (`"21.000"` becomes
    /// `"21"`). Rules whose tax cannot be read are skipped; when two rules
    /// share a rate the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if a read fails.
    pub async fn by_country_id<T: Transport>(
        client: &T,
        id_country: ResourceId,
    ) -> Result<BTreeMap<String, ResourceId>, ResourceError> {
        let mut taxes = BTreeMap::new();

        for rule in TaxRule::by_country_id(client, id_country).await? {
            let Some(id_tax) = rule.get("id_tax").and_then(id_value) else {
                continue;
            };
            let Some(group) = rule.get("id_tax_rules_group").and_then(id_value) else {
                continue;
            };
            let Some(tax) = Self::MAPPER.find(client, id_tax).await? else {
                continue;
            };
            if let Some(rate) = tax.get("rate").and_then(integer_rate) {
                taxes.insert(rate, group);
            }
        }

        Ok(taxes)
    }

    /// Same as [`by_country_id`](Self::by_country_id) for a country given by
    /// ISO code. An unknown country gives an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if a read fails.
    pub async fn by_country_iso<T: Transport>(
        client: &T,
        iso_code: &str,
    ) -> Result<BTreeMap<String, ResourceId>, ResourceError> {
        let country = Country::find_by_iso_code(client, iso_code, QueryOptions::new()).await?;
        match country.and_then(|item| item.id()) {
            Some(id_country) => Self::by_country_id(client, id_country).await,
            None => Ok(BTreeMap::new()),
        }
    }
}

/// `"21.000"` -> `"21"`, `7` -> `"7"`.
fn integer_rate(rate: &Value) -> Option<String> {
    let rate = match rate {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !rate.is_finite() {
        return None;
    }
    Some(format!("{}", rate.trunc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_rate() {
        assert_eq!(integer_rate(&json!("21.000")), Some("21".to_string()));
        assert_eq!(integer_rate(&json!("10.500")), Some("10".to_string()));
        assert_eq!(integer_rate(&json!(7)), Some("7".to_string()));
        assert_eq!(integer_rate(&json!("0.000")), Some("0".to_string()));
        assert_eq!(integer_rate(&json!("n/a")), None);
        assert_eq!(integer_rate(&Value::Null), None);
    }
}
