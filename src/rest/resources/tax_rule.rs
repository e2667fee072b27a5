//! Tax rule resource.
//!
//! A tax rule ties a tax to a tax rules group for one country.

use crate::clients::Transport;
use crate::finders;
use crate::rest::{Display, QueryItem, QueryOptions, ResourceError, ResourceId, ResourceMapper};
use crate::xml::AttributeSet;

/// Tax rules (`/api/tax_rules`).
#[derive(Clone, Copy, Debug)]
pub struct TaxRule;

impl TaxRule {
    /// CRUD operations on tax rules.
    pub const MAPPER: ResourceMapper = ResourceMapper::new("tax_rules", "tax_rule");

    /// Returns the rules of one country with `id_tax` and
    /// `id_tax_rules_group` displayed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails.
    pub async fn by_country_id<T: Transport>(
        client: &T,
        id_country: ResourceId,
    ) -> Result<Vec<AttributeSet>, ResourceError> {
        let options = QueryOptions::new()
            .filter("id_country", id_country)
            .display(Display::fields(["id_tax", "id_tax_rules_group"]));

        let result = Self::MAPPER.query(client, options).await?;
        Ok(result
            .into_iter()
            .filter_map(QueryItem::into_record)
            .collect())
    }
}

finders!(TaxRule {
    find_by_id_tax_rules_group => "id_tax_rules_group",
});
