//! Country resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::Country;
//! use prestashop_mapper::rest::QueryOptions;
//!
//! let czech = Country::find_by_iso_code(&client, "CZ", QueryOptions::new()).await?;
//! ```

use crate::finders;
use crate::rest::ResourceMapper;

/// Countries known to the shop (`/api/countries`).
#[derive(Clone, Copy, Debug)]
pub struct Country;

impl Country {
    /// CRUD operations on countries.
    pub const MAPPER: ResourceMapper = ResourceMapper::new("countries", "country");
}

finders!(Country {
    find_by_iso_code => "iso_code",
});
