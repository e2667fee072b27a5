//! Concrete resources.
//!
//! Every resource is a type holding a [`ResourceMapper`](crate::rest::ResourceMapper)
//! constant named `MAPPER`; generic CRUD goes through it and the type adds
//! its own lookups:
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::{Country, Tax};
//! use prestashop_mapper::rest::QueryOptions;
//!
//! let country = Country::find_by_iso_code(&client, "CZ", QueryOptions::new()).await?;
//! let tax = Tax::MAPPER.find(&client, 1).await?;
//! let groups = Tax::by_country_iso(&client, "CZ").await?;
//! ```
//!
//! # Available Resources
//!
//! | Type | Resource | Extras |
//! |------|----------|--------|
//! | [`Country`] | `countries` | `find_by_iso_code` |
//! | [`Image`] | `images` | batch upload |
//! | [`ProductFeatureValue`] | `product_feature_values` | typed, validated create |
//! | [`Tax`] | `taxes` | rate to tax rules group per country |
//! | [`TaxRule`] | `tax_rules` | rules of one country |

mod country;
mod image;
mod product_feature_value;
mod tax;
mod tax_rule;

pub use country::Country;
pub use image::Image;
pub use product_feature_value::ProductFeatureValue;
pub use tax::Tax;
pub use tax_rule::TaxRule;
