//! Field finder generation.

/// Generates `find_by_<field>` associated functions on a resource type.
///
/// The type must have a `MAPPER` constant of type
/// [`ResourceMapper`](crate::rest::ResourceMapper). Each generated finder
/// filters on one field and returns the first match as
/// [`ResourceMapper::find_by`](crate::rest::ResourceMapper::find_by) does:
/// an id unless `options` asks for a display.
///
/// # Example
///
/// ```rust,ignore
/// use prestashop_mapper::finders;
/// use prestashop_mapper::rest::ResourceMapper;
///
/// pub struct Manufacturer;
///
/// impl Manufacturer {
///     pub const MAPPER: ResourceMapper = ResourceMapper::new("manufacturers", "manufacturer");
/// }
///
/// finders!(Manufacturer {
///     find_by_name => "name",
///     find_by_active => "active",
/// });
///
/// let id = Manufacturer::find_by_name(&client, "BMW", QueryOptions::new()).await?;
/// ```
#[macro_export]
macro_rules! finders {
    ($ty:ident { $($finder:ident => $field:literal),+ $(,)? }) => {
        impl $ty {
            $(
                #[doc = concat!("Returns the first entity whose `", $field, "` equals `value`.")]
                ///
                /// # Errors
                ///
                /// Returns `ResourceError::Transport` if the read fails.
                pub async fn $finder<T: $crate::clients::Transport>(
                    client: &T,
                    value: impl ::std::string::ToString,
                    options: $crate::rest::QueryOptions,
                ) -> ::std::result::Result<
                    ::std::option::Option<$crate::rest::QueryItem>,
                    $crate::rest::ResourceError,
                > {
                    Self::MAPPER
                        .find_by(client, options.filter($field, value.to_string()))
                        .await
                }
            )+
        }
    };
}
