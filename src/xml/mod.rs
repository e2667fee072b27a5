//! XML conversion between the webservice wire format and attribute maps.
//!
//! The webservice speaks XML wrapped in a `<prestashop>` root element. This
//! module turns response bodies into a [`ParsedDocument`] and attribute maps
//! into request payloads:
//!
//! - [`parse`]: response body to [`ParsedDocument`]
//! - [`build`]: a model name and its attributes to a wire payload
//!
//! # Document Shape
//!
//! ```text
//! <prestashop xmlns:xlink="http://www.w3.org/1999/xlink">
//!   <taxes>
//!     <tax id="1" xlink:href="http://shop/api/taxes/1"/>
//!     <tax id="2" xlink:href="http://shop/api/taxes/2"/>
//!   </taxes>
//! </prestashop>
//! ```
//!
//! parses to
//!
//! ```text
//! {"taxes": {"tax": [{"attr": {"id": 1, "href": "..."}}, {"attr": {"id": 2, "href": "..."}}]}}
//! ```
//!
//! Element attributes are collected under `attr`, text next to attributes
//! under `val`, repeated siblings become lists, and empty elements are `null`.

mod reader;
mod writer;

pub use reader::parse;
pub use writer::build;

use serde_json::{Map, Value};
use thiserror::Error;

/// A parsed response document: the content of the `<prestashop>` root.
pub type ParsedDocument = Map<String, Value>;

/// Field name to value mapping for one entity, in document order.
pub type AttributeSet = Map<String, Value>;

/// Key holding XML attributes of an element.
pub const ATTR_KEY: &str = "attr";

/// Key holding the text of an element that also carries attributes.
pub const VAL_KEY: &str = "val";

/// Root element of every document.
pub const ROOT_ELEMENT: &str = "prestashop";

/// Namespace declared on the root of outgoing payloads.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Error reading or writing XML.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("Malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// An element attribute could not be read.
    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Writing the payload failed.
    #[error("Failed to write XML payload: {0}")]
    Write(#[from] std::io::Error),

    /// The written payload is not valid UTF-8.
    #[error("XML payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Elements were left open at the end of the document.
    #[error("Unexpected end of XML document inside <{element}>")]
    UnexpectedEof {
        /// The innermost open element.
        element: String,
    },
}

// Verify XmlError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<XmlError>();
};
