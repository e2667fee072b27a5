//! Wire payload building.

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde_json::Value;

use super::{AttributeSet, XmlError, ATTR_KEY, ROOT_ELEMENT, VAL_KEY, XLINK_NAMESPACE};

/// Builds the wire payload for one entity.
///
/// The entity element is named after `model`; each attribute becomes a child
/// element. Scalars are wrapped in CDATA so their bytes reach the shop
/// unchanged. Lists repeat the element once per item, which is how
/// associations are expressed:
///
/// ```text
/// {"categories": {"category": [{"id": 2}, {"id": 5}]}}
/// <categories><category><id>2</id></category><category><id>5</id></category></categories>
/// ```
///
/// # Errors
///
/// Returns [`XmlError`] if the payload cannot be written.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::xml::build;
/// use serde_json::json;
///
/// let attributes = json!({"name": "BMW 7"}).as_object().unwrap().clone();
/// let payload = build("car", &attributes).unwrap();
/// assert_eq!(
///     payload,
///     r#"<prestashop xmlns:xlink="http://www.w3.org/1999/xlink"><car><name><![CDATA[BMW 7]]></name></car></prestashop>"#
/// );
/// ```
pub fn build(model: &str, attributes: &AttributeSet) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("xmlns:xlink", XLINK_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new(model)))?;

    for (name, value) in attributes {
        write_field(&mut writer, name, value)?;
    }

    writer.write_event(Event::End(BytesEnd::new(model)))?;
    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_field(writer, name, item)?;
            }
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            if let Some(Value::Object(attrs)) = map.get(ATTR_KEY) {
                for (key, attr) in attrs {
                    start.push_attribute((key.as_str(), scalar_text(attr).as_str()));
                }
            }

            let text = map.get(VAL_KEY).filter(|v| !v.is_null());
            let mut children = map
                .iter()
                .filter(|(key, _)| key.as_str() != ATTR_KEY && key.as_str() != VAL_KEY)
                .peekable();

            if text.is_none() && children.peek().is_none() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }

            writer.write_event(Event::Start(start))?;
            if let Some(text) = text {
                write_cdata(writer, &scalar_text(text))?;
            }
            for (key, child) in children {
                write_field(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Value::Null => writer.write_event(Event::Empty(BytesStart::new(name)))?,
        scalar => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            write_cdata(writer, &scalar_text(scalar))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    Ok(())
}

/// `]]>` cannot appear inside a CDATA section, so it is split across two.
fn write_cdata(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), XmlError> {
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        writer.write_event(Event::CData(BytesCData::new(&rest[..pos + 2])))?;
        rest = &rest[pos + 2..];
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
