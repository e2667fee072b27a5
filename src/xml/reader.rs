//! Response body parsing.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Number, Value};

use super::{ParsedDocument, XmlError, ATTR_KEY, VAL_KEY};

/// An element being read.
struct Frame {
    name: String,
    attrs: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attrs = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?;
            attrs.insert(key, attribute_scalar(&value));
        }

        Ok(Self {
            name,
            attrs,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, Value) {
        let value = if !self.children.is_empty() {
            let mut map = self.children;
            if !self.attrs.is_empty() {
                map.insert(ATTR_KEY.to_string(), Value::Object(self.attrs));
            }
            Value::Object(map)
        } else if !self.attrs.is_empty() {
            let mut map = Map::new();
            map.insert(ATTR_KEY.to_string(), Value::Object(self.attrs));
            if !self.text.is_empty() {
                map.insert(VAL_KEY.to_string(), text_scalar(&self.text));
            }
            Value::Object(map)
        } else if !self.text.is_empty() {
            text_scalar(&self.text)
        } else {
            Value::Null
        };

        (self.name, value)
    }
}

/// Parses a webservice response body.
///
/// The root element is dropped; the returned map holds its children.
/// Whitespace-only text between elements is indentation and is skipped;
/// any other text is kept as written, surrounding spaces included.
///
/// # Errors
///
/// Returns [`XmlError`] when the body is not well-formed XML.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::xml::parse;
///
/// let document = parse(r#"<prestashop><tax><id>1</id><rate>21.000</rate></tax></prestashop>"#).unwrap();
/// assert_eq!(document["tax"]["id"], 1);
/// assert_eq!(document["tax"]["rate"], "21.000");
/// ```
pub fn parse(xml: &str) -> Result<ParsedDocument, XmlError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                close(frame, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if text.trim().is_empty() {
                    continue;
                }
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    close(frame, &mut stack, &mut root);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(XmlError::UnexpectedEof {
            element: frame.name,
        });
    }

    Ok(match root {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    })
}

fn close(frame: Frame, stack: &mut [Frame], root: &mut Option<Value>) {
    let (name, value) = frame.into_value();
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None => *root = Some(value),
    }
}

/// Repeated sibling names collapse into a list.
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        None => {
            children.insert(name, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Canonical decimal integers become numbers; everything else stays text.
fn text_scalar(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(number) if number.to_string() == text => Value::Number(Number::from(number)),
        _ => Value::String(text.to_string()),
    }
}

fn attribute_scalar(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => text_scalar(text),
    }
}
