//! Generic document model for the array's XML responses.
//!
//! Every API response is a tree of `OBJECT` elements (each carrying a
//! `name` attribute) containing `PROPERTY` elements (a `name` attribute
//! plus text content). The model keeps objects and properties in wire
//! order and makes no uniqueness guarantees: repeated object names and
//! duplicate property keys both simply appear in iteration order.
//!
//! Instances are built fresh per fetched document, consumed by one
//! classifier in the same poll cycle, and discarded.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{CollectorError, Result};

/// One parsed API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub objects: Vec<Object>,
}

/// A named group of properties, representing one hardware/logical unit
/// or a statistics table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub properties: Vec<Property>,
}

/// A single named field within an object. `text` is the raw wire value;
/// it may encode a composite like `"Temperature=12.5 C"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub text: String,
}

impl Object {
    /// First property with the given name, if any.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.text.as_str())
    }
}

impl Document {
    /// Objects whose class tag equals `name`, in document order.
    pub fn objects_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Object> {
        self.objects.iter().filter(move |o| o.name == name)
    }

    /// First property with the given name anywhere in the document.
    /// Used for the login handshake, where the status properties live in
    /// a single status object.
    pub fn find_property(&self, name: &str) -> Option<&str> {
        self.objects.iter().find_map(|o| o.property(name))
    }

    /// Parse an API response body into the document model.
    ///
    /// Tolerates empty property text, nested objects (flattened in
    /// document order), and `key=value` composites left as raw text.
    /// Non-well-formed XML or a body with no elements at all is a
    /// `MalformedResponse` error.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut doc = Document::default();
        // Indices into doc.objects; properties attach to the innermost
        // open object.
        let mut open_objects: Vec<usize> = Vec::new();
        let mut pending_property: Option<Property> = None;
        let mut saw_element = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf).map_err(malformed)? {
                Event::Start(e) => {
                    saw_element = true;
                    match e.name().as_ref() {
                        b"OBJECT" => {
                            let name = attr(&e, "name")?;
                            doc.objects.push(Object {
                                name,
                                properties: Vec::new(),
                            });
                            open_objects.push(doc.objects.len() - 1);
                        }
                        b"PROPERTY" => {
                            let name = attr(&e, "name")?;
                            pending_property = Some(Property {
                                name,
                                text: String::new(),
                            });
                        }
                        _ => {}
                    }
                }
                // Self-closing elements: an empty OBJECT has no
                // properties, an empty PROPERTY has empty text.
                Event::Empty(e) => {
                    saw_element = true;
                    match e.name().as_ref() {
                        b"OBJECT" => {
                            let name = attr(&e, "name")?;
                            doc.objects.push(Object {
                                name,
                                properties: Vec::new(),
                            });
                        }
                        b"PROPERTY" => {
                            if let Some(&idx) = open_objects.last() {
                                doc.objects[idx].properties.push(Property {
                                    name: attr(&e, "name")?,
                                    text: String::new(),
                                });
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"OBJECT" => {
                        open_objects.pop();
                    }
                    b"PROPERTY" => {
                        if let Some(property) = pending_property.take() {
                            if let Some(&idx) = open_objects.last() {
                                doc.objects[idx].properties.push(property);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if let Some(property) = pending_property.as_mut() {
                        property.text.push_str(&t.unescape().map_err(malformed)?);
                    }
                }
                Event::CData(t) => {
                    if let Some(property) = pending_property.as_mut() {
                        property
                            .text
                            .push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_element {
            return Err(CollectorError::MalformedResponse(
                "response body contains no XML elements".into(),
            ));
        }
        if !open_objects.is_empty() || pending_property.is_some() {
            return Err(CollectorError::MalformedResponse(
                "document truncated: unclosed OBJECT or PROPERTY element".into(),
            ));
        }
        Ok(doc)
    }
}

fn malformed(e: impl std::fmt::Display) -> CollectorError {
    CollectorError::MalformedResponse(e.to_string())
}

fn attr(e: &quick_xml::events::BytesStart<'_>, name: &str) -> Result<String> {
    match e.try_get_attribute(name).map_err(malformed)? {
        Some(a) => Ok(a.unescape_value().map_err(malformed)?.into_owned()),
        None => Ok(String::new()),
    }
}
