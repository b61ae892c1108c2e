//! core::document::xml
//!
//! XML form of a [`MetadataDocument`].
//!
//! ```text
//! <Metadata>
//!     <Storage Description="SummaryInformation" FormatID="{F29F85E0-...}">
//!         <Property Name="System.Title" Id="2" Type="VT_LPWSTR" TypeId="31">
//!             <Value>Quarterly report</Value>
//!         </Property>
//!     </Storage>
//! </Metadata>
//! ```
//!
//! Output is tab-indented with one element per line. Optional attributes
//! (`Description`, `Name`) are omitted when absent. A document with no
//! groups is written as `<Metadata/>`.
//!
//! Parsing is structural: the root must be `Metadata`, its children
//! `Storage`, theirs `Property`. Inside a `Property` the first `Value`
//! child is used and anything else is skipped. `Value` text is kept exactly
//! as written, including surrounding whitespace.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{MetadataDocument, PropertyEntry, PropertySetGroup};
use crate::core::error::MetaError;

pub const TAG_METADATA: &str = "Metadata";
pub const TAG_STORAGE: &str = "Storage";
pub const TAG_PROPERTY: &str = "Property";
pub const TAG_VALUE: &str = "Value";

pub const ATTR_DESCRIPTION: &str = "Description";
pub const ATTR_FORMAT_ID: &str = "FormatID";
pub const ATTR_NAME: &str = "Name";
pub const ATTR_ID: &str = "Id";
pub const ATTR_TYPE: &str = "Type";
pub const ATTR_TYPE_ID: &str = "TypeId";

const EXCERPT_CHARS: usize = 20;

// =============================================================================
// Writing
// =============================================================================

/// Serialize `doc` to XML text.
pub fn to_xml(doc: &MetadataDocument) -> Result<String, MetaError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    if doc.groups.is_empty() {
        emit(&mut writer, Event::Empty(BytesStart::new(TAG_METADATA)))?;
    } else {
        emit(&mut writer, Event::Start(BytesStart::new(TAG_METADATA)))?;
        for group in &doc.groups {
            write_group(&mut writer, group)?;
        }
        emit(&mut writer, Event::End(BytesEnd::new(TAG_METADATA)))?;
    }

    let mut text = String::from_utf8(writer.into_inner())
        .map_err(|e| MetaError::DocumentFormat(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn write_group(writer: &mut Writer<Vec<u8>>, group: &PropertySetGroup) -> Result<(), MetaError> {
    let mut storage = BytesStart::new(TAG_STORAGE);
    if let Some(description) = &group.description {
        storage.push_attribute((ATTR_DESCRIPTION, description.as_str()));
    }
    if let Some(format_id) = &group.format_id {
        storage.push_attribute((ATTR_FORMAT_ID, format_id.as_str()));
    }
    emit(writer, Event::Start(storage))?;

    for entry in &group.entries {
        let mut property = BytesStart::new(TAG_PROPERTY);
        let attributes = [
            (ATTR_NAME, &entry.name),
            (ATTR_ID, &entry.id),
            (ATTR_TYPE, &entry.type_label),
            (ATTR_TYPE_ID, &entry.type_id),
        ];
        for (name, value) in attributes {
            if let Some(value) = value {
                property.push_attribute((name, value.as_str()));
            }
        }
        emit(writer, Event::Start(property))?;

        if let Some(value) = &entry.value {
            emit(writer, Event::Start(BytesStart::new(TAG_VALUE)))?;
            emit(writer, Event::Text(BytesText::new(value)))?;
            emit(writer, Event::End(BytesEnd::new(TAG_VALUE)))?;
        }

        emit(writer, Event::End(BytesEnd::new(TAG_PROPERTY)))?;
    }

    emit(writer, Event::End(BytesEnd::new(TAG_STORAGE)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), MetaError> {
    writer
        .write_event(event)
        .map_err(|e| MetaError::DocumentFormat(format!("cannot write XML: {e}")))
}

// =============================================================================
// Reading
// =============================================================================

/// A parsed element, before the document structure is checked.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

/// Parse XML text into a document.
///
/// # Errors
///
/// Returns `MetaError::DocumentFormat` for XML syntax errors (with the byte
/// position and a short excerpt) and for unexpected elements (naming them).
pub fn from_xml(text: &str) -> Result<MetadataDocument, MetaError> {
    let root = parse_tree(text)?;

    if root.name != TAG_METADATA {
        return Err(MetaError::DocumentFormat(format!(
            "unexpected root element <{}>, expected <{}>",
            root.name, TAG_METADATA
        )));
    }

    let groups = root
        .children
        .iter()
        .map(read_group)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MetadataDocument { groups })
}

fn read_group(element: &Element) -> Result<PropertySetGroup, MetaError> {
    if element.name != TAG_STORAGE {
        return Err(MetaError::DocumentFormat(format!(
            "unexpected element <{}> in <{}>, expected <{}>",
            element.name, TAG_METADATA, TAG_STORAGE
        )));
    }

    let entries = element
        .children
        .iter()
        .map(read_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PropertySetGroup {
        format_id: element.attribute(ATTR_FORMAT_ID),
        description: element.attribute(ATTR_DESCRIPTION),
        entries,
    })
}

fn read_entry(element: &Element) -> Result<PropertyEntry, MetaError> {
    if element.name != TAG_PROPERTY {
        return Err(MetaError::DocumentFormat(format!(
            "unexpected element <{}> in <{}>, expected <{}>",
            element.name, TAG_STORAGE, TAG_PROPERTY
        )));
    }

    let value = element
        .children
        .iter()
        .find(|child| child.name == TAG_VALUE)
        .map(|child| child.text.clone());

    Ok(PropertyEntry {
        name: element.attribute(ATTR_NAME),
        id: element.attribute(ATTR_ID),
        type_label: element.attribute(ATTR_TYPE),
        type_id: element.attribute(ATTR_TYPE_ID),
        value,
    })
}

fn parse_tree(text: &str) -> Result<Element, MetaError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| syntax_error(text, reader.buffer_position() as usize, &e))?;

        match event {
            Event::Start(start) => {
                stack.push(open_element(&start, text, position)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start, text, position)?;
                close_element(element, &mut stack, &mut root, text, position)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root, text, position)?;
                }
            }
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|e| syntax_error(text, position, &e))?;
                append_text(&mut stack, &content, text, position)?;
            }
            Event::CData(content) => {
                let content = String::from_utf8_lossy(&content.into_inner()).into_owned();
                append_text(&mut stack, &content, text, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MetaError::DocumentFormat(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| MetaError::DocumentFormat("document has no root element".to_string()))
}

fn open_element(start: &BytesStart<'_>, text: &str, position: usize) -> Result<Element, MetaError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| syntax_error(text, position, &e))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| syntax_error(text, position, &e))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    text: &str,
    position: usize,
) -> Result<(), MetaError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(MetaError::DocumentFormat(format!(
            "second root element <{}> at byte {} near '{}'",
            element.name,
            position,
            excerpt(text, position)
        ))),
    }
}

fn append_text(
    stack: &mut [Element],
    content: &str,
    text: &str,
    position: usize,
) -> Result<(), MetaError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(MetaError::DocumentFormat(format!(
            "text outside the root element at byte {} near '{}'",
            position,
            excerpt(text, position)
        ))),
    }
}

fn syntax_error(text: &str, position: usize, error: &dyn std::fmt::Display) -> MetaError {
    MetaError::DocumentFormat(format!(
        "XML syntax error at byte {}: {} near '{}'",
        position,
        error,
        excerpt(text, position)
    ))
}

/// Up to [`EXCERPT_CHARS`] characters of `text` starting at byte `position`.
fn excerpt(text: &str, position: usize) -> String {
    let mut start = position.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    text[start..].chars().take(EXCERPT_CHARS).collect()
}
