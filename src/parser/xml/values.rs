// Values XML parser
//
// Streams res/values*/*.xml files and reports every named declaration.
// declare-styleable groups are reported together with their children.

use super::{for_each_start_tag, tag_name, XmlAttributes, ANDROID_ID, NAME};
use crate::error::{AaptError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use tracing::{debug, trace};

const DECLARE_STYLEABLE: &str = "declare-styleable";
const TYPE: &str = "type";
const ID_DEFINITION_PREFIX: &str = "id/";
const ANDROID_NAMESPACE: &str = "@android:";

/// A named element of a values file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueDeclaration {
    Element {
        tag: String,
        name: String,
        /// The `type` attribute, used by `<item>`.
        item_type: Option<String>,
    },
    Styleable {
        name: String,
        children: Vec<StyleableChild>,
    },
}

/// A named element inside a `declare-styleable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleableChild {
    pub tag: String,
    /// Name with `:` replaced by `_`.
    pub name: String,
    /// True for elements below the direct children, e.g. `<enum>` inside an `<attr>`.
    pub nested: bool,
}

/// Parser for Android values XML files
pub struct ValuesFileParser;

impl ValuesFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a values file into its named declarations, in document order.
    pub fn parse(&self, path: &Path, contents: &str) -> Result<Vec<ValueDeclaration>> {
        let mut declarations = Vec::new();
        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        let mut buf = Vec::new();

        loop {
            let (e, is_empty) = match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => (e.into_owned(), false),
                Ok(Event::Empty(e)) => (e.into_owned(), true),
                Ok(Event::Eof) => break,
                Err(e) => return Err(AaptError::parse(path, e)),
                _ => {
                    buf.clear();
                    continue;
                }
            };
            buf.clear();

            let attributes = XmlAttributes::from_start(&e).map_err(|err| AaptError::parse(path, err))?;
            let Some(name) = attributes.get(NAME).map(str::to_string) else {
                continue;
            };
            let tag = tag_name(&e);

            if tag == DECLARE_STYLEABLE {
                let children = if is_empty {
                    Vec::new()
                } else {
                    self.collect_styleable_children(path, &mut reader)?
                };
                trace!("declare-styleable {} with {} children", name, children.len());
                declarations.push(ValueDeclaration::Styleable { name, children });
            } else {
                declarations.push(ValueDeclaration::Element {
                    item_type: attributes.get(TYPE).map(str::to_string),
                    tag,
                    name,
                });
            }
        }

        debug!(
            "Parsed values {}: {} declarations",
            path.display(),
            declarations.len()
        );

        Ok(declarations)
    }

    /// Read the children of an open `declare-styleable` up to its end tag.
    fn collect_styleable_children(
        &self,
        path: &Path,
        reader: &mut Reader<&[u8]>,
    ) -> Result<Vec<StyleableChild>> {
        let mut children = Vec::new();
        let mut depth = 0usize;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if let Some(child) = styleable_child(path, e, depth)? {
                        children.push(child);
                    }
                    depth += 1;
                }
                Ok(Event::Empty(ref e)) => {
                    if let Some(child) = styleable_child(path, e, depth)? {
                        children.push(child);
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(AaptError::parse(path, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(children)
    }
}

fn styleable_child(path: &Path, e: &BytesStart, depth: usize) -> Result<Option<StyleableChild>> {
    let attributes = XmlAttributes::from_start(e).map_err(|err| AaptError::parse(path, err))?;
    // Elements without a name or attributes are not members.
    if attributes.is_empty() {
        return Ok(None);
    }
    Ok(attributes.get(NAME).map(|name| StyleableChild {
        tag: tag_name(e),
        name: name.replace(':', "_"),
        nested: depth > 0,
    }))
}

impl Default for ValuesFileParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Every `android:id` declared or referenced in a non-values XML file,
/// without the `@+id/` / `@id/` prefix. Framework ids (`@android:id/...`) are skipped.
pub fn collect_ids(path: &Path, contents: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for_each_start_tag(path, contents, |_, attributes| {
        if let Some(value) = attributes.get(ANDROID_ID) {
            if value.contains(ANDROID_NAMESPACE) {
                return Ok(());
            }
            match value.split_once(ID_DEFINITION_PREFIX) {
                Some((_, id)) if !id.is_empty() => ids.push(id.to_string()),
                _ => trace!("Skipping id value {} in {}", value, path.display()),
            }
        }
        Ok(())
    })?;
    Ok(ids)
}
