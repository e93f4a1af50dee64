mod layout;
mod values;

pub use layout::LayoutBindingsParser;
pub use values::{collect_ids, ValueDeclaration, ValuesFileParser};

use crate::error::{AaptError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

pub(crate) const ANDROID_ID: &str = "android:id";
pub(crate) const NAME: &str = "name";

/// Attributes of one element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlAttributes {
    entries: Vec<(String, String)>,
}

impl XmlAttributes {
    /// Collect and unescape the attributes of a start tag.
    pub fn from_start(e: &BytesStart) -> std::result::Result<Self, quick_xml::Error> {
        let mut entries = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Stream every start (or empty) tag of `contents` in document order.
pub(crate) fn for_each_start_tag<F>(path: &Path, contents: &str, mut visit: F) -> Result<()>
where
    F: FnMut(&str, &XmlAttributes) -> Result<()>,
{
    let mut reader = Reader::from_str(contents);
    reader.trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag = tag_name(e);
                let attributes =
                    XmlAttributes::from_start(e).map_err(|err| AaptError::parse(path, err))?;
                visit(&tag, &attributes)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AaptError::parse(path, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
