//! The field mapping submitted to the provider.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::attachment::{AttachedFile, Disposition};

/// Prefix Mailgun expects on custom header fields.
pub const HEADER_PREFIX: &str = "h:";

/// Accumulated message fields, keyed the way the Mailgun API names them.
///
/// String fields (`to`, `from`, `cc`, `bcc`, `subject`, `text`, `html`,
/// `h:<header>`) hold one value each. Files hold at most one entry per
/// [`Disposition`]. Writing a key again replaces the previous value.
///
/// Serializes to the provider schema:
///
/// ```json
/// {
///   "to": "a@x.com",
///   "h:X-Test": "v",
///   "inline": { "filePath": "/srv/logo.png", "filename": "logo.png" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    fields: BTreeMap<String, String>,
    files: BTreeMap<Disposition, AttachedFile>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub(crate) fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.set(format!("{}{}", HEADER_PREFIX, name), value);
    }

    pub(crate) fn set_file(&mut self, file: AttachedFile) {
        self.files.insert(file.disposition, file);
    }

    /// Get a string field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Get a custom header by name (without the `h:` prefix).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.get(&format!("{}{}", HEADER_PREFIX, name))
    }

    /// Get the file registered for a disposition.
    pub fn file(&self, disposition: Disposition) -> Option<&AttachedFile> {
        self.files.get(&disposition)
    }

    /// All string fields, ordered by key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Custom headers as `(name, value)`, prefix stripped.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields()
            .filter_map(|(k, v)| k.strip_prefix(HEADER_PREFIX).map(|name| (name, v)))
    }

    /// All registered files.
    pub fn files(&self) -> impl Iterator<Item = &AttachedFile> {
        self.files.values()
    }

    /// Check if the message has any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.files.is_empty()
    }

    /// Number of top-level keys in the mapping.
    pub fn len(&self) -> usize {
        self.fields.len() + self.files.len()
    }

    /// Check if nothing has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }

    /// Drop every field and file.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.files.clear();
    }

    /// The mapping as a JSON value.
    pub fn to_value(&self) -> serde_json::Value {
        // Keys are strings and leaves are strings; serialization can't fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        for (disposition, file) in &self.files {
            map.serialize_entry(disposition.key(), file)?;
        }
        map.end()
    }
}
