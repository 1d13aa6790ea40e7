//! Files attached to a message, either as downloads or inline resources.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::MailError;

/// Type of attachment disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Disposition {
    /// Regular attachment (shown as downloadable file)
    #[default]
    Attachment,
    /// Inline resource (embedded in HTML via cid:)
    Inline,
}

impl Disposition {
    /// Key the file is stored under in the field mapping.
    pub fn key(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }

    /// Resolve an optional disposition string.
    ///
    /// Nothing or an empty string yields [`Disposition::Attachment`]. An
    /// explicit `"attachment"` (any case) also yields an attachment, where a
    /// plain truthiness check would have sent it inline. Any other value is
    /// treated as a request for inline delivery.
    pub fn resolve(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Attachment,
            Some(v) if v.eq_ignore_ascii_case("attachment") => Self::Attachment,
            Some(_) => Self::Inline,
        }
    }
}

impl FromStr for Disposition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(Some(s)))
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A file registered on a message.
///
/// Only the path and display name are part of the field mapping. The file is
/// read by the transport at send time.
///
/// # Examples
///
/// ```
/// use mailgun_service::{AttachedFile, Disposition};
///
/// let report = AttachedFile::new("/tmp/report.pdf");
/// assert_eq!(report.filename, "report.pdf");
/// assert_eq!(report.disposition, Disposition::Attachment);
///
/// // Inline image under a different name
/// let logo = AttachedFile::new("/srv/assets/logo-v2.png")
///     .inline()
///     .rename("logo.png");
/// assert_eq!(logo.filename, "logo.png");
/// assert_eq!(logo.disposition, Disposition::Inline);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedFile {
    /// Location of the file on disk
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// Name presented to the recipient
    pub filename: String,
    /// Whether this is an inline or regular attachment
    #[serde(skip)]
    pub disposition: Disposition,
    /// Explicit MIME type; guessed from the filename when unset
    #[serde(skip)]
    pub mime_type: Option<String>,
}

impl AttachedFile {
    /// Register a file by path, named after the path's base component.
    ///
    /// The base component is the last segment after trailing separators are
    /// dropped, taken literally: `"/tmp/a/.."` is named `".."` and `"/"` gets
    /// an empty name.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let file_path = path.as_ref().to_string_lossy().to_string();
        let filename = base_name(&file_path).to_string();

        Self {
            file_path,
            filename,
            disposition: Disposition::Attachment,
            mime_type: None,
        }
    }

    /// Set the disposition.
    pub fn disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    /// Deliver as an inline resource.
    pub fn inline(self) -> Self {
        self.disposition(Disposition::Inline)
    }

    /// Present the file under a different name. Empty names are ignored.
    pub fn rename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        if !filename.is_empty() {
            self.filename = filename;
        }
        self
    }

    /// Set the MIME type explicitly.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// MIME type to send the file with.
    pub fn content_type(&self) -> String {
        match self.mime_type {
            Some(ref mime) => mime.clone(),
            None => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .to_string(),
        }
    }

    /// Read the file contents.
    ///
    /// # Errors
    ///
    /// - `AttachmentFileNotFound` - File path doesn't exist
    /// - `AttachmentReadError` - Failed to read file
    pub fn read(&self) -> Result<Vec<u8>, MailError> {
        std::fs::read(&self.file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MailError::AttachmentFileNotFound(self.file_path.clone())
            } else {
                MailError::AttachmentReadError(format!("{}: {}", self.file_path, e))
            }
        })
    }

    /// Check if this is an inline attachment.
    pub fn is_inline(&self) -> bool {
        self.disposition == Disposition::Inline
    }
}

fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(std::path::is_separator);
    trimmed
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or_default()
}
