//! Attachment metadata and the count/size limits enforced before files reach
//! the reply engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MAX_FILE_COUNT: usize = 5;
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata describing a file the user attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub id: String,
    pub name: String,
    /// Size in bytes
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub extension: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("You can attach up to {max} files. Remove {excess} file(s) and try again.")]
    TooMany { max: usize, excess: usize },
    #[error("{name} is too large. Each file must be under 10 MB.")]
    TooLarge { name: String },
    #[error("{path} is not a file")]
    NotAFile { path: String },
    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything with a name and a byte size can be validated
pub trait FileLike {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
}

impl FileLike for AttachmentMeta {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug)]
pub struct AttachmentValidation<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<T>,
    pub errors: Vec<AttachmentError>,
}

/// Split `files` into accepted and rejected given `existing_count` files
/// already attached to the draft message.
pub fn validate_attachments<T: FileLike>(
    files: Vec<T>,
    existing_count: usize,
) -> AttachmentValidation<T> {
    let mut errors = Vec::new();
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    let remaining_slots = MAX_FILE_COUNT.saturating_sub(existing_count);

    if files.len() > remaining_slots {
        errors.push(AttachmentError::TooMany {
            max: MAX_FILE_COUNT,
            excess: existing_count + files.len() - MAX_FILE_COUNT,
        });
    }

    for file in files {
        let exceeds_count = accepted.len() >= remaining_slots;
        let exceeds_size = file.size() > MAX_FILE_SIZE_BYTES;

        if exceeds_count || exceeds_size {
            if exceeds_size {
                errors.push(AttachmentError::TooLarge {
                    name: file.name().to_string(),
                });
            }
            rejected.push(file);
            continue;
        }

        accepted.push(file);
    }

    if !rejected.is_empty() {
        tracing::warn!(rejected = rejected.len(), "attachments rejected");
    }

    AttachmentValidation {
        accepted,
        rejected,
        errors,
    }
}

/// Text after the last `.` of a file name, or empty
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}

fn guess_mime_type(extension: &str) -> Option<&'static str> {
    let mime = match extension.to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Hands out `attachment_N` ids in attach order
#[derive(Debug, Default)]
pub struct AttachmentIds {
    counter: u64,
}

impl AttachmentIds {
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("attachment_{}", self.counter)
    }
}

impl AttachmentMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        let mime_type = guess_mime_type(&extension).map(str::to_string);
        Self {
            id: id.into(),
            name,
            size,
            mime_type,
            extension,
        }
    }

    /// Read name and size of a file on disk
    pub fn from_path(path: &Path, ids: &mut AttachmentIds) -> Result<Self, AttachmentError> {
        let display = path.display().to_string();
        let metadata = std::fs::metadata(path).map_err(|source| AttachmentError::Unreadable {
            path: display.clone(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile { path: display });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(display);

        Ok(Self::new(ids.next_id(), name, metadata.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> AttachmentMeta {
        AttachmentMeta::new(format!("id-{name}"), name, size)
    }

    #[test]
    fn test_accepts_files_within_limits() {
        let result = validate_attachments(vec![file("doc.txt", 1024)], 0);
        assert_eq!(result.accepted.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let result = validate_attachments(vec![file("huge.mov", MAX_FILE_SIZE_BYTES + 1)], 0);
        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected.len(), 1);
        assert!(result.errors[0].to_string().contains("too large"));
    }

    #[test]
    fn test_exact_size_limit_is_allowed() {
        let result = validate_attachments(vec![file("edge.bin", MAX_FILE_SIZE_BYTES)], 0);
        assert_eq!(result.accepted.len(), 1);
    }

    #[test]
    fn test_rejects_over_count() {
        let files: Vec<_> = (0..=MAX_FILE_COUNT)
            .map(|i| file(&format!("file-{i}.txt"), 1024))
            .collect();
        let result = validate_attachments(files, 0);
        assert_eq!(result.accepted.len(), MAX_FILE_COUNT);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(
            result.errors[0].to_string(),
            "You can attach up to 5 files. Remove 1 file(s) and try again."
        );
    }

    #[test]
    fn test_existing_count_reduces_slots() {
        let files = vec![file("a.txt", 1), file("b.txt", 1)];
        let result = validate_attachments(files, 4);
        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.rejected[0].name, "b.txt");
    }

    #[test]
    fn test_extension_and_mime() {
        let meta = AttachmentMeta::new("a1", "Report.Final.PDF", 10);
        assert_eq!(meta.extension, "PDF");
        assert_eq!(meta.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "hello").unwrap();

        let mut ids = AttachmentIds::default();
        let meta = AttachmentMeta::from_path(&path, &mut ids).unwrap();
        assert_eq!(meta.id, "attachment_1");
        assert_eq!(meta.name, "notes.md");
        assert_eq!(meta.size, 5);
        assert_eq!(meta.extension, "md");

        assert!(matches!(
            AttachmentMeta::from_path(dir.path(), &mut ids),
            Err(AttachmentError::NotAFile { .. })
        ));
        assert!(matches!(
            AttachmentMeta::from_path(&dir.path().join("missing.txt"), &mut ids),
            Err(AttachmentError::Unreadable { .. })
        ));
    }
}
