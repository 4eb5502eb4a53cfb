//! Image upload policy and object naming.

use std::fmt;

use bytes::Bytes;
use uuid::Uuid;

/// Default upload ceiling: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Blob bucket an image is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    ProfilePictures,
    CardBackgrounds,
}

impl Bucket {
    pub const ALL: [Self; 2] = [Self::ProfilePictures, Self::CardBackgrounds];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProfilePictures => "profile-pictures",
            Self::CardBackgrounds => "card-backgrounds",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == value)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file offered for upload, before any store call.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadCandidate {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .parse::<mime::Mime>()
            .is_ok_and(|m| m.type_() == mime::IMAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Only image files are allowed.")]
    WrongType,

    #[error("File size exceeds {}MB limit.", .max_bytes / (1024 * 1024))]
    TooLarge { max_bytes: usize },

    #[error("The selected file is empty.")]
    Empty,

    #[error("An upload is already in progress.")]
    Busy,
}

impl UploadRejection {
    /// Message worded for the background editor.
    #[must_use]
    pub fn background_message(&self) -> String {
        match self {
            Self::WrongType => "Only image files are allowed for background.".to_owned(),
            Self::TooLarge { max_bytes } => format!(
                "Background image size exceeds {}MB limit.",
                max_bytes / (1024 * 1024)
            ),
            Self::Empty | Self::Busy => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Checks type, emptiness and size, in that order.
    pub fn check(&self, candidate: &UploadCandidate) -> Result<(), UploadRejection> {
        if !candidate.is_image() {
            return Err(UploadRejection::WrongType);
        }
        if candidate.bytes.is_empty() {
            return Err(UploadRejection::Empty);
        }
        if candidate.bytes.len() > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Extension taken from the text after the last `.`; the whole name when
/// there is no dot.
#[must_use]
pub fn extension_of(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Object path `{account_id}/{random}.{ext}` inside a bucket.
#[must_use]
pub fn object_path(account_id: Uuid, file_name: &str) -> String {
    format!("{account_id}/{}.{}", Uuid::new_v4(), extension_of(file_name))
}

/// Object path of a public URL when it points into `bucket`.
#[must_use]
pub fn path_in_bucket(url: &str, bucket: Bucket) -> Option<&str> {
    let marker = format!("{}/", bucket.as_str());
    let start = url.find(&marker)? + marker.len();
    let path = &url[start..];
    (!path.is_empty()).then_some(path)
}
