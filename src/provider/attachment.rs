//! Image attachment types and their two-state lifecycle.
//!
//! An attachment is either *Local* (a client-held binary blob that has not
//! been uploaded yet) or *Remote* (persisted on the server with a durable
//! URL). The distinction is a single tagged union discriminant; call sites
//! never probe for the presence of a `file` or `url` field.
//!
//! During an edit session a record's attachment list may mix both states;
//! [`split_for_update`] partitions such a list into the retained remote ids
//! and the blobs that still need uploading, which is exactly the shape the
//! update schema requires.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// A server-assigned attachment identifier.
pub type AssetId = u64;

/// Length of client-generated temporary identifiers for local attachments.
const TEMP_ID_LEN: usize = 16;

/// A client-held binary image payload, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// The original file name, sent as the multipart part's file name.
    pub file_name: String,
    /// The MIME type of the payload (e.g., `image/png`).
    pub content_type: String,
    /// The raw bytes.
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    /// Creates a new blob from its parts.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns a `data:` URL suitable for previewing the blob before upload.
    #[must_use]
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// A persisted attachment with its server id and durable URL.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteImage {
    /// The server-assigned identifier.
    pub id: AssetId,
    /// The durable URL of the stored asset.
    pub url: String,
}

/// An image attachment in one of its two lifecycle states.
///
/// # Example
///
/// ```rust
/// use cms_admin::{ImageAttachment, ImageBlob};
///
/// let local = ImageAttachment::local(ImageBlob::new("a.png", "image/png", vec![1, 2]));
/// assert!(!local.is_persisted());
///
/// let remote = ImageAttachment::remote(7, "https://cdn.example.com/a.png");
/// assert!(remote.is_persisted());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageAttachment {
    /// Not yet persisted; held client-side with a temporary identifier.
    Local {
        /// Client-generated random token identifying the attachment until
        /// the server assigns a real id.
        temp_id: String,
        /// The binary payload awaiting upload.
        blob: ImageBlob,
        /// Decoded preview data (a `data:` URL).
        preview: String,
    },
    /// Persisted on the server.
    Remote(RemoteImage),
}

impl ImageAttachment {
    /// Wraps a blob as a local attachment, generating its temp id and preview.
    #[must_use]
    pub fn local(blob: ImageBlob) -> Self {
        let temp_id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TEMP_ID_LEN)
            .map(char::from)
            .collect();
        let preview = blob.preview_data_url();
        Self::Local {
            temp_id,
            blob,
            preview,
        }
    }

    /// Creates a remote attachment from its server id and URL.
    #[must_use]
    pub fn remote(id: AssetId, url: impl Into<String>) -> Self {
        Self::Remote(RemoteImage {
            id,
            url: url.into(),
        })
    }

    /// Returns `true` if the attachment is persisted on the server.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Partitions a mixed attachment list into retained remote ids and blobs
/// still awaiting upload, preserving order within each partition.
///
/// # Example
///
/// ```rust
/// use cms_admin::{split_for_update, ImageAttachment, ImageBlob};
///
/// let attachments = vec![
///     ImageAttachment::remote(4, "https://cdn.example.com/a.png"),
///     ImageAttachment::local(ImageBlob::new("b.png", "image/png", vec![1])),
///     ImageAttachment::remote(9, "https://cdn.example.com/c.png"),
/// ];
///
/// let (old_images, new_images) = split_for_update(attachments);
/// assert_eq!(old_images, vec![4, 9]);
/// assert_eq!(new_images.len(), 1);
/// ```
#[must_use]
pub fn split_for_update(attachments: Vec<ImageAttachment>) -> (Vec<AssetId>, Vec<ImageBlob>) {
    let mut old_images = Vec::new();
    let mut new_images = Vec::new();
    for attachment in attachments {
        match attachment {
            ImageAttachment::Remote(remote) => old_images.push(remote.id),
            ImageAttachment::Local { blob, .. } => new_images.push(blob),
        }
    }
    (old_images, new_images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_attachment_gets_temp_id_and_preview() {
        let blob = ImageBlob::new("photo.png", "image/png", vec![0x89, 0x50]);
        let attachment = ImageAttachment::local(blob);

        let ImageAttachment::Local {
            temp_id, preview, ..
        } = attachment
        else {
            panic!("expected a local attachment");
        };
        assert_eq!(temp_id.len(), TEMP_ID_LEN);
        assert!(temp_id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(preview.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_temp_ids_are_unique() {
        let a = ImageAttachment::local(ImageBlob::new("a.png", "image/png", vec![1]));
        let b = ImageAttachment::local(ImageBlob::new("a.png", "image/png", vec![1]));

        let (ImageAttachment::Local { temp_id: id_a, .. }, ImageAttachment::Local { temp_id: id_b, .. }) =
            (a, b)
        else {
            panic!("expected local attachments");
        };
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn test_preview_data_url_encodes_bytes() {
        let blob = ImageBlob::new("a.gif", "image/gif", b"GIF89a".to_vec());
        assert_eq!(
            blob.preview_data_url(),
            format!("data:image/gif;base64,{}", BASE64.encode(b"GIF89a"))
        );
    }

    #[test]
    fn test_is_persisted_discriminates_states() {
        let local = ImageAttachment::local(ImageBlob::new("a.png", "image/png", vec![1]));
        let remote = ImageAttachment::remote(3, "https://cdn.example.com/a.png");

        assert!(!local.is_persisted());
        assert!(remote.is_persisted());
    }

    #[test]
    fn test_split_for_update_partitions_and_preserves_order() {
        let attachments = vec![
            ImageAttachment::remote(10, "u10"),
            ImageAttachment::local(ImageBlob::new("n1.png", "image/png", vec![1])),
            ImageAttachment::remote(20, "u20"),
            ImageAttachment::local(ImageBlob::new("n2.png", "image/png", vec![2])),
        ];

        let (old_images, new_images) = split_for_update(attachments);

        assert_eq!(old_images, vec![10, 20]);
        let names: Vec<&str> = new_images.iter().map(|b| b.file_name.as_str()).collect();
        assert_eq!(names, vec!["n1.png", "n2.png"]);
    }

    #[test]
    fn test_split_for_update_empty_input() {
        let (old_images, new_images) = split_for_update(Vec::new());
        assert!(old_images.is_empty());
        assert!(new_images.is_empty());
    }

    #[test]
    fn test_blob_debug_does_not_dump_bytes() {
        let blob = ImageBlob::new("a.png", "image/png", vec![0; 1024]);
        let debug = format!("{blob:?}");
        assert!(debug.contains("1024 bytes"));
        assert!(!debug.contains("[0, 0"));
    }

    #[test]
    fn test_remote_image_serde_round_trip() {
        let remote = RemoteImage {
            id: 42,
            url: "https://cdn.example.com/a.png".to_string(),
        };
        let json = serde_json::to_string(&remote).unwrap();
        let back: RemoteImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, remote);
    }
}
