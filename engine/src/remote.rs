//! Remote media - photos fetched from the social-media account.
//!
//! Remote items are never persisted and never ordered. They are mapped to
//! [`PhotoRecord`]s with sort `0` and appended after the local photos.

use crate::{record::Origin, PhotoId, PhotoRecord, UNASSIGNED_SORT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id given to remote items whose external id is not numeric.
///
/// Several remote records may end up sharing it; remote records are not
/// deduplicated.
pub const REMOTE_SENTINEL_ID: PhotoId = 0;

/// Image reference used when a remote item has nothing renderable.
pub const BROKEN_IMAGE_REF: &str = "asset://ic_broken_image";

/// Kind of remote media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaKind {
    Image,
    Video,
    CarouselAlbum,
    Other(String),
}

impl MediaKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
            MediaKind::CarouselAlbum => "CAROUSEL_ALBUM",
            MediaKind::Other(other) => other,
        }
    }
}

impl From<String> for MediaKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IMAGE" => MediaKind::Image,
            "VIDEO" => MediaKind::Video,
            "CAROUSEL_ALBUM" => MediaKind::CarouselAlbum,
            _ => MediaKind::Other(value),
        }
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media item as delivered by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMedia {
    /// Identifier on the remote platform
    pub external_id: String,
    pub media_kind: MediaKind,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Publication time in milliseconds since epoch, if known
    pub timestamp: Option<i64>,
    /// Public link to the post
    pub permalink: String,
}

impl RemoteMedia {
    /// Local id for this item: the numeric external id, or the sentinel.
    pub fn local_id(&self) -> PhotoId {
        self.external_id
            .trim()
            .parse()
            .unwrap_or(REMOTE_SENTINEL_ID)
    }

    /// Reference the renderer should load.
    ///
    /// Images and albums use the media URL, videos their thumbnail.
    pub fn image_ref(&self) -> &str {
        let candidate = match self.media_kind {
            MediaKind::Image | MediaKind::CarouselAlbum => self.media_url.as_deref(),
            MediaKind::Video => self.thumbnail_url.as_deref(),
            MediaKind::Other(_) => None,
        };
        candidate
            .filter(|s| !s.is_empty())
            .unwrap_or(BROKEN_IMAGE_REF)
    }

    /// Map to an unplaced, remote-origin record.
    pub fn to_record(&self) -> PhotoRecord {
        PhotoRecord {
            id: self.local_id(),
            name: self.media_kind.to_string(),
            path: self.permalink.clone(),
            source_ref: self.image_ref().to_string(),
            sort: UNASSIGNED_SORT,
            is_hidden: false,
            origin: Origin::Remote,
        }
    }
}

/// Map a remote page set to records, keeping source order.
pub fn to_records(media: &[RemoteMedia]) -> Vec<PhotoRecord> {
    media.iter().map(RemoteMedia::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: &str, kind: &str, url: Option<&str>, thumb: Option<&str>) -> RemoteMedia {
        RemoteMedia {
            external_id: id.to_string(),
            media_kind: MediaKind::from(kind.to_string()),
            media_url: url.map(String::from),
            thumbnail_url: thumb.map(String::from),
            timestamp: None,
            permalink: format!("https://www.instagram.com/p/{}/", id),
        }
    }

    #[test]
    fn image_maps_to_media_url() {
        let record = media("17895695668004550", "IMAGE", Some("https://cdn/a.jpg"), None).to_record();

        assert_eq!(record.id, 17895695668004550);
        assert_eq!(record.name, "IMAGE");
        assert_eq!(record.path, "https://www.instagram.com/p/17895695668004550/");
        assert_eq!(record.source_ref, "https://cdn/a.jpg");
        assert_eq!(record.sort, 0);
        assert_eq!(record.origin, Origin::Remote);
        assert!(!record.is_placed());
    }

    #[test]
    fn carousel_maps_to_media_url() {
        let record = media("5", "CAROUSEL_ALBUM", Some("https://cdn/c.jpg"), None).to_record();
        assert_eq!(record.source_ref, "https://cdn/c.jpg");
    }

    #[test]
    fn video_maps_to_thumbnail() {
        let with_thumb = media("6", "VIDEO", Some("https://cdn/v.mp4"), Some("https://cdn/v.jpg"));
        assert_eq!(with_thumb.to_record().source_ref, "https://cdn/v.jpg");

        let without_thumb = media("7", "VIDEO", Some("https://cdn/v.mp4"), None);
        assert_eq!(without_thumb.to_record().source_ref, BROKEN_IMAGE_REF);
    }

    #[test]
    fn unknown_kind_is_broken_image() {
        let record = media("8", "REEL", Some("https://cdn/r.jpg"), None).to_record();

        assert_eq!(record.name, "REEL");
        assert_eq!(record.source_ref, BROKEN_IMAGE_REF);
    }

    #[test]
    fn non_numeric_ids_collapse_to_sentinel() {
        let records = to_records(&[
            media("abc", "IMAGE", Some("https://cdn/1.jpg"), None),
            media("", "IMAGE", Some("https://cdn/2.jpg"), None),
            media("99999999999999999999999", "IMAGE", Some("https://cdn/3.jpg"), None),
        ]);

        // Distinct remote items share one id; they stay separate entries.
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.id == REMOTE_SENTINEL_ID));
        assert_eq!(records[0], records[1]);
        assert_ne!(records[0].source_ref, records[1].source_ref);
    }

    #[test]
    fn source_order_preserved() {
        let records = to_records(&[
            media("3", "IMAGE", Some("u3"), None),
            media("1", "IMAGE", Some("u1"), None),
            media("2", "IMAGE", Some("u2"), None),
        ]);

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn media_kind_wire_names() {
        let kind: MediaKind = serde_json::from_str("\"CAROUSEL_ALBUM\"").unwrap();
        assert_eq!(kind, MediaKind::CarouselAlbum);
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"VIDEO\"");
        assert_eq!(
            serde_json::to_string(&MediaKind::Other("REEL".into())).unwrap(),
            "\"REEL\""
        );
    }
}
