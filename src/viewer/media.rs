//! Media items shown by the viewer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// One entry of a gallery sequence. Owned by the host gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub source: String,
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    /// Still frame shown before a video starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl MediaItem {
    pub fn photo(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(id, source, MediaKind::Photo)
    }

    pub fn video(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(id, source, MediaKind::Video)
    }

    fn new(id: impl Into<String>, source: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind,
            caption: None,
            quote: None,
            poster: None,
            alt: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let item = MediaItem::video("v1", "/video/stage.mp4")
            .with_poster("/video/stage.jpg")
            .with_caption("Keynote");
        assert!(item.is_video());
        assert_eq!(item.poster.as_deref(), Some("/video/stage.jpg"));
        assert_eq!(item.caption.as_deref(), Some("Keynote"));
        assert!(!MediaItem::photo("p1", "/img/a.jpg").is_video());
    }

    #[test]
    fn test_deserialize_minimal() {
        let item: MediaItem =
            serde_json::from_str(r#"{ "id": "1", "source": "/img/a.jpg", "kind": "photo" }"#)
                .unwrap();
        assert_eq!(item.kind, MediaKind::Photo);
        assert_eq!(item.quote, None);
    }
}
