//! Shortcut-field resolution for article and media sources.
//!
//! A marker can describe its article and media in several ways, from
//! convenient shortcuts (`simpleArticle`, `simpleImage`, `imageComparison`)
//! down to literal descriptor objects (`article`, `media`) emitted verbatim.
//! When more than one field is present, a fixed precedence decides which one
//! wins:
//!
//! ```text
//! article:  simpleArticle  >  article          >  (none, warn)
//! media:    simpleImage    >  imageComparison  >  media  >  (none, warn)
//! ```
//!
//! Resolution is a pure classification over the marker record — the
//! processor acts on the returned variant, so the precedence rules are
//! testable here without touching the file system.

use crate::manifest::MarkerInput;
use serde_json::Value;

/// Where a marker's article comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArticleSource<'a> {
    /// `simpleArticle` shortcut: synthesize `article.html` around this text.
    SimpleText(&'a str),
    /// Literal `article` descriptor, emitted verbatim.
    Literal(&'a Value),
    /// No article field at all; the index entry omits `article`.
    None,
}

/// Resolve the article source for a marker.
pub fn article_source(marker: &MarkerInput) -> ArticleSource<'_> {
    if let Some(simple) = &marker.simple_article {
        return ArticleSource::SimpleText(&simple.text);
    }
    if let Some(literal) = &marker.article {
        return ArticleSource::Literal(literal);
    }
    ArticleSource::None
}

/// Where a marker's media descriptor comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaSource<'a> {
    /// `simpleImage` shortcut: single-image descriptor.
    SingleImage(&'a str),
    /// `imageComparison` shortcut: before/after pair.
    Comparison { back: &'a str, front: &'a str },
    /// Literal `media` descriptor, emitted verbatim.
    Literal(&'a Value),
    /// No media field at all; the index entry omits `media`.
    None,
}

/// Resolve the media source for a marker.
pub fn media_source(marker: &MarkerInput) -> MediaSource<'_> {
    if let Some(image) = &marker.simple_image {
        return MediaSource::SingleImage(image.as_str());
    }
    if let Some([back, front]) = &marker.image_comparison {
        return MediaSource::Comparison {
            back: back.as_str(),
            front: front.as_str(),
        };
    }
    if let Some(literal) = &marker.media {
        return MediaSource::Literal(literal);
    }
    MediaSource::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::SimpleArticle;
    use serde_json::json;

    fn bare_marker() -> MarkerInput {
        MarkerInput {
            marker_directory: "test".to_string(),
            lat_long: Value::Null,
            thumb: None,
            copy: Vec::new(),
            simple_article: None,
            article: None,
            simple_image: None,
            image_comparison: None,
            media: None,
        }
    }

    // =========================================================================
    // Article precedence
    // =========================================================================

    #[test]
    fn article_none_when_no_fields() {
        assert_eq!(article_source(&bare_marker()), ArticleSource::None);
    }

    #[test]
    fn article_literal_when_no_shortcut() {
        let mut marker = bare_marker();
        marker.article = Some(json!({"type": "html", "src": "elsewhere/page.html"}));

        let source = article_source(&marker);
        assert!(matches!(source, ArticleSource::Literal(_)));
    }

    #[test]
    fn article_simple_text_wins_over_literal() {
        let mut marker = bare_marker();
        marker.simple_article = Some(SimpleArticle {
            text: "Hello".to_string(),
        });
        marker.article = Some(json!({"type": "html", "src": "ignored.html"}));

        assert_eq!(article_source(&marker), ArticleSource::SimpleText("Hello"));
    }

    // =========================================================================
    // Media precedence
    // =========================================================================

    #[test]
    fn media_none_when_no_fields() {
        assert_eq!(media_source(&bare_marker()), MediaSource::None);
    }

    #[test]
    fn media_literal_when_no_shortcuts() {
        let mut marker = bare_marker();
        let descriptor = json!({"type": "youtube", "id": "abc123"});
        marker.media = Some(descriptor.clone());

        let source = media_source(&marker);
        assert!(matches!(source, MediaSource::Literal(v) if *v == descriptor));
    }

    #[test]
    fn media_comparison_beats_literal() {
        let mut marker = bare_marker();
        marker.image_comparison = Some(["then.png".to_string(), "now.png".to_string()]);
        marker.media = Some(json!({"type": "youtube", "id": "ignored"}));

        assert_eq!(media_source(&marker), MediaSource::Comparison {
            back: "then.png",
            front: "now.png",
        });
    }

    #[test]
    fn media_single_image_beats_everything() {
        let mut marker = bare_marker();
        marker.simple_image = Some("cat.png".to_string());
        marker.image_comparison = Some(["a.png".to_string(), "b.png".to_string()]);
        marker.media = Some(json!({"type": "youtube", "id": "ignored"}));

        assert_eq!(media_source(&marker), MediaSource::SingleImage("cat.png"));
    }

    #[test]
    fn media_comparison_keeps_back_front_order() {
        let mut marker = bare_marker();
        marker.image_comparison = Some(["back.png".to_string(), "front.png".to_string()]);

        let MediaSource::Comparison { back, front } = media_source(&marker) else {
            panic!("expected comparison source");
        };
        assert_eq!(back, "back.png");
        assert_eq!(front, "front.png");
    }
}
