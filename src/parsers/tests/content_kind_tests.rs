use crate::parsers::ContentKind;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_content_types() {
        assert_eq!(ContentKind::from_content_type("text/html"), ContentKind::Html);
        assert_eq!(
            ContentKind::from_content_type("text/HTML; charset=UTF-8"),
            ContentKind::Html
        );
        assert_eq!(
            ContentKind::from_content_type("application/xhtml+xml"),
            ContentKind::Html
        );
        assert!(ContentKind::from_content_type("text/html").should_extract());
    }

    #[test]
    fn test_video_wins_over_html() {
        let kind = ContentKind::from_content_type("video/x-html5");
        assert_eq!(kind, ContentKind::Video);
        assert!(!kind.should_extract());
    }

    #[test]
    fn test_other_content_types() {
        for content_type in ["application/json", "image/png", "text/css", ""] {
            let kind = ContentKind::from_content_type(content_type);
            assert_eq!(kind, ContentKind::Other, "{content_type}");
            assert!(!kind.should_extract());
        }
    }
}
