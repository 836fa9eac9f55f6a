pub mod html;

#[cfg(test)]
mod tests;

pub use html::extract;

/// What a response body holds, judged from its `Content-Type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML documents, the only kind that gets extracted
    Html,
    /// Video streams; checked first so a type like `video/x-html5` never
    /// counts as HTML
    Video,
    /// Anything else
    Other,
}

impl ContentKind {
    /// Classifies a `Content-Type` value by case-insensitive substring match
    pub fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("video") {
            ::log::debug!("Classifying as Video: {}", content_type);
            ContentKind::Video
        } else if content_type.contains("html") {
            ContentKind::Html
        } else {
            ::log::debug!("Classifying as Other: {}", content_type);
            ContentKind::Other
        }
    }

    /// Returns if the body should be parsed into a page
    pub fn should_extract(&self) -> bool {
        matches!(self, ContentKind::Html)
    }
}
