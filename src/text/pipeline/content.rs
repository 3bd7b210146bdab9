//! The value carried through the pipeline.

/// Page content being transformed.
///
/// Starts as raw markdown; after the markdown stage it holds an HTML
/// fragment, and each later stage rewrites that fragment in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub html: String,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        Self { html: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
