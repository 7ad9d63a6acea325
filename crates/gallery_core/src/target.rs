//! Output sink for displayed images

/// Anything with a settable image source.
///
/// Navigation writes the selected entry's data URL straight into the
/// target; rendering it is the caller's business.
pub trait ImageTarget {
    fn set_image_source(&mut self, data_url: &str);
}

/// Minimal target holding the most recently shown source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    source: Option<String>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed data URL, if anything has been shown.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl ImageTarget for ImageSlot {
    fn set_image_source(&mut self, data_url: &str) {
        self.source = Some(data_url.to_string());
    }
}
