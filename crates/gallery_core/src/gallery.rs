//! Persistent image gallery with previous/next navigation
//!
//! The gallery keeps an ordered, filename-deduplicated list of encoded
//! images in a [`KvStore`] and steps through it with one shared cursor.
//! The cursor tracks the next position to reveal rather than the entry on
//! display, so reversing direction needs a one-step correction; the two
//! direction flags below carry that state between calls.

use crate::encoder::DataUrlEncoder;
use crate::error::GalleryError;
use crate::target::ImageTarget;
use gallery_store::{load_entries, persist_entries, ImageEntry, KvStore};

const MSG_SAVED: &str = "Image added to the gallery!";
const MSG_ALREADY_EXISTS: &str = "The selected image already exists!";
const MSG_NO_SELECTION: &str = "Select an image before saving!";
const MSG_NOT_SELECTED: &str = "No image selected.";
const MSG_NO_IMAGE: &str = "No image to show!";

/// A file picked by the user: its original name and raw bytes.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The image was encoded and persisted.
    Saved,
    /// An entry with the same filename is already stored; nothing changed.
    AlreadyExists,
    /// No file was supplied.
    NoSelection,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// An entry was written into the target.
    Shown,
    /// Nothing to show; the target was left untouched.
    NoImage,
}

/// The gallery component.
///
/// The entry list is re-read from the store at the start of every
/// operation rather than cached, so changes made by other writers between
/// calls are picked up. Only the cursor and direction flags live here.
pub struct Gallery<S: KvStore> {
    store: S,
    encoder: DataUrlEncoder,
    /// Next position to reveal, shared by both navigation directions.
    cursor: usize,
    went_forward: bool,
    went_backward: bool,
    message: Option<&'static str>,
}

impl<S: KvStore> Gallery<S> {
    pub fn new(store: S, encoder: DataUrlEncoder) -> Self {
        Self {
            store,
            encoder,
            cursor: 0,
            went_forward: false,
            went_backward: false,
            message: None,
        }
    }

    /// The user-facing message set by the last operation, if any.
    pub fn message(&self) -> Option<&str> {
        self.message
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filenames currently stored, in display order.
    pub fn filenames(&self) -> Result<Vec<String>, GalleryError> {
        let entries = load_entries(&self.store)?;
        Ok(entries.into_iter().map(|entry| entry.filename).collect())
    }

    /// Save an uploaded image, unless one with the same filename exists.
    ///
    /// The whole serialized list is rewritten on every successful save.
    /// Store and encoder-service failures propagate as errors; the
    /// duplicate and missing selection cases are outcomes, reported
    /// through [`Self::message`].
    pub async fn save_image(
        &mut self,
        selection: Option<ImageUpload>,
    ) -> Result<SaveOutcome, GalleryError> {
        let Some(upload) = selection else {
            self.message = Some(MSG_NO_SELECTION);
            return Ok(SaveOutcome::NoSelection);
        };

        let mut entries = load_entries(&self.store)?;

        if entries.iter().any(|entry| entry.filename == upload.filename) {
            tracing::debug!(filename = %upload.filename, "Rejected duplicate image");
            self.message = Some(MSG_ALREADY_EXISTS);
            return Ok(SaveOutcome::AlreadyExists);
        }

        let data_url = self.encoder.encode(&upload.filename, upload.bytes).await?;

        entries.push(ImageEntry {
            filename: upload.filename,
            data_url,
        });
        persist_entries(&self.store, &entries)?;

        tracing::info!(total = entries.len(), "Image saved");
        self.message = Some(MSG_SAVED);
        Ok(SaveOutcome::Saved)
    }

    /// Show the entry before the last one shown.
    pub fn show_previous(
        &mut self,
        target: &mut dyn ImageTarget,
    ) -> Result<NavOutcome, GalleryError> {
        let entries = load_entries(&self.store)?;

        // Undo the forward step's look-ahead when reversing direction
        if self.went_forward {
            self.cursor = self.cursor.saturating_sub(1);
            self.went_forward = false;
        }

        if !entries.is_empty() && self.cursor > 0 {
            self.cursor -= 1;
            self.went_backward = true;
            if let Some(entry) = entries.get(self.cursor) {
                target.set_image_source(&entry.data_url);
                return Ok(NavOutcome::Shown);
            }
        }

        self.message = Some(MSG_NO_IMAGE);
        Ok(NavOutcome::NoImage)
    }

    /// Show the entry after the last one shown.
    pub fn show_next(&mut self, target: &mut dyn ImageTarget) -> Result<NavOutcome, GalleryError> {
        let entries = load_entries(&self.store)?;

        // Undo the backward step's look-behind when reversing direction
        if self.went_backward {
            self.cursor += 1;
            self.went_backward = false;
        }

        if !entries.is_empty() && self.cursor < entries.len() {
            target.set_image_source(&entries[self.cursor].data_url);
            self.cursor += 1;
            self.went_forward = true;
            return Ok(NavOutcome::Shown);
        }

        self.message = Some(MSG_NO_IMAGE);
        Ok(NavOutcome::NoImage)
    }

    /// Show the first entry and prime the cursor for forward navigation,
    /// as if one "next" had already happened. No-op on an empty gallery.
    pub fn show_default(&mut self, target: &mut dyn ImageTarget) -> Result<(), GalleryError> {
        let entries = load_entries(&self.store)?;
        self.cursor = 0;

        if let Some(first) = entries.first() {
            target.set_image_source(&first.data_url);
            self.cursor += 1;
            self.went_forward = true;
        }

        Ok(())
    }

    /// Encode a selection and show it without persisting anything.
    ///
    /// Returns whether the target was written.
    pub async fn preview(
        &mut self,
        selection: Option<ImageUpload>,
        target: &mut dyn ImageTarget,
    ) -> Result<bool, GalleryError> {
        let Some(upload) = selection else {
            self.message = Some(MSG_NOT_SELECTED);
            return Ok(false);
        };

        let data_url = self.encoder.encode(&upload.filename, upload.bytes).await?;
        target.set_image_source(&data_url);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ImageSlot;
    use gallery_store::MemoryKvStore;

    fn upload(filename: &str, bytes: &[u8]) -> Option<ImageUpload> {
        Some(ImageUpload {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        })
    }

    fn gallery() -> Gallery<MemoryKvStore> {
        Gallery::new(MemoryKvStore::new(), DataUrlEncoder::new())
    }

    /// Seed the store directly with numbered entries "img0".."imgN-1".
    fn seeded(n: usize) -> Gallery<MemoryKvStore> {
        let g = gallery();
        let entries: Vec<ImageEntry> = (0..n)
            .map(|i| ImageEntry {
                filename: format!("img{}.png", i),
                data_url: format!("data:image/png;base64,IMG{}", i),
            })
            .collect();
        persist_entries(g.store(), &entries).unwrap();
        g
    }

    fn shown_index(slot: &ImageSlot) -> Option<usize> {
        slot.source()?
            .rsplit("IMG")
            .next()
            .and_then(|n| n.parse().ok())
    }

    #[tokio::test]
    async fn test_save_new_image_appends_one_entry() {
        let mut g = gallery();

        let outcome = g.save_image(upload("cat.png", b"cat bytes")).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(g.filenames().unwrap(), vec!["cat.png"]);

        let outcome = g.save_image(upload("dog.png", b"dog bytes")).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(g.filenames().unwrap(), vec!["cat.png", "dog.png"]);
    }

    #[tokio::test]
    async fn test_save_duplicate_filename_leaves_store_untouched() {
        let mut g = gallery();
        g.save_image(upload("cat.png", b"first")).await.unwrap();
        let before = g.store().get(gallery_store::IMAGE_LIST_KEY).unwrap();

        let outcome = g.save_image(upload("cat.png", b"second")).await.unwrap();

        assert_eq!(outcome, SaveOutcome::AlreadyExists);
        assert_eq!(g.message(), Some("The selected image already exists!"));
        assert_eq!(g.store().get(gallery_store::IMAGE_LIST_KEY).unwrap(), before);
        assert_eq!(g.filenames().unwrap(), vec!["cat.png"]);
    }

    #[tokio::test]
    async fn test_save_without_selection() {
        let mut g = gallery();

        let outcome = g.save_image(None).await.unwrap();

        assert_eq!(outcome, SaveOutcome::NoSelection);
        assert_eq!(g.message(), Some("Select an image before saving!"));
        assert!(g.filenames().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saved_entries_round_trip_through_store() {
        let mut g = gallery();
        g.save_image(upload("a.png", b"aaa")).await.unwrap();
        g.save_image(upload("b.png", b"bbb")).await.unwrap();
        g.save_image(upload("c.png", b"ccc")).await.unwrap();

        let entries = load_entries(g.store()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png", "c.png"]);
        for entry in &entries {
            assert!(entry.data_url.starts_with("data:"));
            assert!(entry.data_url.contains(";base64,"));
        }
    }

    #[test]
    fn test_default_then_next_visits_remaining_in_order() {
        let mut g = seeded(4);
        let mut slot = ImageSlot::new();

        g.show_default(&mut slot).unwrap();
        assert_eq!(shown_index(&slot), Some(0));

        for expected in 1..4 {
            assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::Shown);
            assert_eq!(shown_index(&slot), Some(expected));
        }

        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::NoImage);
        assert_eq!(g.message(), Some("No image to show!"));
        // Target keeps the last shown image
        assert_eq!(shown_index(&slot), Some(3));
    }

    #[test]
    fn test_walk_back_reverses_without_skips_or_repeats() {
        let mut g = seeded(4);
        let mut slot = ImageSlot::new();

        g.show_default(&mut slot).unwrap();
        for _ in 1..4 {
            g.show_next(&mut slot).unwrap();
        }
        assert_eq!(shown_index(&slot), Some(3));

        for expected in (0..3).rev() {
            assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::Shown);
            assert_eq!(shown_index(&slot), Some(expected));
        }

        assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::NoImage);
        assert_eq!(shown_index(&slot), Some(0));
    }

    #[test]
    fn test_alternating_directions_does_not_drift() {
        let mut g = seeded(3);
        let mut slot = ImageSlot::new();
        g.show_default(&mut slot).unwrap();

        // From the default-shown state each next shows entry 1 and each
        // previous comes back to entry 0, indefinitely.
        for _ in 0..3 {
            g.show_next(&mut slot).unwrap();
            assert_eq!(shown_index(&slot), Some(1));
            g.show_previous(&mut slot).unwrap();
            assert_eq!(shown_index(&slot), Some(0));
        }
    }

    #[test]
    fn test_navigation_on_empty_gallery() {
        let mut g = gallery();
        let mut slot = ImageSlot::new();

        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::NoImage);
        assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::NoImage);
        g.show_default(&mut slot).unwrap();

        assert_eq!(slot.source(), None);
        assert_eq!(g.message(), Some("No image to show!"));
    }

    #[test]
    fn test_previous_before_any_show_has_nothing() {
        let mut g = seeded(2);
        let mut slot = ImageSlot::new();

        // Cursor is still at zero, so there is nothing before it
        assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::NoImage);
        assert_eq!(slot.source(), None);
    }

    #[test]
    fn test_external_clearing_is_picked_up_mid_session() {
        let mut g = seeded(3);
        let mut slot = ImageSlot::new();
        g.show_default(&mut slot).unwrap();

        // Another writer empties both keys between calls
        persist_entries(g.store(), &[]).unwrap();

        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::NoImage);
        assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::NoImage);
    }

    #[test]
    fn test_cursor_is_not_reset_when_store_refills() {
        // The original design leaves the cursor wherever the flags put it
        // across an empty-to-non-empty transition; show_default is the way
        // to re-anchor. This test pins that behavior.
        let mut g = seeded(3);
        let mut slot = ImageSlot::new();
        g.show_default(&mut slot).unwrap();
        g.show_next(&mut slot).unwrap(); // cursor now 2

        persist_entries(g.store(), &[]).unwrap();
        let replacement = [ImageEntry {
            filename: "new.png".to_string(),
            data_url: "data:image/png;base64,IMG9".to_string(),
        }];
        persist_entries(g.store(), &replacement).unwrap();

        // Cursor (2) is past the single remaining entry
        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::NoImage);

        g.show_default(&mut slot).unwrap();
        assert_eq!(shown_index(&slot), Some(9));
    }

    #[tokio::test]
    async fn test_add_then_navigate_full_sequence() {
        let mut g = gallery();
        let mut slot = ImageSlot::new();

        assert_eq!(
            g.save_image(upload("cat.png", b"bytes A")).await.unwrap(),
            SaveOutcome::Saved
        );
        assert_eq!(
            g.save_image(upload("cat.png", b"bytes B")).await.unwrap(),
            SaveOutcome::AlreadyExists
        );
        assert_eq!(
            g.save_image(upload("dog.png", b"bytes C")).await.unwrap(),
            SaveOutcome::Saved
        );

        let entries = load_entries(g.store()).unwrap();
        let cat_url = entries[0].data_url.clone();
        let dog_url = entries[1].data_url.clone();

        g.show_default(&mut slot).unwrap();
        assert_eq!(slot.source(), Some(cat_url.as_str()));

        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::Shown);
        assert_eq!(slot.source(), Some(dog_url.as_str()));

        assert_eq!(g.show_next(&mut slot).unwrap(), NavOutcome::NoImage);

        assert_eq!(g.show_previous(&mut slot).unwrap(), NavOutcome::Shown);
        assert_eq!(slot.source(), Some(cat_url.as_str()));
    }

    #[tokio::test]
    async fn test_preview_shows_without_persisting() {
        let mut g = gallery();
        let mut slot = ImageSlot::new();

        let written = g.preview(upload("draft.png", b"draft"), &mut slot).await.unwrap();

        assert!(written);
        assert!(slot.source().unwrap().starts_with("data:"));
        assert!(g.filenames().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preview_without_selection_sets_message() {
        let mut g = gallery();
        let mut slot = ImageSlot::new();

        let written = g.preview(None, &mut slot).await.unwrap();

        assert!(!written);
        assert_eq!(slot.source(), None);
        assert_eq!(g.message(), Some("No image selected."));
    }
}
