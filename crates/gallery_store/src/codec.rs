//! Delimited-list codec for the stored gallery
//!
//! The gallery lives in the store as two flat strings: the encoded images
//! under [`IMAGE_LIST_KEY`], each entry followed by an `@` delimiter, and
//! the filenames under [`FILENAME_LIST_KEY`], comma-joined. The two lists
//! pair up by index, so they are only ever written together, from the same
//! in-memory entry list.

use crate::kv::KvStore;
use crate::Result;

/// Store key holding the `@`-delimited encoded image list.
pub const IMAGE_LIST_KEY: &str = "gallery.images";

/// Store key holding the comma-delimited filename list.
pub const FILENAME_LIST_KEY: &str = "gallery.filenames";

const IMAGE_DELIMITER: char = '@';
const FILENAME_DELIMITER: char = ',';

/// One stored image: the original upload name and its base64 data URL.
///
/// `filename` doubles as the uniqueness key for the gallery. It must not
/// contain either delimiter character, or the two stored lists would fall
/// out of step on the next decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,
    pub data_url: String,
}

/// Decode the image-list string: split on `@`, dropping empty fragments
/// (the encoded form ends with a trailing delimiter).
pub fn decode_images(raw: &str) -> Vec<String> {
    raw.split(IMAGE_DELIMITER)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode the filename-list string.
pub fn decode_filenames(raw: &str) -> Vec<String> {
    raw.split(FILENAME_DELIMITER)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

fn encode_images(entries: &[ImageEntry]) -> String {
    let mut joined = String::new();
    for entry in entries {
        joined.push_str(&entry.data_url);
        joined.push(IMAGE_DELIMITER);
    }
    joined
}

fn encode_filenames(entries: &[ImageEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.filename.as_str())
        .collect::<Vec<_>>()
        .join(&FILENAME_DELIMITER.to_string())
}

/// Load the full entry list from the store.
///
/// Both keys are read fresh on every call; absent keys yield an empty
/// gallery. If the two lists have drifted apart in length (an external
/// writer touched one key but not the other), the surplus is dropped and
/// a warning logged.
pub fn load_entries(store: &dyn KvStore) -> Result<Vec<ImageEntry>> {
    let images = match store.get(IMAGE_LIST_KEY)? {
        Some(raw) => decode_images(&raw),
        None => Vec::new(),
    };
    let filenames = match store.get(FILENAME_LIST_KEY)? {
        Some(raw) => decode_filenames(&raw),
        None => Vec::new(),
    };

    if images.len() != filenames.len() {
        tracing::warn!(
            images = images.len(),
            filenames = filenames.len(),
            "Stored image and filename lists are misaligned; truncating to the shorter"
        );
    }

    Ok(filenames
        .into_iter()
        .zip(images)
        .map(|(filename, data_url)| ImageEntry { filename, data_url })
        .collect())
}

/// Persist the full entry list, rewriting both keys.
pub fn persist_entries(store: &dyn KvStore, entries: &[ImageEntry]) -> Result<()> {
    store.set(IMAGE_LIST_KEY, &encode_images(entries))?;
    store.set(FILENAME_LIST_KEY, &encode_filenames(entries))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKvStore;

    fn entry(filename: &str, data_url: &str) -> ImageEntry {
        ImageEntry {
            filename: filename.to_string(),
            data_url: data_url.to_string(),
        }
    }

    #[test]
    fn test_empty_store_loads_empty_list() {
        let store = MemoryKvStore::new();
        assert!(load_entries(&store).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_content() {
        let store = MemoryKvStore::new();
        let entries = vec![
            entry("cat.png", "data:image/png;base64,QUFB"),
            entry("dog.jpg", "data:image/jpeg;base64,QkJC"),
            entry("bird.gif", "data:image/gif;base64,Q0ND"),
        ];

        persist_entries(&store, &entries).unwrap();
        assert_eq!(load_entries(&store).unwrap(), entries);
    }

    #[test]
    fn test_encoded_image_list_has_trailing_delimiters() {
        let store = MemoryKvStore::new();
        persist_entries(&store, &[entry("a.png", "one"), entry("b.png", "two")]).unwrap();

        assert_eq!(
            store.get(IMAGE_LIST_KEY).unwrap().as_deref(),
            Some("one@two@")
        );
        assert_eq!(
            store.get(FILENAME_LIST_KEY).unwrap().as_deref(),
            Some("a.png,b.png")
        );
    }

    #[test]
    fn test_decode_discards_empty_fragments() {
        assert_eq!(decode_images("one@two@"), vec!["one", "two"]);
        assert_eq!(decode_images("@one@@two@"), vec!["one", "two"]);
        assert!(decode_images("").is_empty());
        assert!(decode_filenames("").is_empty());
    }

    #[test]
    fn test_misaligned_lists_truncate_to_shorter() {
        let store = MemoryKvStore::new();
        store.set(IMAGE_LIST_KEY, "one@two@").unwrap();
        store.set(FILENAME_LIST_KEY, "a.png").unwrap();

        let entries = load_entries(&store).unwrap();
        assert_eq!(entries, vec![entry("a.png", "one")]);
    }
}
