//! Asynchronous base64 data-URL encoding service

use crate::GalleryError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::mpsc;

/// Data-URL encoder service
///
/// Encoding runs on a dedicated worker thread; callers suspend on a
/// oneshot channel until the result arrives. Once a request is submitted
/// it runs to completion or failure, there is no cancellation.
pub struct DataUrlEncoder {
    /// Channel for encode requests
    request_tx: mpsc::UnboundedSender<EncodeRequest>,
}

/// Encode request
#[derive(Debug)]
struct EncodeRequest {
    filename: String,
    bytes: Vec<u8>,
    callback: tokio::sync::oneshot::Sender<String>,
}

impl DataUrlEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<EncodeRequest>();

        // Spawn worker thread
        std::thread::spawn(move || {
            while let Some(request) = request_rx.blocking_recv() {
                let data_url = encode_sync(&request.filename, &request.bytes);
                let _ = request.callback.send(data_url);
            }
        });

        Self { request_tx }
    }

    /// Encode raw file bytes to a base64 data URL asynchronously
    pub async fn encode(&self, filename: &str, bytes: Vec<u8>) -> Result<String, GalleryError> {
        let (tx, rx) = tokio::sync::oneshot::channel();

        self.request_tx
            .send(EncodeRequest {
                filename: filename.to_string(),
                bytes,
                callback: tx,
            })
            .map_err(|_| GalleryError::SystemResource("Encoder channel closed".into()))?;

        rx.await
            .map_err(|_| GalleryError::SystemResource("Encoder response failed".into()))
    }
}

impl Default for DataUrlEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode synchronously (called from the worker thread)
fn encode_sync(filename: &str, bytes: &[u8]) -> String {
    tracing::debug!("Encoding image: {}", filename);

    // Unrecognized or empty content still encodes, with a generic media type
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");

    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid PNG signature prefix, enough for format sniffing
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[tokio::test]
    async fn test_encode_produces_png_data_url() {
        let encoder = DataUrlEncoder::new();
        let url = encoder.encode("pixel.png", PNG_MAGIC.to_vec()).await.unwrap();

        assert!(url.starts_with("data:image/png;base64,"));

        let payload = url.rsplit(',').next().unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_unknown_content_gets_generic_media_type() {
        let encoder = DataUrlEncoder::new();
        let url = encoder.encode("notes.txt", b"plain text".to_vec()).await.unwrap();

        assert!(url.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn test_empty_file_encodes_to_empty_payload() {
        let encoder = DataUrlEncoder::new();
        let url = encoder.encode("void.bin", Vec::new()).await.unwrap();

        assert_eq!(url, "data:application/octet-stream;base64,");
    }
}
