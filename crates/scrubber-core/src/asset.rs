use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::consts::FRAME_INDEX_WIDTH;
use crate::error::{Result, ScrubError};

/// Timeout for a single frame request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Addressing scheme for the frames of one sequence:
/// `{base_path}/assets/{file_path}_{index:03}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetLayout {
    pub base_path: String,
    pub file_path: String,
    pub extension: String,
}

impl AssetLayout {
    pub fn new(base_path: &str, file_path: &str, extension: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            file_path: file_path.trim_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn location(&self, index: u32) -> String {
        format!(
            "{}/assets/{}_{}.{}",
            self.base_path,
            self.file_path,
            format_frame_number(index),
            self.extension
        )
    }
}

/// Zero-pad a frame index to the asset naming width (`7` -> `007`).
pub fn format_frame_number(index: u32) -> String {
    format!("{index:0width$}", width = FRAME_INDEX_WIDTH)
}

/// Something frame bytes can be fetched from.
///
/// Implementations must be callable from several threads at once; the
/// prober checks every index of a batch concurrently.
pub trait FrameSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Frames stored on the local filesystem.
#[derive(Clone, Debug, Default)]
pub struct DirectorySource;

impl FrameSource for DirectorySource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        std::fs::read(location).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScrubError::FrameMissing(location.to_string()),
            _ => ScrubError::Io(e),
        })
    }
}

/// Frames served over HTTP(S).
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl FrameSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(location).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrubError::FrameMissing(location.to_string()));
        }
        if !status.is_success() {
            return Err(ScrubError::HttpStatus {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// Pick a frame source for a base path: HTTP for `http://`/`https://`
/// URLs, the filesystem otherwise.
pub fn open_source(base_path: &str) -> Result<Arc<dyn FrameSource>> {
    if base_path.starts_with("http://") || base_path.starts_with("https://") {
        Ok(Arc::new(HttpSource::new()?))
    } else {
        Ok(Arc::new(DirectorySource))
    }
}

/// Fetch and decode the frame at `location`. Any failure means the frame
/// does not exist.
pub fn check_frame(source: &dyn FrameSource, location: &str) -> bool {
    match source
        .fetch(location)
        .and_then(|bytes| Ok(image::load_from_memory(&bytes)?))
    {
        Ok(_) => true,
        Err(e) => {
            trace!(location, error = %e, "frame check failed");
            false
        }
    }
}

/// Fetch and decode the frame at `location` into RGBA.
pub fn load_frame(source: &dyn FrameSource, location: &str) -> Result<image::RgbaImage> {
    let bytes = source.fetch(location)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}
