#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use image::{ImageFormat, RgbImage};
use scrubber_core::asset::{AssetLayout, FrameSource};
use scrubber_core::error::{Result, ScrubError};
use scrubber_core::scroll::{InputSource, ScrollSurface};

/// Encode a tiny solid-colour JPEG.
pub fn jpeg_bytes(shade: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 4, image::Rgb([shade, shade, shade]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg)
        .expect("jpeg encode");
    buf.into_inner()
}

/// In-memory frame store keyed by location.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decodable frame for every index in `indices`.
    pub fn with_frames(layout: &AssetLayout, indices: impl IntoIterator<Item = u32>) -> Self {
        let mut source = Self::new();
        for i in indices {
            source.insert(layout.location(i), jpeg_bytes((i % 250) as u8));
        }
        source
    }

    pub fn insert(&mut self, location: String, bytes: Vec<u8>) {
        self.files.insert(location, bytes);
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Make every later fetch fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl FrameSource for MemorySource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(ScrubError::Io(std::io::Error::other("connection reset")));
        }
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| ScrubError::FrameMissing(location.to_string()))
    }
}

/// Page stand-in that records subscriptions and scroll writes.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub scroll_y: f64,
    pub subscribes: usize,
    pub unsubscribes: usize,
    pub scroll_writes: Vec<f64>,
}

impl RecordingHost {
    pub fn subscribed(&self) -> bool {
        self.subscribes > self.unsubscribes
    }
}

impl InputSource for RecordingHost {
    fn subscribe(&mut self) {
        self.subscribes += 1;
    }

    fn unsubscribe(&mut self) {
        self.unsubscribes += 1;
    }
}

impl ScrollSurface for RecordingHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.scroll_writes.push(y);
    }
}

/// Host whose log outlives the controller that owns it.
#[derive(Clone, Default)]
pub struct SharedHost(pub Rc<RefCell<RecordingHost>>);

impl InputSource for SharedHost {
    fn subscribe(&mut self) {
        self.0.borrow_mut().subscribe();
    }

    fn unsubscribe(&mut self) {
        self.0.borrow_mut().unsubscribe();
    }
}

impl ScrollSurface for SharedHost {
    fn scroll_y(&self) -> f64 {
        self.0.borrow().scroll_y()
    }

    fn scroll_to(&mut self, y: f64) {
        self.0.borrow_mut().scroll_to(y);
    }
}

pub fn layout(file_path: &str) -> AssetLayout {
    AssetLayout::new("/site", file_path, "jpg")
}
