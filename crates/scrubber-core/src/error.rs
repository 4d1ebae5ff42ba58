use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {location}")]
    HttpStatus { location: String, status: u16 },

    #[error("Frame not found: {0}")]
    FrameMissing(String),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Unknown sequence: {0}")]
    UnknownSequence(String),
}

pub type Result<T> = std::result::Result<T, ScrubError>;
