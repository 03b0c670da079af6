use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Bmp,
        ImageFormat::Gif,
    ];

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Accepts `png`, `jpeg`, `jpg`, `bmp` and `gif`, case-insensitively and with an
/// optional `image/` prefix.
impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let lower = token.trim().to_ascii_lowercase();
        let bare = lower.strip_prefix("image/").unwrap_or(&lower);
        match bare {
            "png" => Ok(ImageFormat::Png),
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            _ => Err(Error::UnsupportedFormat(token.to_string())),
        }
    }
}

pub const DOWNLOAD_BASENAME: &str = "handwrite";

/// An encoded image ready to hand to a download sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn file_name(&self) -> String {
        format!("{DOWNLOAD_BASENAME}.{}", self.format.extension())
    }

    pub fn data_url(&self) -> String {
        data_url(self.format.mime_type(), &self.bytes)
    }

    /// Data URL with a generic binary MIME type, which browsers save instead of display.
    pub fn download_url(&self) -> String {
        data_url("image/octet-stream", &self.bytes)
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decodes the payload of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let payload = url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or(base64::DecodeError::InvalidLength)?;
    Ok(STANDARD.decode(payload)?)
}

/// Receives exported images for saving (a browser download in production).
pub trait DownloadSink {
    fn deliver(&mut self, image: ExportedImage) -> Result<()>;
}

impl DownloadSink for Vec<ExportedImage> {
    fn deliver(&mut self, image: ExportedImage) -> Result<()> {
        self.push(image);
        Ok(())
    }
}
