//! Supported file formats and extension classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::ConvertError;

/// Still-image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Jpg,
    Png,
}

/// Video container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoFormat {
    Avi,
    Mov,
    Mp4,
    Mpeg,
}

/// Group a format belongs to (image or video)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Image,
    Video,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Image => write!(f, "Image"),
            FormatKind::Video => write!(f, "Video"),
        }
    }
}

/// A recognized media file format, identified by its uppercase extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileFormat {
    Image(ImageFormat),
    Video(VideoFormat),
}

/// Result of classifying a path or extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Recognized(FileFormat),
    /// Normalized (uppercase, dot-stripped) extension that matched nothing
    Unrecognized { extension: String },
}

impl Classification {
    pub fn format(&self) -> Option<FileFormat> {
        match self {
            Classification::Recognized(format) => Some(*format),
            Classification::Unrecognized { .. } => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Classification::Recognized(_))
    }
}

pub const IMAGE_FORMATS: &[FileFormat] = &[
    FileFormat::Image(ImageFormat::Gif),
    FileFormat::Image(ImageFormat::Jpeg),
    FileFormat::Image(ImageFormat::Jpg),
    FileFormat::Image(ImageFormat::Png),
];

pub const VIDEO_FORMATS: &[FileFormat] = &[
    FileFormat::Video(VideoFormat::Avi),
    FileFormat::Video(VideoFormat::Mov),
    FileFormat::Video(VideoFormat::Mp4),
    FileFormat::Video(VideoFormat::Mpeg),
];

impl FileFormat {
    /// Every supported format, images first, in declaration order
    pub fn all() -> impl Iterator<Item = FileFormat> {
        IMAGE_FORMATS.iter().chain(VIDEO_FORMATS).copied()
    }

    /// Supported formats grouped by kind, as offered in a "convert from" picker
    pub fn grouped() -> [(FormatKind, &'static [FileFormat]); 2] {
        [
            (FormatKind::Image, IMAGE_FORMATS),
            (FormatKind::Video, VIDEO_FORMATS),
        ]
    }

    pub fn kind(self) -> FormatKind {
        match self {
            FileFormat::Image(_) => FormatKind::Image,
            FileFormat::Video(_) => FormatKind::Video,
        }
    }

    pub fn is_video(self) -> bool {
        self.kind() == FormatKind::Video
    }

    /// Uppercase identifier, e.g. "MPEG"
    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Image(ImageFormat::Gif) => "GIF",
            FileFormat::Image(ImageFormat::Jpeg) => "JPEG",
            FileFormat::Image(ImageFormat::Jpg) => "JPG",
            FileFormat::Image(ImageFormat::Png) => "PNG",
            FileFormat::Video(VideoFormat::Avi) => "AVI",
            FileFormat::Video(VideoFormat::Mov) => "MOV",
            FileFormat::Video(VideoFormat::Mp4) => "MP4",
            FileFormat::Video(VideoFormat::Mpeg) => "MPEG",
        }
    }

    /// Lowercase file extension used for output paths
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Image(ImageFormat::Gif) => "gif",
            FileFormat::Image(ImageFormat::Jpeg) => "jpeg",
            FileFormat::Image(ImageFormat::Jpg) => "jpg",
            FileFormat::Image(ImageFormat::Png) => "png",
            FileFormat::Video(VideoFormat::Avi) => "avi",
            FileFormat::Video(VideoFormat::Mov) => "mov",
            FileFormat::Video(VideoFormat::Mp4) => "mp4",
            FileFormat::Video(VideoFormat::Mpeg) => "mpeg",
        }
    }

    /// Classify a bare extension token ("mp4", ".MOV", "Jpeg").
    pub fn from_extension(ext: &str) -> Classification {
        let normalized = ext.strip_prefix('.').unwrap_or(ext).to_uppercase();
        match Self::all().find(|f| f.as_str() == normalized) {
            Some(format) => Classification::Recognized(format),
            None => Classification::Unrecognized {
                extension: normalized,
            },
        }
    }

    /// Classify a file path, or a bare extension when the input has none.
    ///
    /// Never fails: anything unknown comes back as `Classification::Unrecognized`.
    pub fn classify(input: &str) -> Classification {
        // Directories are never media files, whatever their name
        if input.chars().last().is_some_and(std::path::is_separator) {
            tracing::debug!(input, "directory path, not classified");
            return Classification::Unrecognized {
                extension: String::new(),
            };
        }

        let classification = match Path::new(input).extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Self::from_extension(input),
        };
        tracing::debug!(input, ?classification, "classified file");
        classification
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_extension(s) {
            Classification::Recognized(format) => Ok(format),
            Classification::Unrecognized { extension } => {
                Err(ConvertError::UnrecognizedFormat(extension))
            }
        }
    }
}

impl TryFrom<String> for FileFormat {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileFormat> for String {
    fn from(format: FileFormat) -> Self {
        format.as_str().to_string()
    }
}
