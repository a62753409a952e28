use thiserror::Error;

use super::format::FileFormat;

/// Errors raised while choosing a file, a target, or resolving a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unrecognized file format '{0}'")]
    UnrecognizedFormat(String),

    #[error("No conversions are available from {0}")]
    UnsupportedSource(FileFormat),

    #[error("{to} is not a valid conversion target for {from}")]
    IncompatibleTarget { from: FileFormat, to: FileFormat },

    #[error("Invalid compatibility table: {0}")]
    InvalidTable(String),

    #[error("No source file selected")]
    EmptySourcePath,

    #[error("No source format selected")]
    NoSourceSelected,

    #[error("No target format selected")]
    NoTargetSelected,

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Errors raised when accepting user input for an encoding option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Invalid trim time '{0}': expected HH:MM:SS")]
    InvalidTrimFormat(String),

    #[error("Trim end {end} must be after trim start {start}")]
    TrimEndBeforeStart { start: String, end: String },

    #[error("Choice {index} out of range for '{option}' ({len} choices)")]
    IndexOutOfRange {
        option: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Quality {0} out of range (0-51)")]
    QualityOutOfRange(u32),

    #[error("Invalid quality '{0}': expected a number from 0 to 51")]
    InvalidQuality(String),

    #[error("Unknown speed preset '{0}'")]
    UnknownPreset(String),

    #[error("Unknown resolution '{0}'")]
    UnknownResolution(String),

    #[error("Unsupported frame rate '{0}'")]
    UnknownFrameRate(String),
}
