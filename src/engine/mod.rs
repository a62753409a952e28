//! Conversion model, independent of any front end

pub mod command;
pub mod compat;
pub mod error;
pub mod format;
pub mod options;
pub mod selection;

pub use command::{
    ConversionRequest, ConvertSettings, DryRunBackend, EncodingBackend, derive_output_path,
    format_command,
};
pub use compat::{CompatibilityEntry, CompatibilityTable, TargetGroup};
pub use error::{ConvertError, OptionError};
pub use format::{Classification, FileFormat, FormatKind, ImageFormat, VideoFormat};
pub use options::{EncoderArgs, EncodingOptions, resolve_args};
pub use selection::ConversionSelection;
