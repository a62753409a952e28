//! Encoding options and their resolution into ffmpeg arguments.

pub mod registry;
pub mod trim;
pub mod types;

use serde::Serialize;
use std::fmt;

use super::selection::ConversionSelection;

pub use registry::{OptionDef, OptionKind, VIDEO_OPTIONS};
pub use trim::{Trim, TrimTime};
pub use types::{
    AspectRatio, Crf, FRAME_RATES, FrameRate, RESOLUTION_PRESETS, Resolution, ResolutionPreset,
    SpeedPreset,
};

/// One serialized option: a flag and its value, e.g. `-crf 23`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arg {
    pub flag: &'static str,
    pub value: String,
}

impl Arg {
    pub fn new(flag: &'static str, value: impl Into<String>) -> Self {
        Self {
            flag,
            value: value.into(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag, self.value)
    }
}

/// Ordered encoder arguments handed to the encoding backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncoderArgs(Vec<Arg>);

impl EncoderArgs {
    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn flags(&self) -> Vec<&'static str> {
        self.0.iter().map(|a| a.flag).collect()
    }

    /// Flattened into argv entries: `["-crf", "23", "-preset", "medium"]`
    pub fn to_argv(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|a| [a.flag.to_string(), a.value.clone()])
            .collect()
    }
}

impl From<Vec<Arg>> for EncoderArgs {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl<'a> IntoIterator for &'a EncoderArgs {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for EncoderArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Arg::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&joined)
    }
}

/// User choices for a video target. Built with defaults when a video target is
/// picked and read once when converting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingOptions {
    pub quality: Crf,
    pub resolution: Resolution,
    pub preset: SpeedPreset,
    pub frame_rate: FrameRate,
    pub trim: Trim,
}

/// Resolve options into ffmpeg arguments for a confirmed selection.
///
/// Order: quality, resolution, preset, frame rate, trim start, trim duration.
/// Image targets have no option form, so they resolve to no arguments.
pub fn resolve_args(options: &EncodingOptions, selection: &ConversionSelection) -> EncoderArgs {
    if !selection.target().is_video() {
        tracing::debug!(target_format = %selection.target(), "image target, no video options");
        return EncoderArgs::default();
    }

    let mut args: Vec<Arg> = VIDEO_OPTIONS
        .iter()
        .filter_map(|def| def.to_arg(options))
        .collect();
    args.extend(options.trim.to_args());

    let args = EncoderArgs(args);
    tracing::debug!(%selection, %args, "resolved encoder arguments");
    args
}
