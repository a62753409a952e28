//! Option descriptors for the video option form.
//!
//! Each entry describes one dropdown: its label, the choices it offers, the
//! default selection and how the selected value becomes an ffmpeg argument.
//! A form renderer walks `VIDEO_OPTIONS` and never needs to know which option
//! it is drawing.

use serde::Serialize;

use super::types::{Crf, FrameRate, Resolution, SpeedPreset};
use super::{Arg, EncodingOptions};
use crate::engine::error::OptionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Quality,
    Resolution,
    Preset,
    FrameRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    pub kind: OptionKind,

    /// Stable identifier (used by config keys and error messages)
    pub name: &'static str,

    pub label: &'static str,

    pub description: &'static str,

    /// ffmpeg flag emitted for this option
    pub flag: &'static str,
}

/// Video options in form order, which is also argument order
pub static VIDEO_OPTIONS: &[OptionDef] = &[
    OptionDef {
        kind: OptionKind::Quality,
        name: "crf",
        label: "Constant Quality (CRF)",
        description: "The CRF value sets the video quality between 0-51. Lower values means better quality but longer conversion times.",
        flag: "-crf",
    },
    OptionDef {
        kind: OptionKind::Resolution,
        name: "resolution",
        label: "Resolution",
        description: "Scale the output to a fixed size.",
        flag: "-vf",
    },
    OptionDef {
        kind: OptionKind::Preset,
        name: "preset",
        label: "Preset",
        description: "Encoding speed versus compression efficiency.",
        flag: "-preset",
    },
    OptionDef {
        kind: OptionKind::FrameRate,
        name: "frame_rate",
        label: "Frame Rate",
        description: "Output frames per second; auto keeps the source rate.",
        flag: "-r",
    },
];

impl OptionDef {
    pub fn get(kind: OptionKind) -> &'static OptionDef {
        match kind {
            OptionKind::Quality => &VIDEO_OPTIONS[0],
            OptionKind::Resolution => &VIDEO_OPTIONS[1],
            OptionKind::Preset => &VIDEO_OPTIONS[2],
            OptionKind::FrameRate => &VIDEO_OPTIONS[3],
        }
    }

    /// Dropdown labels, in index order
    pub fn choices(&self) -> Vec<String> {
        match self.kind {
            OptionKind::Quality => Crf::all().map(Crf::label).collect(),
            OptionKind::Resolution => Resolution::all().map(Resolution::label).collect(),
            OptionKind::Preset => SpeedPreset::ALL
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            OptionKind::FrameRate => FrameRate::all().map(FrameRate::label).collect(),
        }
    }

    pub fn choice_count(&self) -> usize {
        self.choices().len()
    }

    pub fn default_index(&self) -> usize {
        self.selected_index(&EncodingOptions::default())
    }

    pub fn selected_index(&self, options: &EncodingOptions) -> usize {
        match self.kind {
            OptionKind::Quality => options.quality.value() as usize,
            OptionKind::Resolution => options.resolution.to_index(),
            OptionKind::Preset => options.preset.to_index(),
            OptionKind::FrameRate => options.frame_rate.to_index(),
        }
    }

    /// Apply the choice at `idx` to `options`.
    pub fn select(&self, options: &mut EncodingOptions, idx: usize) -> Result<(), OptionError> {
        let out_of_range = || OptionError::IndexOutOfRange {
            option: self.name,
            index: idx,
            len: self.choice_count(),
        };

        match self.kind {
            OptionKind::Quality => {
                options.quality = u32::try_from(idx)
                    .ok()
                    .and_then(|v| Crf::new(v).ok())
                    .ok_or_else(out_of_range)?;
            }
            OptionKind::Resolution => {
                options.resolution = Resolution::from_index(idx).ok_or_else(out_of_range)?;
            }
            OptionKind::Preset => {
                options.preset = SpeedPreset::from_index(idx).ok_or_else(out_of_range)?;
            }
            OptionKind::FrameRate => {
                options.frame_rate = FrameRate::from_index(idx).ok_or_else(out_of_range)?;
            }
        }

        tracing::debug!(option = self.name, idx, "option selected");
        Ok(())
    }

    /// The argument this option contributes, if any
    pub fn to_arg(&self, options: &EncodingOptions) -> Option<Arg> {
        match self.kind {
            OptionKind::Quality => Some(Arg::new(self.flag, options.quality.to_string())),
            OptionKind::Resolution => match options.resolution {
                Resolution::Unchanged => None,
                Resolution::Scale(preset) => Some(Arg::new(
                    self.flag,
                    format!("scale={}:{}", preset.width(), preset.height()),
                )),
            },
            OptionKind::Preset => Some(Arg::new(self.flag, options.preset.as_str())),
            OptionKind::FrameRate => options
                .frame_rate
                .fps()
                .map(|fps| Arg::new(self.flag, fps.to_string())),
        }
    }
}
