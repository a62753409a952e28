//! Value types for the video encoding options.
//!
//! Every closed-set option exposes `from_index` / `to_index` so a dropdown can
//! drive it by position, plus `FromStr` for the CLI and config file.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

use crate::engine::error::OptionError;

pub const CRF_MAX: u8 = 51;
pub const CRF_DEFAULT: u8 = 23;

/// Constant Rate Factor: 0 (lossless) to 51 (worst), lower is better quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Crf(u8);

impl Crf {
    pub fn new(value: u32) -> Result<Self, OptionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= CRF_MAX)
            .map(Crf)
            .ok_or(OptionError::QualityOutOfRange(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Dropdown text, with the well-known values annotated
    pub fn label(self) -> String {
        match self.0 {
            0 => "0 (lossless compression)".to_string(),
            18 => "18 (high quality)".to_string(),
            23 => "23 (normal quality)".to_string(),
            28 => "28 (low quality)".to_string(),
            51 => "51 (worst quality)".to_string(),
            v => v.to_string(),
        }
    }

    pub fn all() -> impl Iterator<Item = Crf> {
        (0..=CRF_MAX).map(Crf)
    }
}

impl Default for Crf {
    fn default() -> Self {
        Crf(CRF_DEFAULT)
    }
}

impl TryFrom<u32> for Crf {
    type Error = OptionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Crf::new(value)
    }
}

impl From<Crf> for u32 {
    fn from(crf: Crf) -> Self {
        crf.0 as u32
    }
}

impl FromStr for Crf {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| OptionError::InvalidQuality(s.to_string()))?;
        Crf::new(value)
    }
}

impl fmt::Display for Crf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Standard,
    Square,
    Widescreen,
}

impl AspectRatio {
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Standard => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
        }
    }
}

/// A fixed output size. Only the entries of `RESOLUTION_PRESETS` exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPreset {
    width: u32,
    height: u32,
    aspect: AspectRatio,
}

impl ResolutionPreset {
    const fn new(width: u32, height: u32, aspect: AspectRatio) -> Self {
        Self {
            width,
            height,
            aspect,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// "1280x720"
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// "1280x720 (16:9)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.dimensions(), self.aspect.label())
    }
}

pub const RESOLUTION_PRESETS: &[ResolutionPreset] = &[
    ResolutionPreset::new(640, 480, AspectRatio::Standard),
    ResolutionPreset::new(640, 640, AspectRatio::Square),
    ResolutionPreset::new(800, 600, AspectRatio::Standard),
    ResolutionPreset::new(960, 720, AspectRatio::Standard),
    ResolutionPreset::new(1024, 768, AspectRatio::Standard),
    ResolutionPreset::new(1024, 1024, AspectRatio::Square),
    ResolutionPreset::new(1280, 720, AspectRatio::Widescreen),
    ResolutionPreset::new(1280, 960, AspectRatio::Standard),
    ResolutionPreset::new(1280, 1280, AspectRatio::Square),
    ResolutionPreset::new(1440, 1080, AspectRatio::Standard),
    ResolutionPreset::new(1600, 1200, AspectRatio::Standard),
    ResolutionPreset::new(1600, 1600, AspectRatio::Square),
    ResolutionPreset::new(1920, 1080, AspectRatio::Widescreen),
    ResolutionPreset::new(1920, 1440, AspectRatio::Standard),
];

const NO_CHANGE: &str = "no change";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resolution {
    #[default]
    Unchanged,
    Scale(ResolutionPreset),
}

impl Resolution {
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Resolution::Unchanged),
            i => RESOLUTION_PRESETS.get(i - 1).copied().map(Resolution::Scale),
        }
    }

    pub fn to_index(self) -> usize {
        match self {
            Resolution::Unchanged => 0,
            Resolution::Scale(preset) => RESOLUTION_PRESETS
                .iter()
                .position(|p| *p == preset)
                .map_or(0, |i| i + 1),
        }
    }

    pub fn all() -> impl Iterator<Item = Resolution> {
        std::iter::once(Resolution::Unchanged)
            .chain(RESOLUTION_PRESETS.iter().copied().map(Resolution::Scale))
    }

    pub fn label(self) -> String {
        match self {
            Resolution::Unchanged => NO_CHANGE.to_string(),
            Resolution::Scale(preset) => preset.label(),
        }
    }
}

impl FromStr for Resolution {
    type Err = OptionError;

    /// Accepts "no change", "1280x720" or the full "1280x720 (16:9)" label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == NO_CHANGE {
            return Ok(Resolution::Unchanged);
        }
        RESOLUTION_PRESETS
            .iter()
            .find(|p| p.dimensions() == wanted || p.label() == wanted)
            .map(|p| Resolution::Scale(*p))
            .ok_or_else(|| OptionError::UnknownResolution(s.to_string()))
    }
}

impl TryFrom<String> for Resolution {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Unchanged => NO_CHANGE.to_string(),
            Resolution::Scale(preset) => preset.dimensions(),
        }
    }
}

/// x264-style speed/efficiency tradeoff, fastest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    #[default]
    Medium,
    Slow,
    Slower,
    Veryslow,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 9] = [
        SpeedPreset::Ultrafast,
        SpeedPreset::Superfast,
        SpeedPreset::Veryfast,
        SpeedPreset::Faster,
        SpeedPreset::Fast,
        SpeedPreset::Medium,
        SpeedPreset::Slow,
        SpeedPreset::Slower,
        SpeedPreset::Veryslow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpeedPreset::Ultrafast => "ultrafast",
            SpeedPreset::Superfast => "superfast",
            SpeedPreset::Veryfast => "veryfast",
            SpeedPreset::Faster => "faster",
            SpeedPreset::Fast => "fast",
            SpeedPreset::Medium => "medium",
            SpeedPreset::Slow => "slow",
            SpeedPreset::Slower => "slower",
            SpeedPreset::Veryslow => "veryslow",
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn to_index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(5)
    }
}

impl FromStr for SpeedPreset {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.as_str() == wanted)
            .copied()
            .ok_or_else(|| OptionError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame rates offered besides "auto", highest first
pub const FRAME_RATES: &[u32] = &[60, 30, 24, 15, 12, 10, 8, 6, 5];

const AUTO: &str = "auto";

/// Output frame rate: `auto` keeps the source rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub struct FrameRate(Option<u32>);

impl FrameRate {
    pub const AUTO: FrameRate = FrameRate(None);

    pub fn fixed(fps: u32) -> Result<Self, OptionError> {
        if FRAME_RATES.contains(&fps) {
            Ok(FrameRate(Some(fps)))
        } else {
            Err(OptionError::UnknownFrameRate(fps.to_string()))
        }
    }

    pub fn fps(self) -> Option<u32> {
        self.0
    }

    pub fn is_auto(self) -> bool {
        self.0.is_none()
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(FrameRate::AUTO),
            i => FRAME_RATES.get(i - 1).map(|fps| FrameRate(Some(*fps))),
        }
    }

    pub fn to_index(self) -> usize {
        match self.0 {
            None => 0,
            Some(fps) => FRAME_RATES
                .iter()
                .position(|f| *f == fps)
                .map_or(0, |i| i + 1),
        }
    }

    pub fn all() -> impl Iterator<Item = FrameRate> {
        std::iter::once(FrameRate::AUTO).chain(FRAME_RATES.iter().map(|fps| FrameRate(Some(*fps))))
    }

    pub fn label(self) -> String {
        match self.0 {
            None => AUTO.to_string(),
            Some(fps) => fps.to_string(),
        }
    }
}

impl FromStr for FrameRate {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == AUTO {
            return Ok(FrameRate::AUTO);
        }
        wanted
            .parse::<u32>()
            .ok()
            .and_then(|fps| FrameRate::fixed(fps).ok())
            .ok_or_else(|| OptionError::UnknownFrameRate(s.to_string()))
    }
}

/// Accepts both `frame_rate = 30` and `frame_rate = "auto"` in config files
impl<'de> Deserialize<'de> for FrameRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Fps(u32),
            Text(String),
        }

        let rate = match Repr::deserialize(deserializer)? {
            Repr::Fps(fps) => FrameRate::fixed(fps),
            Repr::Text(text) => text.parse(),
        };
        rate.map_err(de::Error::custom)
    }
}

impl From<FrameRate> for String {
    fn from(rate: FrameRate) -> Self {
        rate.label()
    }
}
