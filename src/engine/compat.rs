//! Source -> target compatibility rules.
//!
//! The builtin rules live in `compatibility.toml` and are compiled into the
//! binary by build.rs. A `CompatibilityTable` is built once at startup and
//! passed by reference to whatever needs to resolve targets.

use serde::Serialize;

use super::error::ConvertError;
use super::format::{FileFormat, FormatKind, ImageFormat, VideoFormat};

mod generated {
    use super::{FileFormat, FormatKind, ImageFormat, VideoFormat};

    include!(concat!(env!("OUT_DIR"), "/compat_generated.rs"));
}

pub use generated::SCHEMA_VERSION;

/// Targets of a single kind offered for a source, in presentation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetGroup {
    pub kind: FormatKind,
    pub targets: Vec<FileFormat>,
}

/// All targets offered for one source format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityEntry {
    pub source: FileFormat,
    pub groups: Vec<TargetGroup>,
}

#[derive(Debug, Clone)]
pub struct CompatibilityTable {
    entries: Vec<CompatibilityEntry>,
}

impl CompatibilityTable {
    /// The rules compiled in from compatibility.toml
    pub fn builtin() -> Self {
        let entries = generated::BUILTIN_PAIRS
            .iter()
            .map(|(source, groups)| CompatibilityEntry {
                source: *source,
                groups: groups
                    .iter()
                    .map(|(kind, targets)| TargetGroup {
                        kind: *kind,
                        targets: targets.to_vec(),
                    })
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// Build a custom table, enforcing the same rules build.rs checks.
    pub fn new(entries: Vec<CompatibilityEntry>) -> Result<Self, ConvertError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.source == entry.source) {
                return Err(invalid(format!("duplicate source {}", entry.source)));
            }
            if entry.groups.is_empty() {
                return Err(invalid(format!("{} offers no targets", entry.source)));
            }

            let mut seen_video = false;
            for (j, group) in entry.groups.iter().enumerate() {
                if entry.groups[..j].iter().any(|g| g.kind == group.kind) {
                    return Err(invalid(format!(
                        "{} lists the {} group twice",
                        entry.source, group.kind
                    )));
                }
                match group.kind {
                    FormatKind::Video => seen_video = true,
                    FormatKind::Image if seen_video => {
                        return Err(invalid(format!(
                            "{} lists images after videos",
                            entry.source
                        )));
                    }
                    FormatKind::Image => {}
                }
                if group.targets.is_empty() {
                    return Err(invalid(format!(
                        "{} has an empty {} group",
                        entry.source, group.kind
                    )));
                }
                for target in &group.targets {
                    if target.kind() != group.kind {
                        return Err(invalid(format!(
                            "{} listed under {} for {}",
                            target, group.kind, entry.source
                        )));
                    }
                    if *target == entry.source {
                        return Err(invalid(format!("{} targets itself", entry.source)));
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CompatibilityEntry] {
        &self.entries
    }

    /// Formats that have at least one conversion, in table order
    pub fn sources(&self) -> impl Iterator<Item = FileFormat> + '_ {
        self.entries.iter().map(|e| e.source)
    }

    /// Targets for `source`, image group before video group.
    pub fn compatible_targets(&self, source: FileFormat) -> Result<&[TargetGroup], ConvertError> {
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.groups.as_slice())
            .ok_or(ConvertError::UnsupportedSource(source))
    }

    /// Flattened targets for `source`, preserving group and declaration order
    pub fn flat_targets(&self, source: FileFormat) -> Vec<FileFormat> {
        self.compatible_targets(source)
            .map(|groups| {
                groups
                    .iter()
                    .flat_map(|g| g.targets.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_compatible(&self, source: FileFormat, target: FileFormat) -> bool {
        self.flat_targets(source).contains(&target)
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(message: String) -> ConvertError {
    ConvertError::InvalidTable(message)
}
