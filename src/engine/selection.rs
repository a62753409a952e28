use serde::Serialize;
use std::fmt;

use super::compat::CompatibilityTable;
use super::error::ConvertError;
use super::format::FileFormat;

/// A confirmed source -> target pair. Only constructible for pairs the table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSelection {
    source: FileFormat,
    target: FileFormat,
}

impl ConversionSelection {
    pub fn new(
        table: &CompatibilityTable,
        source: FileFormat,
        target: FileFormat,
    ) -> Result<Self, ConvertError> {
        // Surfaces UnsupportedSource before the pair check
        table.compatible_targets(source)?;

        if !table.is_compatible(source, target) {
            tracing::warn!(%source, %target, "rejected incompatible target");
            return Err(ConvertError::IncompatibleTarget {
                from: source,
                to: target,
            });
        }

        tracing::debug!(%source, %target, "conversion selected");
        Ok(Self { source, target })
    }

    pub fn source(&self) -> FileFormat {
        self.source
    }

    pub fn target(&self) -> FileFormat {
        self.target
    }
}

impl fmt::Display for ConversionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
