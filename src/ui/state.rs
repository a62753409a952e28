//! Conversion session state

use std::path::{Path, PathBuf};

use crate::engine::command::{ConversionRequest, ConvertSettings};
use crate::engine::compat::{CompatibilityTable, TargetGroup};
use crate::engine::error::ConvertError;
use crate::engine::format::{Classification, FileFormat};
use crate::engine::options::EncodingOptions;
use crate::engine::selection::ConversionSelection;

/// What a converter window tracks between user actions.
///
/// Picking a new file or source clears the target and options. Picking a video
/// target starts a fresh option form from the defaults; an image target has no
/// form.
#[derive(Debug, Clone)]
pub struct ConverterState<'t> {
    table: &'t CompatibilityTable,
    defaults: EncodingOptions,
    file: Option<PathBuf>,
    source: Option<FileFormat>,
    selection: Option<ConversionSelection>,
    options: Option<EncodingOptions>,
}

impl<'t> ConverterState<'t> {
    pub fn new(table: &'t CompatibilityTable) -> Self {
        Self::with_defaults(table, EncodingOptions::default())
    }

    /// `defaults` seeds the option form each time a video target is picked
    pub fn with_defaults(table: &'t CompatibilityTable, defaults: EncodingOptions) -> Self {
        Self {
            table,
            defaults,
            file: None,
            source: None,
            selection: None,
            options: None,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn source(&self) -> Option<FileFormat> {
        self.source
    }

    pub fn selection(&self) -> Option<&ConversionSelection> {
        self.selection.as_ref()
    }

    /// Classify and adopt a file. Rejected files leave the state as it was.
    pub fn choose_file(&mut self, path: impl AsRef<Path>) -> Result<FileFormat, ConvertError> {
        let path = path.as_ref();
        let format = match FileFormat::classify(&path.to_string_lossy()) {
            Classification::Recognized(format) => format,
            Classification::Unrecognized { extension } => {
                tracing::warn!(path = %path.display(), "rejected unrecognized file");
                return Err(ConvertError::UnrecognizedFormat(extension));
            }
        };

        self.set_source(format)?;
        self.file = Some(path.to_path_buf());
        Ok(format)
    }

    /// Pick the source format directly, clearing target and options. A chosen
    /// file of a different format is dropped.
    pub fn set_source(&mut self, format: FileFormat) -> Result<&[TargetGroup], ConvertError> {
        let table = self.table;
        let groups = table.compatible_targets(format).inspect_err(|_| {
            tracing::warn!(source = %format, "no conversions for source");
        })?;

        // A file of another format no longer matches the source
        let file_format = self
            .file
            .as_ref()
            .and_then(|file| FileFormat::classify(&file.to_string_lossy()).format());
        if file_format.is_some_and(|f| f != format) {
            tracing::debug!(source = %format, "source changed, dropping chosen file");
            self.file = None;
        }

        self.source = Some(format);
        self.selection = None;
        self.options = None;
        Ok(groups)
    }

    /// Targets currently on offer, empty before a source is known
    pub fn target_groups(&self) -> &'t [TargetGroup] {
        self.source
            .and_then(|source| self.table.compatible_targets(source).ok())
            .unwrap_or(&[])
    }

    pub fn select_target(
        &mut self,
        target: FileFormat,
    ) -> Result<&ConversionSelection, ConvertError> {
        let source = self.source.ok_or(ConvertError::NoSourceSelected)?;
        let selection = ConversionSelection::new(self.table, source, target)?;

        self.options = target.is_video().then(|| self.defaults.clone());
        Ok(self.selection.insert(selection))
    }

    /// The video option form, present only while a video target is selected
    pub fn options(&self) -> Option<&EncodingOptions> {
        self.options.as_ref()
    }

    pub fn options_mut(&mut self) -> Option<&mut EncodingOptions> {
        self.options.as_mut()
    }

    /// Assemble the conversion for the current choices without changing them.
    pub fn convert(&self, settings: &ConvertSettings) -> Result<ConversionRequest, ConvertError> {
        let Some(file) = &self.file else {
            tracing::warn!("convert requested with no file");
            return Err(ConvertError::EmptySourcePath);
        };
        let selection = self.selection.ok_or(ConvertError::NoTargetSelected)?;
        let options = self.options.clone().unwrap_or_default();

        Ok(ConversionRequest::new(
            file.clone(),
            selection,
            &options,
            settings,
        ))
    }
}
