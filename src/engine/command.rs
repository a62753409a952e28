//! Output paths and the full ffmpeg invocation for a conversion.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::format::FileFormat;
use super::options::{EncoderArgs, EncodingOptions, resolve_args};
use super::selection::ConversionSelection;

pub const DEFAULT_PATTERN: &str = "{basename}";

/// Where converted files go and how they are named
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSettings {
    /// Defaults to the input file's directory
    pub output_dir: Option<PathBuf>,
    /// Filename template, see [`derive_output_path`]
    pub filename_pattern: Option<String>,
}

/// Build the output path for converting `input` to `target`.
///
/// Placeholders: `{basename}` (stem), `{filename}` (full name), `{source}`
/// (input extension) and `{target}` (target extension). The target's lowercase
/// extension is always appended. When the result would overwrite the input,
/// `_converted` is added to the stem.
pub fn derive_output_path(
    input: &Path,
    target: FileFormat,
    output_dir: Option<&Path>,
    pattern: Option<&str>,
) -> PathBuf {
    let dir = output_dir.unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new(".")));

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let filename = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let source_ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let name = pattern
        .unwrap_or(DEFAULT_PATTERN)
        .replace("{basename}", stem)
        .replace("{filename}", filename)
        .replace("{source}", &source_ext.to_lowercase())
        .replace("{target}", target.extension());

    let output = dir.join(format!("{}.{}", name, target.extension()));
    if output == input {
        return dir.join(format!("{}_converted.{}", name, target.extension()));
    }
    output
}

/// Everything the encoding backend needs to run one conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub selection: ConversionSelection,
    pub args: EncoderArgs,
}

impl ConversionRequest {
    pub fn new(
        input: impl Into<PathBuf>,
        selection: ConversionSelection,
        options: &EncodingOptions,
        settings: &ConvertSettings,
    ) -> Self {
        let input = input.into();
        let output = derive_output_path(
            &input,
            selection.target(),
            settings.output_dir.as_deref(),
            settings.filename_pattern.as_deref(),
        );
        let args = resolve_args(options, &selection);

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            %selection,
            "conversion request built"
        );

        Self {
            input,
            output,
            selection,
            args,
        }
    }

    /// `program -hide_banner -y|-n -i INPUT <args> OUTPUT`
    pub fn to_command(&self, program: &str, overwrite: bool) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg("-hide_banner");
        cmd.arg(if overwrite { "-y" } else { "-n" });
        cmd.arg("-i").arg(&self.input);
        cmd.args(self.args.to_argv());
        cmd.arg(&self.output);
        cmd
    }
}

/// Render a command as a single shell-quoted line
pub fn format_command(cmd: &Command) -> Result<String> {
    let words = std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|word| {
            word.to_str()
                .with_context(|| format!("Argument is not valid UTF-8: {:?}", word))
        })
        .collect::<Result<Vec<&str>>>()?;

    shlex::try_join(words).context("Failed to quote ffmpeg command")
}

/// Receives finished conversion requests. Running the encoder is up to the implementor.
pub trait EncodingBackend {
    fn submit(&mut self, request: ConversionRequest) -> Result<()>;
}

/// Records the command each request would run without running it
#[derive(Debug, Clone)]
pub struct DryRunBackend {
    program: String,
    overwrite: bool,
    commands: Vec<String>,
}

impl DryRunBackend {
    pub fn new(program: impl Into<String>, overwrite: bool) -> Self {
        Self {
            program: program.into(),
            overwrite,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Default for DryRunBackend {
    fn default() -> Self {
        Self::new("ffmpeg", false)
    }
}

impl EncodingBackend for DryRunBackend {
    fn submit(&mut self, request: ConversionRequest) -> Result<()> {
        let cmd = request.to_command(&self.program, self.overwrite);
        let line = format_command(&cmd)?;
        tracing::info!(command = %line, "dry run");
        self.commands.push(line);
        Ok(())
    }
}
