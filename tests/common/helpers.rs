#![allow(dead_code)]

use mediarage::engine::{
    CompatibilityTable, ConversionRequest, ConversionSelection, ConvertSettings, EncodingOptions,
    FileFormat,
};
use std::process::Command;

/// Parse a format token, panicking on typos in test code
pub fn fmt(token: &str) -> FileFormat {
    token
        .parse()
        .unwrap_or_else(|e| panic!("bad format token {:?}: {}", token, e))
}

pub fn select(table: &CompatibilityTable, source: &str, target: &str) -> ConversionSelection {
    ConversionSelection::new(table, fmt(source), fmt(target))
        .unwrap_or_else(|e| panic!("{} -> {} should be allowed: {}", source, target, e))
}

/// Build a request for `input` with default output settings
pub fn request(input: &str, target: &str, options: &EncodingOptions) -> ConversionRequest {
    let table = CompatibilityTable::builtin();
    let source = FileFormat::classify(input)
        .format()
        .unwrap_or_else(|| panic!("{} is not a known format", input));
    let selection = select(&table, source.as_str(), target);
    ConversionRequest::new(input, selection, options, &ConvertSettings::default())
}

/// Convert a Command to a string for assertions (no shell quoting)
pub fn cmd_to_string(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();

    format!("{} {}", program, args.join(" "))
}

/// Target tokens offered for `source`, flattened in presentation order
pub fn target_tokens(table: &CompatibilityTable, source: &str) -> Vec<&'static str> {
    table
        .flat_targets(fmt(source))
        .into_iter()
        .map(FileFormat::as_str)
        .collect()
}
