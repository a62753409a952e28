use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::Path;

const TABLE_PATH: &str = "src/engine/compatibility.toml";

fn main() {
    // Tell Cargo to rerun if the compatibility table changes
    println!("cargo:rerun-if-changed={}", TABLE_PATH);

    generate_compat_code();
}

/// Map a format token to its kind ("image" / "video") as declared in [formats]
fn collect_formats(registry: &toml::Value) -> HashMap<String, String> {
    let formats = registry
        .get("formats")
        .and_then(|f| f.as_table())
        .expect("TOML must have [formats] section");

    let mut kinds = HashMap::new();
    for kind in ["image", "video"] {
        let list = formats
            .get(kind)
            .and_then(|v| v.as_array())
            .unwrap_or_else(|| panic!("[formats] must list '{}' formats", kind));

        for token in list {
            let token = token
                .as_str()
                .unwrap_or_else(|| panic!("Format in '{}' list must be a string", kind));
            assert_eq!(
                token,
                token.to_uppercase(),
                "Format '{}' must be declared in uppercase",
                token
            );
            assert!(
                kinds.insert(token.to_string(), kind.to_string()).is_none(),
                "Format '{}' declared more than once",
                token
            );
        }
    }

    kinds
}

/// Validate the TOML table structure at build time
fn validate_table(registry: &toml::Value, kinds: &HashMap<String, String>) {
    let meta = registry
        .get("meta")
        .and_then(|m| m.as_table())
        .expect("TOML must have [meta] section");
    assert!(
        meta.get("schema_version").is_some(),
        "Missing schema_version in [meta]"
    );

    let pairs = registry
        .get("pairs")
        .and_then(|p| p.as_array())
        .expect("TOML must have [[pairs]] array");
    assert!(!pairs.is_empty(), "Must have at least one pair defined");

    let mut sources = HashSet::new();
    for pair in pairs {
        let pair_table = pair.as_table().expect("Pair must be a table");

        let source = pair_table
            .get("source")
            .and_then(|v| v.as_str())
            .expect("Pair must have 'source' field");
        assert!(kinds.contains_key(source), "Unknown source format '{}'", source);
        assert!(sources.insert(source), "Duplicate source format: {}", source);

        let groups = pair_table
            .get("groups")
            .and_then(|g| g.as_array())
            .unwrap_or_else(|| panic!("Source '{}' has no groups defined", source));
        assert!(!groups.is_empty(), "Source '{}' must offer at least one group", source);

        let mut seen_video = false;
        let mut seen_kinds = HashSet::new();
        for group in groups {
            let kind = group
                .get("kind")
                .and_then(|v| v.as_str())
                .unwrap_or_else(|| panic!("Group in '{}' must have 'kind' field", source));
            assert!(
                kind == "image" || kind == "video",
                "Group kind '{}' in '{}' must be 'image' or 'video'",
                kind,
                source
            );
            assert!(
                seen_kinds.insert(kind),
                "Source '{}' lists the '{}' group twice",
                source,
                kind
            );
            if kind == "video" {
                seen_video = true;
            } else {
                assert!(
                    !seen_video,
                    "Source '{}' must list its image group before its video group",
                    source
                );
            }

            let targets = group
                .get("targets")
                .and_then(|v| v.as_array())
                .unwrap_or_else(|| panic!("Group in '{}' must have 'targets'", source));
            assert!(!targets.is_empty(), "Empty '{}' group in '{}'", kind, source);

            for target in targets {
                let target = target.as_str().expect("Target must be a string");
                let target_kind = kinds
                    .get(target)
                    .unwrap_or_else(|| panic!("Unknown target '{}' in '{}'", target, source));
                assert_eq!(
                    target_kind, kind,
                    "Target '{}' listed in the '{}' group of '{}'",
                    target, kind, source
                );
                assert_ne!(target, source, "Source '{}' lists itself as a target", source);
            }
        }
    }
}

/// "MPEG" -> "Mpeg", matching the variant names in engine::format
fn variant_name(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_expr(token: &str, kinds: &HashMap<String, String>) -> String {
    match kinds.get(token).map(String::as_str) {
        Some("image") => format!("FileFormat::Image(ImageFormat::{})", variant_name(token)),
        Some("video") => format!("FileFormat::Video(VideoFormat::{})", variant_name(token)),
        _ => panic!("Unknown format: {}", token),
    }
}

fn generate_compat_code() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("compat_generated.rs");

    let toml_content =
        fs::read_to_string(TABLE_PATH).expect("Failed to read compatibility.toml");
    let registry: toml::Value =
        toml::from_str(&toml_content).expect("Failed to parse compatibility.toml");

    let kinds = collect_formats(&registry);
    validate_table(&registry, &kinds);

    let mut code = String::new();
    code.push_str("// AUTO-GENERATED by build.rs - DO NOT EDIT MANUALLY\n");
    code.push_str("// Generated from src/engine/compatibility.toml\n\n");

    let schema_version = registry
        .get("meta")
        .and_then(|m| m.get("schema_version"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    code.push_str(&format!(
        "pub const SCHEMA_VERSION: &str = \"{}\";\n\n",
        schema_version
    ));

    code.push_str(
        "pub static BUILTIN_PAIRS: &[(FileFormat, &[(FormatKind, &[FileFormat])])] = &[\n",
    );

    let pairs = registry
        .get("pairs")
        .and_then(|p| p.as_array())
        .expect("validated above");
    for pair in pairs {
        let source = pair.get("source").and_then(|v| v.as_str()).unwrap_or_default();
        code.push_str(&format!("    ({}, &[\n", format_expr(source, &kinds)));

        for group in pair.get("groups").and_then(|g| g.as_array()).into_iter().flatten() {
            let kind = match group.get("kind").and_then(|v| v.as_str()) {
                Some("image") => "FormatKind::Image",
                _ => "FormatKind::Video",
            };
            let targets = group
                .get("targets")
                .and_then(|v| v.as_array())
                .into_iter()
                .flatten()
                .filter_map(|t| t.as_str())
                .map(|t| format_expr(t, &kinds))
                .collect::<Vec<_>>()
                .join(", ");
            code.push_str(&format!("        ({}, &[{}]),\n", kind, targets));
        }

        code.push_str("    ]),\n");
    }

    code.push_str("];\n");

    fs::write(&dest_path, code).expect("Failed to write generated code");
}
