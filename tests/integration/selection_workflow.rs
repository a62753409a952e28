// End-to-end selection workflows: classify a file, pick a target, resolve
// options and build the ffmpeg invocation.

use mediarage::engine::options::{Crf, OptionDef, OptionKind, Trim};
use mediarage::engine::{
    Classification, CompatibilityTable, ConvertError, ConvertSettings, EncodingOptions,
    FileFormat, FormatKind, resolve_args,
};
use mediarage::ui::ConverterState;
use std::path::PathBuf;

use crate::common::helpers::*;

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_classify_supported_extensions_any_case() {
    for format in FileFormat::all() {
        let token = format.as_str();
        for input in [
            token.to_string(),
            token.to_lowercase(),
            format!(".{}", token),
            format!(".{}", token.to_lowercase()),
            format!("/some/dir/file.{}", token.to_lowercase()),
        ] {
            assert_eq!(
                FileFormat::classify(&input),
                Classification::Recognized(format),
                "{:?} should classify as {}",
                input,
                format
            );
        }
    }
}

#[test]
fn test_classify_unknown_strings() {
    for input in ["", ".", "txt", "movie.mkv", "clip.mp", "MPEG4", "no_extension_here"] {
        assert!(
            !FileFormat::classify(input).is_recognized(),
            "{:?} should not classify",
            input
        );
    }
}

// ============================================================================
// Compatibility lookups
// ============================================================================

#[test]
fn test_every_source_has_stable_ordered_targets() {
    let table = CompatibilityTable::builtin();
    for source in table.sources() {
        let first = table.compatible_targets(source).unwrap().to_vec();
        assert!(!first.is_empty(), "{} offers no targets", source);

        let kinds: Vec<_> = first.iter().map(|g| g.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(|k| *k == FormatKind::Video);
        assert_eq!(kinds, sorted, "image group must precede video for {}", source);

        for _ in 0..3 {
            assert_eq!(table.compatible_targets(source).unwrap(), first.as_slice());
        }
    }
}

#[test]
fn test_mov_targets_in_order() {
    let table = CompatibilityTable::builtin();
    let groups = table.compatible_targets(fmt("MOV")).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].kind, FormatKind::Image);
    assert_eq!(groups[0].targets, vec![fmt("GIF")]);
    assert_eq!(groups[1].kind, FormatKind::Video);
    assert_eq!(groups[1].targets, vec![fmt("MP4"), fmt("MPEG")]);
    assert_eq!(target_tokens(&table, "MOV"), vec!["GIF", "MP4", "MPEG"]);
}

#[test]
fn test_jpeg_only_converts_to_png() {
    let table = CompatibilityTable::builtin();
    assert_eq!(target_tokens(&table, "JPEG"), vec!["PNG"]);

    let mut state = ConverterState::new(&table);
    state.choose_file("photo.jpeg").unwrap();
    for target in FileFormat::all().filter(|f| f.as_str() != "PNG") {
        assert!(
            matches!(
                state.select_target(target),
                Err(ConvertError::IncompatibleTarget { .. })
            ),
            "JPEG -> {} must be rejected",
            target
        );
    }
    assert!(state.select_target(fmt("PNG")).is_ok());
}

#[test]
fn test_gif_and_png_have_no_conversions() {
    let table = CompatibilityTable::builtin();
    for source in ["GIF", "PNG"] {
        assert!(matches!(
            table.compatible_targets(fmt(source)),
            Err(ConvertError::UnsupportedSource(_))
        ));
        assert!(target_tokens(&table, source).is_empty());
    }
}

// ============================================================================
// Option resolution
// ============================================================================

#[test]
fn test_quality_choices_resolve_to_crf() {
    let table = CompatibilityTable::builtin();
    let selection = select(&table, "AVI", "MP4");
    let quality = OptionDef::get(OptionKind::Quality);

    let mut options = EncodingOptions::default();
    assert_eq!(resolve_args(&options, &selection).to_argv()[..2], ["-crf", "23"]);

    quality.select(&mut options, 0).unwrap();
    assert_eq!(resolve_args(&options, &selection).to_argv()[..2], ["-crf", "0"]);

    quality.select(&mut options, 51).unwrap();
    assert_eq!(resolve_args(&options, &selection).to_argv()[..2], ["-crf", "51"]);
}

#[test]
fn test_every_resolution_preset_scales_exactly() {
    let table = CompatibilityTable::builtin();
    let selection = select(&table, "MP4", "MOV");
    let resolution = OptionDef::get(OptionKind::Resolution);

    let mut options = EncodingOptions::default();
    assert!(!resolve_args(&options, &selection).flags().contains(&"-vf"));

    for idx in 1..resolution.choice_count() {
        resolution.select(&mut options, idx).unwrap();
        let label = &resolution.choices()[idx];
        let dims = label.split(' ').next().unwrap().replace('x', ":");

        let argv = resolve_args(&options, &selection).to_argv();
        let pos = argv.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(argv[pos + 1], format!("scale={}", dims));
    }
}

#[test]
fn test_trim_start_and_end() {
    let table = CompatibilityTable::builtin();
    let options = EncodingOptions {
        trim: Trim::new("00:00:05", "00:00:15").unwrap(),
        ..EncodingOptions::default()
    };
    let argv = resolve_args(&options, &select(&table, "MOV", "MP4")).to_argv();
    assert_eq!(argv[argv.len() - 4..], ["-ss", "00:00:05", "-t", "00:00:10"]);
}

#[test]
fn test_trim_end_only_uses_end_as_duration() {
    // Known asymmetry: with no start, the end text is passed to -t as-is.
    // ffmpeg reads it as a duration, which equals the end time only because
    // the kept range begins at zero.
    let table = CompatibilityTable::builtin();
    let options = EncodingOptions {
        trim: Trim::new("", "00:00:10").unwrap(),
        ..EncodingOptions::default()
    };
    let args = resolve_args(&options, &select(&table, "MOV", "MP4"));
    assert_eq!(args.flags(), vec!["-crf", "-preset", "-t"]);
    assert_eq!(args.to_string(), "-crf 23 -preset medium -t 00:00:10");
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_to_request() {
    let table = CompatibilityTable::builtin();
    let mut state = ConverterState::new(&table);

    state.choose_file("/videos/holiday.mp4").unwrap();
    state.select_target(fmt("MOV")).unwrap();
    {
        let options = state.options_mut().unwrap();
        options.quality = Crf::new(28).unwrap();
        OptionDef::get(OptionKind::FrameRate)
            .select(options, 3)
            .unwrap();
    }

    let settings = ConvertSettings {
        output_dir: Some(PathBuf::from("/exports")),
        filename_pattern: Some("{basename}_small".to_string()),
    };
    let request = state.convert(&settings).unwrap();
    assert_eq!(request.output, PathBuf::from("/exports/holiday_small.mov"));

    let cmd = request.to_command("ffmpeg", true);
    assert_eq!(
        cmd_to_string(&cmd),
        "ffmpeg -hide_banner -y -i /videos/holiday.mp4 -crf 28 -preset medium -r 24 /exports/holiday_small.mov"
    );
}

#[test]
fn test_image_target_request_has_no_options() {
    let options = EncodingOptions {
        quality: Crf::new(0).unwrap(),
        ..EncodingOptions::default()
    };
    let request = request("/videos/clip.mpeg", "GIF", &options);
    assert!(request.args.is_empty());
    assert_eq!(
        cmd_to_string(&request.to_command("ffmpeg", false)),
        "ffmpeg -hide_banner -n -i /videos/clip.mpeg /videos/clip.gif"
    );
}
