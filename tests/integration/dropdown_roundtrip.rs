// Round-trip tests for dropdown-backed options.
// Every choice index must survive select -> selected_index and survive a
// trip through the config file.

use mediarage::config::Config;
use mediarage::engine::EncodingOptions;
use mediarage::engine::options::{OptionDef, OptionKind, VIDEO_OPTIONS};

#[test]
fn every_choice_roundtrips_through_selected_index() {
    for def in VIDEO_OPTIONS {
        for idx in 0..def.choice_count() {
            let mut options = EncodingOptions::default();
            def.select(&mut options, idx).unwrap();
            assert_eq!(
                def.selected_index(&options),
                idx,
                "{} choice {} did not round-trip",
                def.name,
                idx
            );
        }
    }
}

#[test]
fn selecting_one_option_leaves_others_alone() {
    for def in VIDEO_OPTIONS {
        let mut options = EncodingOptions::default();
        def.select(&mut options, def.choice_count() - 1).unwrap();

        for other in VIDEO_OPTIONS.iter().filter(|o| o.kind != def.kind) {
            assert_eq!(
                other.selected_index(&options),
                other.default_index(),
                "selecting {} changed {}",
                def.name,
                other.name
            );
        }
    }
}

#[test]
fn out_of_range_index_is_rejected() {
    for def in VIDEO_OPTIONS {
        let mut options = EncodingOptions::default();
        assert!(def.select(&mut options, def.choice_count()).is_err());
        assert_eq!(options, EncodingOptions::default());
    }
}

#[test]
fn dropdown_choices_survive_config_roundtrip() {
    let resolution = OptionDef::get(OptionKind::Resolution);
    let frame_rate = OptionDef::get(OptionKind::FrameRate);
    let preset = OptionDef::get(OptionKind::Preset);
    let quality = OptionDef::get(OptionKind::Quality);

    for idx in 0..resolution.choice_count() {
        let mut options = EncodingOptions::default();
        resolution.select(&mut options, idx).unwrap();
        frame_rate
            .select(&mut options, idx % frame_rate.choice_count())
            .unwrap();
        preset
            .select(&mut options, idx % preset.choice_count())
            .unwrap();
        quality.select(&mut options, idx * 3).unwrap();

        let mut config = Config::default();
        config.defaults.quality = options.quality;
        config.defaults.resolution = options.resolution;
        config.defaults.preset = options.preset;
        config.defaults.frame_rate = options.frame_rate;

        let toml_str = toml::to_string(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();
        let restored_options = restored.defaults.encoding_options();

        for def in VIDEO_OPTIONS {
            assert_eq!(
                def.selected_index(&restored_options),
                def.selected_index(&options),
                "{} lost its selection (resolution idx {})",
                def.name,
                idx
            );
        }
    }
}
