use crate::cli::{Cli, Commands, DryRunArgs};
use anyhow::{Context, Result};
use mediarage::engine::options::{Trim, VIDEO_OPTIONS};
use mediarage::engine::{
    Classification, CompatibilityTable, ConversionRequest, DryRunBackend, EncodingBackend,
    FileFormat,
};
use mediarage::{config, ui};
use std::process;

pub fn run(cli: Cli) {
    let table = CompatibilityTable::builtin();

    match cli.command {
        Commands::Formats => handle_formats(),
        Commands::Classify { file } => handle_classify(&file),
        Commands::Targets { source, json } => handle_targets(&table, &source, json),
        Commands::Options => handle_options(),
        Commands::DryRun(args) => handle_dry_run(&table, &args),
        Commands::InitConfig => handle_init_config(),
    }
}

fn handle_formats() {
    for (kind, formats) in FileFormat::grouped() {
        let names: Vec<_> = formats.iter().map(|f| f.as_str()).collect();
        println!("{}: {}", kind, names.join(", "));
    }
}

fn handle_classify(file: &str) {
    match FileFormat::classify(file) {
        Classification::Recognized(format) => {
            println!("{}: {} ({})", file, format, format.kind());
        }
        Classification::Unrecognized { extension } => {
            eprintln!("{}: unrecognized format '{}'", file, extension);
            process::exit(1);
        }
    }
}

fn handle_targets(table: &CompatibilityTable, source: &str, json: bool) {
    let groups = match source
        .parse::<FileFormat>()
        .and_then(|format| table.compatible_targets(format))
    {
        Ok(groups) => groups,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(groups) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for group in groups {
        let names: Vec<_> = group.targets.iter().map(|f| f.as_str()).collect();
        println!("{}: {}", group.kind, names.join(", "));
    }
}

fn handle_options() {
    for def in VIDEO_OPTIONS {
        let default = def.default_index();
        let choices: Vec<_> = def
            .choices()
            .into_iter()
            .enumerate()
            .map(|(i, label)| if i == default { format!("[{}]", label) } else { label })
            .collect();

        println!("{} ({}, {})", def.label, def.name, def.flag);
        println!("  {}", def.description);
        println!("  {}", choices.join(", "));
        println!();
    }
    println!("Trim (--trim-start, --trim-end)");
    println!("  HH:MM:SS, leave empty to keep the whole file");
}

fn handle_dry_run(table: &CompatibilityTable, args: &DryRunArgs) {
    let config = config::Config::load().unwrap_or_else(|e| {
        tracing::warn!("Config unreadable, using defaults: {:#}", e);
        config::Config::default()
    });

    let request = match build_request(table, &config, args) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&request) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let overwrite = args.overwrite || config.defaults.overwrite;
    let mut backend = DryRunBackend::new(config.encoder.ffmpeg_path.as_str(), overwrite);
    if let Err(e) = backend.submit(request) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
    for command in backend.commands() {
        println!("{}", command);
    }
}

/// Flags override config defaults; the session validates the file and target.
fn build_request(
    table: &CompatibilityTable,
    config: &config::Config,
    args: &DryRunArgs,
) -> Result<ConversionRequest> {
    let mut options = config.defaults.encoding_options();
    if let Some(crf) = &args.crf {
        options.quality = crf.parse()?;
    }
    if let Some(resolution) = &args.resolution {
        options.resolution = resolution.parse()?;
    }
    if let Some(preset) = &args.preset {
        options.preset = preset.parse()?;
    }
    if let Some(fps) = &args.fps {
        options.frame_rate = fps.parse()?;
    }
    options.trim = Trim::new(
        args.trim_start.as_deref().unwrap_or_default(),
        args.trim_end.as_deref().unwrap_or_default(),
    )?;

    let mut state = ui::ConverterState::with_defaults(table, options);
    state
        .choose_file(&args.file)
        .with_context(|| format!("Cannot convert {}", args.file.display()))?;

    let target: FileFormat = args.target.parse()?;
    let selection = *state.select_target(target)?;
    if !selection.target().is_video() {
        tracing::info!(%selection, "image target, video options ignored");
    }

    let mut settings = config.defaults.convert_settings();
    if let Some(dir) = &args.output_dir {
        settings.output_dir = Some(dir.clone());
    }
    if let Some(pattern) = &args.pattern {
        settings.filename_pattern = Some(pattern.clone());
    }

    Ok(state.convert(&settings)?)
}

fn handle_init_config() {
    let path = match config::Config::config_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if config::Config::exists() {
        match config::Config::load_from(&path) {
            Ok(cfg) => {
                println!("Config loaded successfully from {}", path.display());
                println!("{:#?}", cfg);
            }
            Err(e) => {
                eprintln!("Config at {} is invalid: {:#}", path.display(), e);
                process::exit(1);
            }
        }
        return;
    }

    println!("No config at {}, creating default config...", path.display());
    if let Err(e) = config::Config::ensure_default() {
        eprintln!("Failed to save default config: {:#}", e);
        process::exit(1);
    }
    println!("Default config saved to {}", path.display());
}
