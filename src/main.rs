// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{warn, Level};

use chordscope::analysis::{analyze, normalize_note, split_entry};
use chordscope::config::AnalyzerConfig;
use chordscope::keyboard::{equivalent_spellings, KeyId, Keyboard};

fn print_usage() {
    println!("chordscope - Chord identification and key analysis");
    println!();
    println!("Usage: chordscope [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  identify <NOTES>...       Name the chord formed by NOTES (comma or space separated)");
    println!("      --key <KEY>           Relate the chord to KEY (\"C\", \"f#\", \"Bb minor\")");
    println!("      --no-simplify         Name the chord exactly as spelled");
    println!("      --full-numeral        Keep quality marks and figures on the numeral");
    println!("  keyboard <NOTE>           Show the key a spelling is bound to");
    println!("  keyboard <White-N|Black-N> [--alternate]");
    println!("                            Show the spelling bound to a key");
    println!("  equivalents <NOTE>        List the other spellings of a note's key");
    println!();
    println!("Options:");
    println!("  --config <PATH>           Load defaults from a YAML or TOML file");
    println!("  --yaml                    Print results as YAML");
    println!("  -v, --verbose             More log output (repeat for trace)");
    println!("  --help                    Show this help message");
}

/// Command-line options shared by every command
struct Options {
    config: Option<PathBuf>,
    verbosity: u8,
    key: Option<String>,
    no_simplify: bool,
    full_numeral: bool,
    alternate: bool,
    yaml: bool,
    positional: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        config: None,
        verbosity: 0,
        key: None,
        no_simplify: false,
        full_numeral: false,
        alternate: false,
        yaml: false,
        positional: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config = Some(PathBuf::from(path));
            }
            "--key" => {
                let key = iter
                    .next()
                    .ok_or_else(|| anyhow!("--key requires a key name"))?;
                options.key = Some(key.clone());
            }
            "-v" | "--verbose" => options.verbosity += 1,
            "-vv" => options.verbosity += 2,
            "--no-simplify" => options.no_simplify = true,
            "--full-numeral" => options.full_numeral = true,
            "--alternate" => options.alternate = true,
            "--yaml" => options.yaml = true,
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            _ => options.positional.push(arg.clone()),
        }
    }

    Ok(options)
}

fn init_logging(config: &AnalyzerConfig, verbosity: u8) {
    let base = config.tracing_level().unwrap_or(Level::WARN);
    let level = match verbosity {
        0 => base,
        1 if base != Level::TRACE => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if config.tracing_level().is_none() {
        warn!(log_level = %config.log_level, "unknown log level in configuration, using warn");
    }
}

fn identify(config: &AnalyzerConfig, options: &Options, notes: &[String]) -> Result<()> {
    let tokens: Vec<String> = notes.iter().flat_map(|n| split_entry(n)).collect();
    if tokens.is_empty() {
        bail!("identify requires at least one note");
    }

    let mut request = config.request(tokens);
    if let Some(key) = &options.key {
        request.key = Some(key.clone());
    }
    if options.no_simplify {
        request.simplify_chords = false;
    }
    if options.full_numeral {
        request.simplify_numeral = false;
    }

    let report = analyze(&request)?;
    if options.yaml {
        print!("{}", report.to_yaml()?);
        return Ok(());
    }
    println!("{}", report.chord_name());
    println!("{}", report.relationship_text());
    let diatonic = report.diatonic_text();
    if !diatonic.is_empty() {
        println!("{}", diatonic);
    }
    Ok(())
}

fn keyboard(options: &Options, target: &str) -> Result<()> {
    let keyboard = Keyboard::global();

    if let Some(id) = KeyId::from_str(target) {
        let pitch = keyboard
            .reverse(id, options.alternate)
            .ok_or_else(|| anyhow!("No such key: {}", id))?;
        if options.yaml {
            print!("{}", to_yaml(&pitch)?);
        } else {
            println!("{}", pitch);
        }
        return Ok(());
    }

    let key = keyboard.forward(target.trim()).or_else(|| {
        normalize_note(target)
            .ok()
            .and_then(|normal| keyboard.forward(&normal))
    });
    match key {
        Some(id) if options.yaml => print!("{}", to_yaml(&id)?),
        Some(id) => println!("{}", id),
        None => println!("none"),
    }
    Ok(())
}

fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to serialize output")
}

fn equivalents(note: &str) -> Result<()> {
    let spellings = equivalent_spellings(note)?;
    if spellings.is_empty() {
        println!("none");
    } else {
        println!("{}", spellings.join(", "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        println!("chordscope - Chord identification and key analysis");
        println!("Run with --help for usage information");
        return Ok(());
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let options = parse_args(&args)?;
    let config = match &options.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    init_logging(&config, options.verbosity);

    let (command, rest) = match options.positional.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => bail!("Missing command; run with --help for usage information"),
    };

    match command {
        "identify" => identify(&config, &options, rest)?,
        "keyboard" => {
            let target = rest
                .first()
                .ok_or_else(|| anyhow!("keyboard requires a note or key identifier"))?;
            keyboard(&options, target)?;
        }
        "equivalents" => {
            let note = rest
                .first()
                .ok_or_else(|| anyhow!("equivalents requires a note"))?;
            equivalents(note)?;
        }
        other => {
            eprintln!("Error: unknown command '{}'", other);
            eprintln!("Run with --help for usage information");
            std::process::exit(1);
        }
    }

    Ok(())
}
