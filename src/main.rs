// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use std::env;
use tracing::Level;

use tonal::config::validate_config;
use tonal::error::TheoryError;
use tonal::{interval, note, pcset};
use tonal::{IntervalProperty, NoteProperty, PitchClassSet, Theory, TheoryConfig};

fn print_usage() {
    println!("tonal - music theory toolkit");
    println!();
    println!("Usage: tonal [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  note <NAME>                 Show a note (\"C#4\", \"eb\")");
    println!("  midi <N>                    Note for a MIDI number");
    println!("  freq <HZ>                   Note at or just above a frequency");
    println!("  interval <NAME>             Show an interval (\"3M\", \"P-5\")");
    println!("  distance <FROM> <TO>        Spelled interval between two notes");
    println!("  semitones <N>               Canonical interval for a semitone count");
    println!("  invert <INTERVAL>           Invert an interval within the octave");
    println!("  simplify <NAME>             Simplify a note or an interval");
    println!("  enharmonic <NOTE>           Enharmonic spelling of a note");
    println!("  transpose <NOTE> <INTERVAL> Transpose a note by an interval");
    println!("  pcset <CHROMA | NOTES...>   Show a pitch class set");
    println!("  scale <NAME...>             Show a scale (\"C major\", \"eb4 dorian\")");
    println!("  chord <SYMBOL>              Show a chord (\"Cmaj7\", \"Bb7\")");
    println!("  detect <NOTES...>           Chord symbols matching a set of notes");
    println!("  prop <note|interval> <NAME> <PROPERTY>");
    println!("                              Print one property");
    println!();
    println!("Options:");
    println!("  --config <FILE>             Load tuning and custom scales/chords (YAML or TOML)");
    println!("  --flats                     Spell notes from numbers with flats");
    println!("  --verbose, -v               Log debug output to stderr");
    println!("  --help, -h                  Show this help message");
}

/// Global options stripped from the argument list
#[derive(Debug)]
struct Options {
    config: Option<String>,
    flats: bool,
    verbose: bool,
    args: Vec<String>,
}

fn parse_options(raw: Vec<String>) -> Result<Options> {
    let mut options = Options {
        config: None,
        flats: false,
        verbose: false,
        args: Vec::new(),
    };
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config = Some(path);
            }
            "--flats" => options.flats = true,
            "--verbose" | "-v" => options.verbose = true,
            _ => options.args.push(arg),
        }
    }
    Ok(options)
}

/// Usage is printed before any config is loaded
fn wants_help(options: &Options) -> bool {
    options.args.iter().any(|a| a == "--help" || a == "-h")
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_theory(options: &Options) -> Result<Theory> {
    let mut config = match &options.config {
        Some(path) => validate_config(path)?,
        None => TheoryConfig::default(),
    };
    if options.flats {
        config.prefer_sharps = false;
    }
    Theory::with_config(config)
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

/// Fetch positional argument `index`, failing with the command's usage
fn arg<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("usage: tonal {}", usage))
}

fn run(theory: &Theory, args: &[String]) -> Result<()> {
    let command = args[0].as_str();
    let rest = &args[1..];

    match command {
        "note" => {
            let name = arg(rest, 0, "note <NAME>")?;
            print_yaml(&theory.try_note(name)?)?;
        }
        "midi" => {
            let text = arg(rest, 0, "midi <N>")?;
            let midi: i32 = text
                .parse()
                .map_err(|_| anyhow!("cannot derive note from midi: got {:?}", text))?;
            print_yaml(&theory.try_note_from_midi(midi)?)?;
        }
        "freq" => {
            let text = arg(rest, 0, "freq <HZ>")?;
            let hz: f64 = text
                .parse()
                .map_err(|_| anyhow!("cannot derive note from frequency: got {:?}", text))?;
            print_yaml(&theory.try_note_from_frequency(hz)?)?;
        }
        "interval" => {
            let name = arg(rest, 0, "interval <NAME>")?;
            print_yaml(&theory.try_interval(name)?)?;
        }
        "distance" => {
            let from = arg(rest, 0, "distance <FROM> <TO>")?;
            let to = arg(rest, 1, "distance <FROM> <TO>")?;
            let name = interval::distance(from, to).ok_or_else(|| {
                anyhow!("cannot derive interval from notes: got {:?} and {:?}", from, to)
            })?;
            println!("{}", name);
        }
        "semitones" => {
            let text = arg(rest, 0, "semitones <N>")?;
            let interval = text
                .parse::<i32>()
                .ok()
                .and_then(tonal::Interval::from_semitones)
                .ok_or_else(|| anyhow!("cannot derive interval from semitones: got {:?}", text))?;
            print_yaml(&interval)?;
        }
        "invert" => {
            let name = arg(rest, 0, "invert <INTERVAL>")?;
            let inverted =
                interval::invert(name).ok_or_else(|| TheoryError::InvalidInterval(name.to_string()))?;
            println!("{}", inverted);
        }
        "simplify" => {
            let name = arg(rest, 0, "simplify <NAME>")?;
            let simple = theory
                .simplify(name)
                .ok_or_else(|| anyhow!("cannot derive note or interval from name: got {:?}", name))?;
            println!("{}", simple);
        }
        "enharmonic" => {
            let name = arg(rest, 0, "enharmonic <NOTE>")?;
            let other =
                note::enharmonic(name).ok_or_else(|| TheoryError::InvalidNote(name.to_string()))?;
            println!("{}", other);
        }
        "transpose" => {
            let name = arg(rest, 0, "transpose <NOTE> <INTERVAL>")?;
            let by = arg(rest, 1, "transpose <NOTE> <INTERVAL>")?;
            let note = theory.try_note(name)?;
            let interval = theory.try_interval(by)?;
            let moved = note.transpose(&interval).ok_or_else(|| {
                anyhow!("cannot derive note from transposition: got {:?} by {:?}", name, by)
            })?;
            println!("{}", moved);
        }
        "pcset" => {
            let first = arg(rest, 0, "pcset <CHROMA | NOTES...>")?;
            let set = if rest.len() == 1 && pcset::is_chroma(first) {
                first.parse::<PitchClassSet>()?
            } else {
                PitchClassSet::from_notes(rest)
            };
            print_yaml(&set)?;
        }
        "scale" => {
            if rest.is_empty() {
                bail!("usage: tonal scale <NAME...>");
            }
            print_yaml(&theory.try_scale(&rest.join(" "))?)?;
        }
        "chord" => {
            let symbol = arg(rest, 0, "chord <SYMBOL>")?;
            print_yaml(&theory.try_chord(symbol)?)?;
        }
        "detect" => {
            if rest.is_empty() {
                bail!("usage: tonal detect <NOTES...>");
            }
            print_yaml(&theory.detect(rest))?;
        }
        "prop" => {
            let usage = "prop <note|interval> <NAME> <PROPERTY>";
            let kind = arg(rest, 0, usage)?;
            let name = arg(rest, 1, usage)?;
            let property = arg(rest, 2, usage)?;
            let value = match kind {
                "note" => theory.try_note(name)?.get(property.parse::<NoteProperty>()?),
                "interval" => theory
                    .try_interval(name)?
                    .get(property.parse::<IntervalProperty>()?),
                other => bail!("prop expects note or interval, got {:?}", other),
            };
            println!("{}", value);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn main() {
    let options = match parse_options(env::args().skip(1).collect()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(options.verbose);

    if wants_help(&options) {
        print_usage();
        return;
    }
    if options.args.is_empty() {
        println!("tonal - music theory toolkit");
        println!("Run with --help for usage information");
        return;
    }

    let result = load_theory(&options).and_then(|theory| run(&theory, &options.args));
    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Options {
        parse_options(args.iter().map(|a| a.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_parse_options() {
        let opts = options(&["--flats", "note", "--config", "theory.yaml", "C4", "-v"]);
        assert!(opts.flats);
        assert!(opts.verbose);
        assert_eq!(opts.config.as_deref(), Some("theory.yaml"));
        assert_eq!(opts.args, vec!["note", "C4"]);

        assert!(parse_options(vec!["--config".to_string()]).is_err());
    }

    #[test]
    fn test_help_skips_config() {
        let opts = options(&["--config", "/no/such/file.yaml", "--help"]);
        assert!(wants_help(&opts));
        assert!(load_theory(&opts).is_err());
        assert!(wants_help(&options(&["-h"])));
        assert!(!wants_help(&options(&["note", "C4"])));
    }

    #[test]
    fn test_simplify_and_enharmonic_commands_differ() {
        let theory = Theory::new();
        assert!(run(&theory, &["simplify".to_string(), "C#4".to_string()]).is_ok());
        assert_eq!(theory.simplify("C#4").as_deref(), Some("C#4"));
        assert_eq!(note::enharmonic("C#4").as_deref(), Some("Db4"));
        assert!(run(&theory, &["simplify".to_string(), "nope".to_string()]).is_err());
    }
}
