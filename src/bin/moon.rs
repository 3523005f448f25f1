//! Command-line interface for moon
//! This binary loads MOON documents into JSON/YAML, dumps JSON back to MOON, and prints the
//! intermediate output of each pipeline stage.
//!
//! Usage:
//!   moon load `<path>` [--compact] [--format json|yaml]   - Load a document and print the model
//!   moon dump `<json-path>` [--output `<path>`]            - Dump a JSON object as MOON text
//!   moon inspect `<path>` --stage tokens|events|ast        - Print one pipeline stage as JSON
//!   moon constructs                                      - List registered constructs
//!
//! MOON files are read and written as UTF-8 unless `--encoding <label>` names another encoding.
//! Configuration comes from the embedded defaults, `./moon.toml` if present, and `--config <file>`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use moon::moon::fileio::{self, Sink, Source};
use moon::moon::token::Token;
use moon::{encoding_for_label, Encoding, Moon, Value};
use moon_config::{Loader, MoonConfig, OutputFormat};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("moon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load, dump and inspect MOON documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults and ./moon.toml"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .short('e')
                .global(true)
                .default_value("utf-8")
                .help("Encoding of MOON files, e.g. utf-8, latin1, shift_jis"),
        )
        .subcommand(
            Command::new("load")
                .about("Load a MOON document and print the resulting model")
                .arg(
                    Arg::new("path")
                        .help("Path to the MOON file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Print JSON on a single line")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"]),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Dump a JSON object as MOON text")
                .arg(
                    Arg::new("path")
                        .help("Path to the JSON file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the output of one pipeline stage as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the MOON file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .short('s')
                        .help("Pipeline stage to print")
                        .value_parser(["tokens", "events", "ast"])
                        .default_value("ast"),
                ),
        )
        .subcommand(Command::new("constructs").about("List registered constructs"))
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });
    init_logging(&config);

    let moon = Moon::new();
    let result = match matches.subcommand() {
        Some(("load", load_matches)) => handle_load_command(&moon, &config, load_matches),
        Some(("dump", dump_matches)) => handle_dump_command(&moon, dump_matches),
        Some(("inspect", inspect_matches)) => {
            handle_inspect_command(&moon, &config, inspect_matches)
        }
        Some(("constructs", _)) => {
            handle_constructs_command(&moon);
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(matches: &ArgMatches) -> Result<MoonConfig, moon_config::Error> {
    let mut loader = Loader::new().with_optional_file("moon.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(("load", load_matches)) = matches.subcommand() {
        if load_matches.get_flag("compact") {
            loader = loader.set_override("output.pretty", false)?;
        }
        if let Some(format) = load_matches.get_one::<String>("format") {
            loader = loader.set_override("output.format", format.as_str())?;
        }
    }
    loader.build()
}

/// RUST_LOG wins over the configured filter.
fn init_logging(config: &MoonConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn render<T: Serialize>(value: &T, config: &MoonConfig) -> Result<String, Box<dyn std::error::Error>> {
    let text = match (config.output.format, config.output.pretty) {
        (OutputFormat::Yaml, _) => serde_yaml::to_string(value)?,
        (OutputFormat::Json, true) => serde_json::to_string_pretty(value)? + "\n",
        (OutputFormat::Json, false) => serde_json::to_string(value)? + "\n",
    };
    Ok(text)
}

fn encoding(matches: &ArgMatches) -> Result<&'static Encoding, moon::Error> {
    let label = matches.get_one::<String>("encoding").unwrap();
    Ok(encoding_for_label(label)?)
}

/// Handle the load command
fn handle_load_command(moon: &Moon, config: &MoonConfig, matches: &ArgMatches) -> CliResult {
    let path = matches.get_one::<String>("path").unwrap();
    let document = moon.load_encoded(Source::path(path), encoding(matches)?)?;
    print!("{}", render(&document, config)?);
    Ok(())
}

/// Handle the dump command
fn handle_dump_command(moon: &Moon, matches: &ArgMatches) -> CliResult {
    let path = matches.get_one::<String>("path").unwrap();
    let value: Value = serde_json::from_str(&fileio::read(Source::path(path))?)?;

    match matches.get_one::<String>("output") {
        Some(output) => moon.dump_encoded(&value, Sink::path(output), encoding(matches)?)?,
        None => print!("{}", moon.to_string(&value)?),
    }
    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(moon: &Moon, config: &MoonConfig, matches: &ArgMatches) -> CliResult {
    let path = matches.get_one::<String>("path").unwrap();
    let stage = matches.get_one::<String>("stage").unwrap();
    let text = fileio::read_encoded(Source::path(path), encoding(matches)?)?;

    // stage output is always JSON
    let config = MoonConfig {
        output: moon_config::OutputConfig {
            format: OutputFormat::Json,
            ..config.output.clone()
        },
        ..config.clone()
    };

    let output = match stage.as_str() {
        "tokens" => render(&moon.tokens(&text)?.collect::<Result<Vec<Token>, _>>()?, &config)?,
        "events" => render(&moon.events(&text)?.collect::<Result<Vec<_>, _>>()?, &config)?,
        "ast" => render(&moon.nodes(&text)?.collect::<Result<Vec<_>, _>>()?, &config)?,
        _ => unreachable!(),
    };
    print!("{}", output);
    Ok(())
}

/// Handle the constructs command
fn handle_constructs_command(moon: &Moon) {
    let registry = moon.registry();
    println!("Registered constructs:\n");
    for name in registry.list_constructs() {
        let kinds = registry
            .construct(&name)
            .map(|hook| {
                hook.represents()
                    .iter()
                    .map(|kind| kind.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("  {}", name);
        println!("    represents: {}", kinds);
    }
}
