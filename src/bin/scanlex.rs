//! Command-line interface for scanlex
//! This binary scans a file with a built-in or file-defined lexicon and prints its tokens.
//!
//! Usage:
//!   scanlex `<path>` --grammar `<name>` [--format `<format>`]   - Scan with a built-in lexicon
//!   scanlex `<path>` --lexicon `<file>` [--format `<format>`]   - Scan with a YAML/JSON lexicon
//!   scanlex --list-grammars                                  - List built-in lexicons

use clap::{Arg, ArgAction, ArgGroup, Command};
use scanlex::grammars::{self, GRAMMARS};
use scanlex::loader::{load_lexicon, read_source};
use scanlex::{Lexicon, ScanError, Scanner, Token};

fn main() {
    let matches = Command::new("scanlex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scan a file into tokens using a configurable lexicon")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the file to scan")
                .required_unless_present("list-grammars")
                .index(1),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Built-in lexicon name (see --list-grammars)"),
        )
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .short('l')
                .help("Lexicon file (.yaml, .yml or .json)"),
        )
        .group(
            ArgGroup::new("language")
                .args(["grammar", "lexicon"])
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: simple (one rendered token per line) or token-json")
                .default_value("simple"),
        )
        .arg(
            Arg::new("list-grammars")
                .long("list-grammars")
                .help("List built-in lexicons")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-grammars") {
        handle_list_grammars_command();
        return;
    }

    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing grammars");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");

    let loaded;
    let lexicon: &Lexicon = match (
        matches.get_one::<String>("grammar"),
        matches.get_one::<String>("lexicon"),
    ) {
        (Some(name), _) => grammars::by_name(name).unwrap_or_else(|| {
            eprintln!("Unknown grammar '{}'", name);
            print_grammars_to_stderr();
            std::process::exit(1);
        }),
        (None, Some(file)) => {
            loaded = load_lexicon(file).unwrap_or_else(|e| {
                eprintln!("Lexicon error: {}", e);
                std::process::exit(1);
            });
            &loaded
        }
        (None, None) => {
            eprintln!("Either --grammar or --lexicon is required");
            print_grammars_to_stderr();
            std::process::exit(1);
        }
    };

    handle_scan_command(path, lexicon, format);
}

/// Handle the scan command
fn handle_scan_command(path: &str, lexicon: &Lexicon, format: &str) {
    let source = read_source(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut tokens: Vec<Token> = Vec::new();
    let mut failure: Option<ScanError> = None;
    for result in Scanner::new(&source, lexicon).with_source_name(path) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => failure = Some(err),
        }
    }

    match format {
        "simple" => {
            for token in &tokens {
                let line = lexicon.render(token).unwrap_or_else(|e| {
                    eprintln!("Error rendering token at {}: {}", token.location, e);
                    std::process::exit(1);
                });
                println!("{}", line);
            }
        }
        "token-json" => {
            let json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error formatting tokens: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: simple, token-json");
            std::process::exit(1);
        }
    }

    if let Some(err) = failure {
        eprintln!("Scan error: {}", err);
        std::process::exit(1);
    }
}

/// Handle the list-grammars command
fn handle_list_grammars_command() {
    println!("Available grammars:\n");
    for grammar in &GRAMMARS {
        println!("  {}", grammar.name);
        println!("    {}", grammar.description);
        println!();
    }
}

fn print_grammars_to_stderr() {
    eprintln!("\nAvailable grammars:");
    for grammar in &GRAMMARS {
        eprintln!("  {} - {}", grammar.name, grammar.description);
    }
}
