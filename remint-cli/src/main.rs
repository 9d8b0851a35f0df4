//! Command-line interface for remint
//! This binary applies inline text directives to a file, writing the
//! transformed result to a second path.
//!
//! Usage:
//!   remint `<input>` `<output>` [--window-bytes N] [--overlap-words N]   - Transform a file
//!   remint `<input>` --dump-tokens                                       - Inspect the token stream

use clap::{Arg, ArgAction, Command};
use std::path::Path;

fn main() {
    let matches = Command::new("remint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Applies inline directives ((hex), (up, 3), ...) to a text file")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the input text file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Path to write the transformed text")
                .required_unless_present("dump-tokens")
                .index(2),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("window-bytes")
                .long("window-bytes")
                .value_parser(clap::value_parser!(u64))
                .help("Bytes per read window (1024..=8192)"),
        )
        .arg(
            Arg::new("overlap-words")
                .long("overlap-words")
                .value_parser(clap::value_parser!(u64))
                .help("Words carried across window boundaries (10..=20)"),
        )
        .arg(
            Arg::new("dump-tokens")
                .long("dump-tokens")
                .help("Print the input's token stream as JSON instead of transforming")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input = matches
        .get_one::<String>("input")
        .expect("input is required");

    if matches.get_flag("dump-tokens") {
        handle_dump_command(input);
        return;
    }

    let output = matches
        .get_one::<String>("output")
        .expect("output is required unless dumping tokens");

    let mut loader = remint_config::Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(&bytes) = matches.get_one::<u64>("window-bytes") {
        loader = loader
            .set_override("chunking.window_bytes", bytes as i64)
            .unwrap_or_else(|e| fail(&format!("invalid --window-bytes: {}", e)));
    }
    if let Some(&words) = matches.get_one::<u64>("overlap-words") {
        loader = loader
            .set_override("chunking.overlap_words", words as i64)
            .unwrap_or_else(|e| fail(&format!("invalid --overlap-words: {}", e)));
    }
    let config = loader
        .build()
        .unwrap_or_else(|e| fail(&format!("configuration error: {}", e)));

    let options = remint_core::ChunkOptions {
        window_bytes: config.chunking.window_bytes,
        overlap_words: config.chunking.overlap_words,
    };
    remint_core::process_file(Path::new(input), Path::new(output), options)
        .unwrap_or_else(|e| fail(&e.to_string()));

    println!("Wrote {}", output);
}

/// Handle the --dump-tokens command
fn handle_dump_command(input: &str) {
    let source = std::fs::read_to_string(input)
        .unwrap_or_else(|e| fail(&format!("failed to read {}: {}", input, e)));
    let entries = remint_core::lexer::scan(&source);
    let json = serde_json::to_string_pretty(&entries)
        .unwrap_or_else(|e| fail(&format!("failed to serialize tokens: {}", e)));
    println!("{}", json);
}

fn fail(message: &str) -> ! {
    eprintln!("remint: {}", message);
    std::process::exit(1);
}
