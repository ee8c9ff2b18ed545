//! cdpgen CLI
//!
//! This binary provides the command-line entry point for cdpgen: it
//! loads a protocol document and generation settings, then runs the
//! pipeline to publish typed client sources.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::env;
use std::path::PathBuf;

use config::Settings;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle help flag
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("cdpgen");
        println!();
        println!("USAGE:");
        println!("    cdpgen [FLAGS]");
        println!();
        println!("FLAGS:");
        println!("    --protocol <file>    Protocol description JSON document [REQUIRED]");
        println!("    --output <path>      Directory to publish generated sources into [REQUIRED]");
        println!("    --settings <file>    TOML generation settings (defaults to the built-in template plan)");
        println!("    --force              Remove the output directory before publishing");
        println!("    --help, -h           Show this help message");
        println!();
        println!("EXAMPLES:");
        println!("    cdpgen --protocol browser_protocol.json --output generated/");
        println!("    cdpgen --protocol js_protocol.json --settings cdpgen.toml --output generated/ --force");
        return;
    }

    let protocol_path = match args.iter().position(|a| a == "--protocol").and_then(|i| args.get(i + 1))
    {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Error: --protocol <file> is required");
            eprintln!("Use 'cdpgen --help' for usage information");
            std::process::exit(1);
        }
    };

    let output_root = match args.iter().position(|a| a == "--output").and_then(|i| args.get(i + 1)) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Error: --output <path> is required");
            eprintln!("Use 'cdpgen --help' for usage information");
            std::process::exit(1);
        }
    };

    // Settings: --settings <file> or the built-in default plan
    let settings = match args.iter().position(|a| a == "--settings").and_then(|i| args.get(i + 1)) {
        Some(path) => match Settings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: Failed to load settings from '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let force = args.iter().any(|a| a == "--force");

    let contents = match std::fs::read_to_string(&protocol_path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error: Failed to read protocol file '{}': {}", protocol_path.display(), e);
            std::process::exit(1);
        }
    };
    let protocol: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: Protocol file '{}' is not valid JSON: {}", protocol_path.display(), e);
            std::process::exit(1);
        }
    };

    println!("Generating from {}", protocol_path.display());
    match pipeline::run(&settings, &protocol, &output_root, force) {
        Ok(report) => {
            println!(
                "Generation completed successfully: {} file(s) written, {} unchanged.",
                report.written, report.skipped
            );
        }
        Err(pipeline::PipelineError::InvalidProtocol(issues)) => {
            eprintln!("Protocol document failed schema validation:");
            for issue in &issues {
                eprintln!("  {}", issue);
            }
            std::process::exit(1);
        }
        Err(pipeline::PipelineError::InvalidModel(errors)) => {
            eprintln!("Protocol model is inconsistent:");
            for error in &errors {
                eprintln!("  {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
