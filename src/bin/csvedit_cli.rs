//! CLI tool for csvedit - imports a CSV file and outputs the table as JSON
//!
//! Usage:
//!   csvedit_cli <input.csv>                    # Output JSON to stdout
//!   csvedit_cli <input.csv> -o out.json        # Output JSON to file
//!   csvedit_cli <input.csv> --export out.csv   # Also write the re-exported CSV
//!
//! Set `RUST_LOG=csvedit=debug` for import diagnostics.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use csvedit::{logging, CsvEdit};

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

fn main() {
    logging::init("warn");

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: csvedit_cli <input.csv> [-o output.json] [--export output.csv]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = flag_value(&args, "-o");
    let export_path = flag_value(&args, "--export");

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let file_name = Path::new(input_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_path.clone());

    // Import through the editing session
    let mut editor = CsvEdit::new_test();
    let report = match editor.import(&file_name, "text/csv", &data) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error importing CSV: {}", e);
            std::process::exit(1);
        }
    };
    if report.has_adjustments() {
        eprintln!(
            "Note: {} padded row(s), {} truncated row(s), {} renamed header(s)",
            report.padded_rows, report.truncated_rows, report.renamed_headers
        );
    }

    // Serialize to JSON
    let json = match editor.dataset_json() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }

    if let Some(path) = export_path {
        let exported = match editor.export() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error exporting CSV: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(path, exported.contents) {
            eprintln!("Error writing {}: {}", path, e);
            std::process::exit(1);
        }
        eprintln!("Exported: {}", path);
    }
}
