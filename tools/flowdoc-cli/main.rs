use clap::{Parser, ValueEnum};
use flowdoc::prelude::*;
use std::fs;

/// What the CLI should do with the input file.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Compile an editor-model JSON file into a Flow Document
    Compile,
    /// Validate a Flow Document JSON file
    Validate,
}

/// A compiler and validator CLI for Flow Documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Operation to perform
    #[arg(value_enum)]
    mode: Mode,

    /// Path to the input JSON file
    path: String,

    /// After compiling, also validate the result and fail on violations
    #[arg(short, long)]
    check: bool,

    /// Write the compiled document to this path instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let input = fs::read_to_string(&cli.path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", &cli.path, e));
    });

    match cli.mode {
        Mode::Compile => run_compile(&cli, &input),
        Mode::Validate => run_validate(&input),
    }
}

fn run_compile(cli: &Cli, input: &str) {
    let model = EditorModel::from_json(input)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load editor model: {}", e)));

    let output = Compiler::new(&model)
        .generate()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }

    let json = output
        .document
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Serialization failed: {}", e)));

    match &cli.output {
        Some(path) => {
            fs::write(path, &json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
            println!(
                "Compiled {} screen(s) with {} warning(s) -> {}",
                output.document.screens.len(),
                output.warnings.len(),
                path
            );
        }
        None => println!("{}", json),
    }

    if cli.check {
        let report = validate(&output.document);
        report_and_exit(report);
    }
}

fn run_validate(input: &str) {
    report_and_exit(validate_json(input));
}

fn report_and_exit(report: ValidationReport) -> ! {
    if report.valid {
        eprintln!("Document is valid.");
        std::process::exit(0);
    }
    eprintln!("Document is invalid ({} error(s)):", report.errors.len());
    for error in &report.errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(1);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
