// minijava: syntax checker for the class-based teaching language

use std::process;

use env_logger::Env;
use log::{debug, info};

use minijava_front::diagnostics::{Diagnostic, DiagnosticKind, ErrorReporter};
use minijava_front::parser::ast::Program;
use minijava_front::parser::lexer::Lexer;
use minijava_front::parser::parse::Parser;
use minijava_front::source::{SourceFile, ACCEPTED_EXTENSIONS};
use minijava_front::{exit_status, EXIT_FAILURE, EXIT_SUCCESS};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minijava");

    let path = match args.get(1).map(|s| s.as_str()) {
        Some("-h") | Some("--help") => {
            print_usage(program_name);
            process::exit(EXIT_SUCCESS);
        }
        Some(path) => path,
        None => {
            let diagnostic = Diagnostic::new(DiagnosticKind::Input, "No input file provided");
            println!("{}", diagnostic);
            print_usage(program_name);
            process::exit(EXIT_FAILURE);
        }
    };

    let file = match SourceFile::open(path) {
        Ok(file) => file,
        Err(e) => {
            println!("{}", Diagnostic::new(DiagnosticKind::Input, e.to_string()));
            process::exit(EXIT_FAILURE);
        }
    };

    debug!("parsing {}", file.path().display());
    let mut parser = Parser::from_lexer(Lexer::from_source(file));
    let program = parser.parse();
    let reporter = parser.into_reporter();

    let status = exit_status(&reporter);
    report(path, &program, reporter);
    process::exit(status);
}

fn report(path: &str, program: &Program, reporter: ErrorReporter) {
    if reporter.has_errors() {
        let count = reporter.error_count();
        for diagnostic in reporter.into_diagnostics() {
            println!("{}", diagnostic);
        }
        info!("{}: {} errors", path, count);
        return;
    }

    let fields: usize = program.classes.iter().map(|c| c.fields.len()).sum();
    let methods: usize = program.classes.iter().map(|c| c.methods.len()).sum();
    info!(
        "{}: {} classes, {} fields, {} methods",
        path,
        program.classes.len(),
        fields,
        methods
    );
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.{}>",
        program_name,
        ACCEPTED_EXTENSIONS.join("|file.")
    );
    eprintln!();
    eprintln!("Checks the syntax of one source file. Diagnostics are printed to");
    eprintln!("stdout; the exit status is {} on any error.", EXIT_FAILURE);
    eprintln!("Set RUST_LOG=debug or RUST_LOG=trace to follow the parser.");
}
