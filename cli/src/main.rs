use abacus::render_error;
use abacus_core::{evaluator, parser, validator};
use bumpalo::Bump;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reedline::{
    DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use std::io::BufRead;
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Abacus - a safe arithmetic expression evaluator
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Evaluate arithmetic expressions", long_about = None)]
struct Args {
    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Print the validated tree (for debugging)
    #[arg(long)]
    debug_checked: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

/// Run one expression through the pipeline, printing the result or
/// rendering the error. Returns whether evaluation succeeded.
fn interpret_input(input: &str, debug_parse: bool, debug_checked: bool) -> bool {
    let arena = Bump::new();

    // Parse
    let parsed = match parser::parse(&arena, input) {
        Ok(parsed) => parsed,
        Err(e) => {
            render_error(&e.into());
            return false;
        }
    };

    if debug_parse {
        println!("=== Parsed AST ===");
        println!("{:#?}", parsed.expr);
        println!();
    }

    // Validate
    let validated = match validator::validate(&arena, &parsed) {
        Ok(validated) => validated,
        Err(e) => {
            render_error(&e.into());
            return false;
        }
    };

    if debug_checked {
        println!("=== Checked tree ===");
        println!("{:#?}", validated.expr);
        println!();
    }

    // Evaluate
    match evaluator::eval(&validated) {
        Ok(value) => {
            println!("{value}");
            true
        }
        Err(e) => {
            render_error(&e.into());
            false
        }
    }
}

fn repl(args: &Args) -> Result<()> {
    let mut line_editor = Reedline::create();

    if let Some(data_dir) = dirs::data_dir() {
        let history_dir = data_dir.join("abacus");
        let _ = std::fs::create_dir_all(&history_dir);
        if let Ok(history) = FileBackedHistory::with_file(200, history_dir.join("history.txt")) {
            line_editor = line_editor.with_history(Box::new(history));
        }
    }

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("abacus".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interpret_input(&line, args.debug_parse, args.debug_checked);
            }
            Ok(Signal::CtrlC) => continue,
            Ok(Signal::CtrlD) => break,
            Err(e) => return Err(miette::miette!("readline error: {e}")),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    // One-shot evaluation
    if let Some(expression) = &args.expression {
        if !interpret_input(expression, args.debug_parse, args.debug_checked) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Piped input: evaluate line by line
    if !atty::is(atty::Stream::Stdin) {
        let stdin = std::io::stdin();
        for line in BufReader::new(stdin.lock()).lines() {
            let line = line.into_diagnostic()?;
            if line.trim().is_empty() {
                continue;
            }
            interpret_input(&line, args.debug_parse, args.debug_checked);
        }
        return Ok(());
    }

    repl(&args)
}
