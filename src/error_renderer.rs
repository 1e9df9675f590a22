//! Error rendering using ariadne
//!
//! This module provides utilities for rendering evaluation errors with
//! rich formatting, source code snippets, and helpful annotations.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error with rich formatting to stderr
///
/// # Example
/// ```
/// use abacus::{evaluate, render_error};
///
/// if let Err(e) = evaluate("1 + spam") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for tests, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color
/// codes, making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Syntax { diagnostic, src }
        | Error::DisallowedElement { diagnostic, src }
        | Error::DisallowedOperator { diagnostic, src }
        | Error::DivisionByZero { diagnostic, src }
        | Error::Domain { diagnostic, src } => {
            render_diagnostic(src, diagnostic, writer, use_color)
        }
        Error::EmptyInput => {
            writeln!(writer, "{}", error)
        }
        Error::ResourceLimit { .. } => {
            writeln!(writer, "{}", error)
        }
    }
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    let mut report = Report::build(kind, ("<expression>", diag.span.0.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    // Add error code if present
    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    // Primary label with the main error span
    let color = colors.next();
    report = report.with_label(
        Label::new(("<expression>", diag.span.0.clone()))
            .with_message(&diag.message)
            .with_color(color),
    );

    // Related info as secondary labels
    for related in &diag.related {
        let color = colors.next();
        report = report.with_label(
            Label::new(("<expression>", related.span.0.clone()))
                .with_message(&related.message)
                .with_color(color),
        );
    }

    // Help text as a note
    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write(("<expression>", Source::from(source)), &mut *writer)
}
