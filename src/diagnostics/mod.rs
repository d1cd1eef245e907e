use crate::TranspileError;

use ariadne::{Color, ColorGenerator, Config, Fmt, Label, Report, ReportKind, Source};

use std::io;
use std::ops::Range;


pub type Diagnostic = Report<'static, (String, Range<usize>)>;

/// Character range of a 1-based line, without its line break. Lines past the
/// end of the source map to an empty range at the end.
pub fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let width = text.trim_end_matches(['\n', '\r']).chars().count();
            return offset..offset + width;
        }
        offset += text.chars().count();
    }
    let end = source.chars().count();
    end..end
}

pub fn report(error: &TranspileError, file: &str, source: &str, color: bool) -> Diagnostic {
    let span = line_span(source, error.line());
    let mut colors = ColorGenerator::new();

    let (code, label) = match error {
        TranspileError::Lex(e) => ("E-LEX", e.message.clone()),
        TranspileError::Parse(e) if color => (
            "E-PARSE",
            format!(
                "expected {}, found {}",
                e.expected,
                Fmt::fg(&e.found, Color::Red)
            ),
        ),
        TranspileError::Parse(e) => ("E-PARSE", format!("expected {}, found {}", e.expected, e.found)),
    };

    Report::build(ReportKind::Error, (file.to_string(), span.clone()))
        .with_config(Config::default().with_color(color))
        .with_code(code)
        .with_message(format!("{} error on line {}", error.stage(), error.line()))
        .with_label(
            Label::new((file.to_string(), span))
                .with_message(label)
                .with_color(colors.next()),
        )
        .finish()
}

/// Prints the annotated report for `error` to stderr.
pub fn eprint(error: &TranspileError, file: &str, source: &str) -> io::Result<()> {
    report(error, file, source, true).eprint((file.to_string(), Source::from(source.to_string())))
}
