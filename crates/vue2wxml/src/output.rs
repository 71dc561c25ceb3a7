//! Output formatting for conversion results.

use crate::cli::OutputFormat;
use crate::orchestrator::RunResult;
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use source_map::LineIndex;
use std::error::Error as _;
use std::path::Path;
use wxml_transform::ConvertError;

/// Formatter for diagnostic output.
pub struct OutputFormatter {
    format: OutputFormat,
    verbose: bool,
}

impl OutputFormatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Print a file that converted successfully.
    pub fn print_converted(&self, file: &Path, written: Option<&Path>) {
        match self.format {
            OutputFormat::Human => {
                if self.verbose {
                    match written {
                        Some(out) => eprintln!("{} -> {}", file.display(), out.display()),
                        None => eprintln!("{}", file.display()),
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "type": "converted",
                    "file": file.to_string_lossy(),
                    "output": written.map(|p| p.to_string_lossy().to_string()),
                });
                println!("{}", json);
            }
            OutputFormat::Machine => {}
        }
    }

    /// Print a conversion failure. `source` is the file text, when readable.
    pub fn print_failure(&self, file: &Path, error: &ConvertError, source: Option<&str>) {
        match self.format {
            OutputFormat::Human => self.print_failure_human(file, error, source),
            OutputFormat::Json => self.print_failure_json(file, error, source),
            OutputFormat::Machine => self.print_failure_machine(file, error, source),
        }
    }

    /// Print a failure to write a converted file.
    pub fn print_write_error(&self, file: &Path, error: &std::io::Error) {
        let message = format!("failed to write {}: {}", file.display(), error);
        match self.format {
            OutputFormat::Human => {
                let diagnostic = MietteDiagnostic::new(message).with_code("write-error");
                eprintln!("{:?}", Report::new(diagnostic));
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "type": "error",
                    "file": file.to_string_lossy(),
                    "code": "write-error",
                    "message": message,
                });
                println!("{}", json);
            }
            OutputFormat::Machine => {
                println!(
                    "{}:0:0:write-error:{}",
                    file.display(),
                    message.replace(':', "\\:")
                );
            }
        }
    }

    /// Print the summary.
    pub fn print_summary(&self, result: &RunResult) {
        match self.format {
            OutputFormat::Human => self.print_summary_human(result),
            OutputFormat::Json => self.print_summary_json(result),
            OutputFormat::Machine => {
                // No summary for machine format
            }
        }
    }

    // Human format

    fn print_failure_human(&self, file: &Path, error: &ConvertError, source: Option<&str>) {
        let mut diagnostic =
            MietteDiagnostic::new(message_with_causes(error)).with_code(error.code());
        if let (Some(span), Some(_)) = (error.span(), source) {
            diagnostic = diagnostic.with_label(LabeledSpan::at(span.to_range(), "here"));
        }
        if let Some(hint) = help_for(error) {
            diagnostic = diagnostic.with_help(hint);
        }

        let report = match source {
            Some(text) => Report::new(diagnostic).with_source_code(NamedSource::new(
                file.to_string_lossy(),
                text.to_string(),
            )),
            None => Report::new(diagnostic).wrap_err(format!("in {}", file.display())),
        };
        eprintln!("{:?}", report);
    }

    fn print_summary_human(&self, result: &RunResult) {
        eprintln!();
        if result.failed == 0 {
            eprintln!(
                "\x1b[32m✓\x1b[0m Converted {} file{} ({}ms)",
                result.converted,
                if result.converted == 1 { "" } else { "s" },
                result.duration_ms
            );
        } else {
            eprintln!(
                "\x1b[31m✗\x1b[0m {} of {} file{} failed to convert",
                result.failed,
                result.file_count,
                if result.file_count == 1 { "" } else { "s" }
            );
            eprintln!("Time: {}ms", result.duration_ms);
        }
    }

    // JSON format

    fn print_failure_json(&self, file: &Path, error: &ConvertError, source: Option<&str>) {
        let position = locate(error, source);
        let json = serde_json::json!({
            "type": "error",
            "file": file.to_string_lossy(),
            "code": error.code(),
            "message": message_with_causes(error),
            "span": error.span().map(|s| serde_json::json!({ "start": s.start, "end": s.end })),
            "line": position.map(|(line, _)| line),
            "column": position.map(|(_, col)| col),
        });
        println!("{}", json);
    }

    fn print_summary_json(&self, result: &RunResult) {
        let json = serde_json::json!({
            "type": "summary",
            "files": result.file_count,
            "converted": result.converted,
            "failed": result.failed,
            "duration_ms": result.duration_ms
        });
        println!("{}", json);
    }

    // Machine format

    fn print_failure_machine(&self, file: &Path, error: &ConvertError, source: Option<&str>) {
        let (line, col) = locate(error, source).unwrap_or((0, 0));
        println!(
            "{}:{}:{}:{}:{}",
            file.display(),
            line,
            col,
            error.code(),
            message_with_causes(error).replace(':', "\\:")
        );
    }
}

/// One-based line and column of the error, if it has a span.
fn locate(error: &ConvertError, source: Option<&str>) -> Option<(u32, u32)> {
    let span = error.span()?;
    let index = LineIndex::new(source?);
    Some(index.line_col(span.start).to_display())
}

fn message_with_causes(error: &ConvertError) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        let text = err.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = err.source();
    }
    message
}

fn help_for(error: &ConvertError) -> Option<&'static str> {
    match error.code() {
        "unsupported-tag" => Some("only HTML tags with a WXML counterpart can be converted"),
        "unsupported-expression" => Some("move the logic into a computed property"),
        "missing-template" => Some("add a <template> block to the component"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wxml_transform::{convert_source, ConvertOptions};

    #[test]
    fn test_locate_uses_file_coordinates() {
        let source = "<template>\n  <div>\n    <span>{{ a | b }}</span>\n  </div>\n</template>";
        let err = convert_source(source, &ConvertOptions::default()).unwrap_err();
        assert_eq!(locate(&err, Some(source)), Some((3, 11)));
        assert_eq!(locate(&err, None), None);
    }

    #[test]
    fn test_message_includes_io_cause() {
        let err = ConvertError::Io {
            path: "a.vue".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(message_with_causes(&err), "failed to read a.vue: gone");
    }

    #[test]
    fn test_help_for_known_codes() {
        assert!(help_for(&ConvertError::MissingTemplate).is_some());
        assert_eq!(
            help_for(&ConvertError::UnsupportedTemplateLang("pug".into())),
            None
        );
    }
}
