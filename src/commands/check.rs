use colored::Colorize;
use miette::{Diagnostic, NamedSource, Result, SourceSpan};
use thiserror::Error;

use crate::{
    cli::CheckCommand,
    compiler::{
        diag::{Diag, Severity},
        source::DiskSource,
        Compilation,
    },
    config::CompileConfig,
};

/// Executes the given check command, analyzing the passed entry point.
pub(crate) fn run_check(args: CheckCommand) -> Result<()> {
    // Create compile options from the passed arguments.
    let cfg = CompileConfig::try_from(args)?;

    let provider = DiskSource::new(".");
    let mut compilation = Compilation::new(&provider, cfg);
    compilation.run()?;

    if compilation.config.verbose > 0 {
        println!(
            "{}{} file(s), {} token(s), {} unit(s), {} diagnostic(s)",
            "info(check): ".blue(),
            compilation.files.len(),
            compilation.tokens.len(),
            compilation.symbols.globals().count(),
            compilation.diags.records().len(),
        );
    }

    if compilation.config.dump_tokens {
        let dump = serde_json::to_string_pretty(&compilation.tokens)
            .map_err(|e| miette::diagnostic!("Failed to serialize token list: {e}"))?;
        println!("{dump}");
    }
    if compilation.config.dump_symbols {
        let dump = serde_json::to_string_pretty(&compilation.symbols)
            .map_err(|e| miette::diagnostic!("Failed to serialize symbol table: {e}"))?;
        println!("{dump}");
    }

    // Render every collected diagnostic with its source excerpt.
    for diag in compilation.diags.records() {
        let report: miette::Report = render(diag, &compilation).into();
        eprintln!("{report:?}");
    }

    let errors = compilation.diags.error_count();
    if errors > 0 {
        miette::bail!("Analysis failed with {errors} error(s).");
    }
    Ok(())
}

/// A diagnostic record prepared for terminal display.
#[derive(Error, Debug, Diagnostic)]
#[error("{severity_word}[{code}]: {headline}")]
#[diagnostic(code(cobre::check))]
struct RenderedDiag {
    /// The source the diagnostic stems from.
    #[source_code]
    src: NamedSource<String>,

    severity_word: &'static str,
    code: u16,
    headline: String,

    /// The span at which the problem occurs.
    #[label("here")]
    span: Option<SourceSpan>,

    #[help]
    help: Option<String>,
}

/// Converts a collected diagnostic into its displayable form, resolving the
/// anchor's line/column against the owning file's text.
fn render(diag: &Diag, compilation: &Compilation) -> RenderedDiag {
    let file = compilation.files.get(diag.file_index);
    let (name, text) = match file {
        Some(record) => (record.path.display().to_string(), record.text.clone()),
        None => ("<unknown>".to_string(), String::new()),
    };

    let mut help_lines = diag.notes.clone();
    if let Some(suggestion) = &diag.suggestion {
        help_lines.push(format!("suggestion: {suggestion}"));
    }

    RenderedDiag {
        span: span_for(diag, &text),
        src: NamedSource::new(name, text),
        severity_word: match diag.severity {
            Severity::Recovery => "note",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        },
        code: diag.code,
        headline: diag.headline.clone(),
        help: (!help_lines.is_empty()).then(|| help_lines.join("\n")),
    }
}

/// Byte span of the diagnostic's line/column anchor within the file text.
fn span_for(diag: &Diag, text: &str) -> Option<SourceSpan> {
    if diag.line < 1 || diag.column < 1 {
        return None;
    }

    let mut offset = 0usize;
    for (idx, line) in text.split('\n').enumerate() {
        if idx + 1 == diag.line as usize {
            let column = (diag.column as usize - 1).min(line.len());
            let width = diag
                .width
                .min(line.len().saturating_sub(column))
                .max(1);
            return Some(SourceSpan::new((offset + column).into(), width));
        }
        offset += line.len() + 1;
    }
    None
}
