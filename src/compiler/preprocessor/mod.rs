/**
 * The preprocessing stage: logical lines in, classified tokens out.
 *
 * For every line the sequencing is fixed: detect the reference format if it
 * is still undecided, normalize the line under the *current* options, then
 * scan for directives. A `>>SOURCE FORMAT` flip therefore only affects the
 * lines after the one that carries it.
 */
mod directive;
pub(crate) mod format;

pub(crate) use format::SourceFormat;

use crate::config::CompileConfig;

use super::diag::Diagnostics;
use super::lexer;
use super::source::LineReader;
use super::token::Token;

/// Runs normalization, directive handling and lexing over whole files.
pub(crate) struct Preprocessor<'a> {
    config: &'a mut CompileConfig,
}

impl<'a> Preprocessor<'a> {
    pub fn new(config: &'a mut CompileConfig) -> Self {
        Preprocessor { config }
    }

    /// Preprocesses and lexes one file's bytes, appending tokens to the
    /// shared buffer. Line numbers restart at 1 for each file.
    pub fn process_file(
        &mut self,
        bytes: &[u8],
        file_index: usize,
        tokens: &mut Vec<Token>,
        diags: &mut Diagnostics,
    ) {
        for (line_number, raw) in LineReader::new(bytes) {
            let text = String::from_utf8_lossy(raw);

            if self.config.source_format == SourceFormat::Auto {
                if let Some(format) = format::detect_format(&text) {
                    self.config.source_format = format;
                }
            }

            let normalized = format::normalize(
                &text,
                self.config.source_format,
                self.config.column_length,
            );

            // A recognized directive line mutates the options and is not
            // tokenized; unknown directives fall through to the lexer.
            if directive::scan_line(&normalized, self.config) {
                continue;
            }

            lexer::lex_line(&normalized, line_number, file_index, tokens, diags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocess(source: &str, format: SourceFormat) -> (Vec<Token>, Diagnostics) {
        let mut config = CompileConfig::for_source(format);
        let mut tokens = Vec::new();
        let mut diags = Diagnostics::new();
        Preprocessor::new(&mut config).process_file(source.as_bytes(), 0, &mut tokens, &mut diags);
        (tokens, diags)
    }

    #[test]
    fn fixed_comment_lines_emit_no_tokens() {
        let source = "      * nothing here\n       DISPLAY X.\n";
        let (tokens, diags) = preprocess(source, SourceFormat::Fixed);
        assert!(diags.is_clean());
        assert_eq!(tokens[0].lexeme, "DISPLAY");
        assert!(tokens.iter().all(|t| t.line == 2));
    }

    #[test]
    fn source_format_directive_applies_to_later_lines() {
        // After the flip to free format there is no right margin, so a long
        // line keeps its tail.
        let tail = "Y".repeat(40);
        let source = format!(
            "       >>SOURCE FORMAT IS FREE\nDISPLAY \"{}\".\n",
            tail
        );
        let (tokens, diags) = preprocess(&source, SourceFormat::Fixed);
        assert!(diags.is_clean());
        assert_eq!(tokens[0].lexeme, "DISPLAY");
        assert!(tokens[1].lexeme.contains(&tail));
        // The directive line itself contributed nothing.
        assert!(tokens.iter().all(|t| t.line == 2));
    }

    #[test]
    fn auto_detection_waits_for_first_nonblank_line() {
        let source = "\n\n>>SOURCE FORMAT IS FIXED\n";
        let mut config = CompileConfig::for_source(SourceFormat::Auto);
        let mut tokens = Vec::new();
        let mut diags = Diagnostics::new();
        Preprocessor::new(&mut config).process_file(source.as_bytes(), 0, &mut tokens, &mut diags);
        // The directive line was detected as free format, then consumed.
        assert_eq!(config.source_format, SourceFormat::Fixed);
        assert!(tokens.is_empty());
    }
}
