/**
 * The front-end pipeline.
 *
 * bytes → logical lines → normalized spans → classified tokens →
 * copybook-expanded token list → analyzed token list + symbol table.
 */
use std::path::{Path, PathBuf};

use miette::Result;

use crate::config::CompileConfig;

pub(crate) mod analyzer;
pub(crate) mod copybook;
pub(crate) mod diag;
pub(crate) mod lexer;
pub(crate) mod preprocessor;
pub(crate) mod source;
pub(crate) mod symbols;
pub(crate) mod token;
pub(crate) mod vocab;

use analyzer::Analyzer;
use diag::Diagnostics;
use preprocessor::Preprocessor;
use source::SourceProvider;
use symbols::SymbolTable;
use token::Token;

/// One source file seen by the compilation, kept around for diagnostics.
pub(crate) struct SourceFileRecord {
    pub path: PathBuf,
    pub text: String,
}

/// A single compilation over one entry point plus its workspace files.
///
/// Owns the shared token buffer, the symbol table and the diagnostic sink;
/// every stage operates on these in place.
pub(crate) struct Compilation<'a> {
    provider: &'a dyn SourceProvider,
    pub config: CompileConfig,
    pub files: Vec<SourceFileRecord>,
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
    pub diags: Diagnostics,
}

impl<'a> Compilation<'a> {
    pub fn new(provider: &'a dyn SourceProvider, config: CompileConfig) -> Self {
        Compilation {
            provider,
            config,
            files: Vec::new(),
            tokens: Vec::new(),
            symbols: SymbolTable::new(),
            diags: Diagnostics::new(),
        }
    }

    /// Runs the whole front-end. Fatal conditions (unreadable entry point,
    /// missing copybook) return an error; everything else lands in the
    /// diagnostic sink for the caller to inspect.
    pub fn run(&mut self) -> Result<()> {
        let entry = self.config.entry_point.clone();
        self.process_path(&entry)?;

        for path in self.config.workspace_files.clone() {
            self.process_path(&path)?;
        }

        // Exactly one EOF token terminates the buffer; the analyzer and the
        // copybook expander both rely on it.
        self.tokens.push(Token::eof());

        copybook::expand(self)?;

        Analyzer::new(&self.tokens, &mut self.symbols, &mut self.diags).run();
        Ok(())
    }

    fn process_path(&mut self, path: &Path) -> Result<()> {
        let bytes = self.provider.read(path).map_err(|e| {
            miette::diagnostic!("Failed to read source file '{}': {e}", path.display())
        })?;
        let file_index = self.register_file(path, &bytes);

        Preprocessor::new(&mut self.config).process_file(
            &bytes,
            file_index,
            &mut self.tokens,
            &mut self.diags,
        );
        Ok(())
    }

    /// Registers a file's text for diagnostics, returning its index.
    pub(crate) fn register_file(&mut self, path: &Path, bytes: &[u8]) -> usize {
        let index = self.files.len();
        self.files.push(SourceFileRecord {
            path: path.to_path_buf(),
            text: String::from_utf8_lossy(bytes).into_owned(),
        });
        index
    }
}
