use std::path::PathBuf;

use crate::cli::CheckCommand;
use crate::compiler::preprocessor::SourceFormat;

/**
 * Crate-wide configuration structures.
 */

/// Compile options for a single front-end run.
///
/// The source format is the only field mutated after construction: a
/// `>>SOURCE FORMAT` directive flips it mid-stream during preprocessing.
#[derive(Debug, Clone)]
pub(crate) struct CompileConfig {
    /// The reference format used to normalize source lines.
    pub source_format: SourceFormat,

    /// Right margin for fixed-format lines, in columns.
    pub column_length: usize,

    /// The entry-point source file, relative to the provider root.
    pub entry_point: PathBuf,

    /// Additional workspace source files analyzed after the entry point.
    pub workspace_files: Vec<PathBuf>,

    /// Directories searched for copybooks, in order.
    pub copybook_dirs: Vec<PathBuf>,

    /// Dump the classified token list as JSON after analysis.
    pub dump_tokens: bool,

    /// Dump the populated symbol table as JSON after analysis.
    pub dump_symbols: bool,

    /// Verbosity of compiler console output.
    pub verbose: u8,
}

impl CompileConfig {
    /// Minimal options for driving the pipeline over in-memory sources.
    #[cfg(test)]
    pub fn for_source(format: SourceFormat) -> Self {
        CompileConfig {
            source_format: format,
            column_length: 80,
            entry_point: PathBuf::from("main.cob"),
            workspace_files: Vec::new(),
            copybook_dirs: Vec::new(),
            dump_tokens: false,
            dump_symbols: false,
            verbose: 0,
        }
    }
}

impl TryFrom<CheckCommand> for CompileConfig {
    type Error = miette::Report;

    /// Attempts to convert a CLI check command into valid compile options.
    fn try_from(cli: CheckCommand) -> Result<Self, Self::Error> {
        // Verify the input file exists.
        if !cli.input.exists() || !cli.input.is_file() {
            miette::bail!("Input file either does not exist, or is not a file.");
        }

        // Copybook directories must exist if given.
        for dir in &cli.copybook_dir {
            if !dir.is_dir() {
                miette::bail!(
                    "config: Copybook directory '{}' does not exist.",
                    dir.display()
                );
            }
        }

        let column_length = cli.column_length.unwrap_or(80);
        if column_length < 8 {
            miette::bail!("config: Column length must leave room for the program area (>= 8).");
        }

        Ok(CompileConfig {
            source_format: cli.format.unwrap_or_default().into(),
            column_length,
            entry_point: cli.input,
            workspace_files: cli.sources,
            copybook_dirs: cli.copybook_dir,
            dump_tokens: cli.dump_tokens,
            dump_symbols: cli.dump_symbols,
            verbose: cli.verbose,
        })
    }
}
