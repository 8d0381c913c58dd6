use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::compiler::preprocessor::SourceFormat;

/// Top level CLI options for the compiler.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The command to be run.
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command
    }
}

/// All available subcommands within cobre.
#[derive(Subcommand)]
pub enum Command {
    Check(CheckCommand),
}

#[derive(Parser)]
#[command(about = "Analyzes a COBOL entry point and reports diagnostics.")]
pub struct CheckCommand {
    /// The entry-point source file to analyze.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Additional workspace source files analyzed after the entry point.
    #[arg(value_name = "FILES")]
    pub sources: Vec<PathBuf>,

    /// Reference format of the source files.
    /// By default, auto-detected from the first non-blank line.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Right margin for fixed-format sources, in columns.
    /// By default, 80.
    #[arg(long, value_name = "COLUMNS")]
    pub column_length: Option<usize>,

    /// A directory to search for copybooks. Can be specified
    /// multiple times.
    #[arg(short = 'I', long = "copybook-dir", value_name = "DIR")]
    pub copybook_dir: Vec<PathBuf>,

    /// Outputs the classified token list as JSON after analysis.
    /// Useful as a debugging tool.
    #[arg(long, action)]
    pub dump_tokens: bool,

    /// Outputs the populated symbol table as JSON after analysis.
    #[arg(long, action)]
    pub dump_symbols: bool,

    /// Set the verbosity of compiler output. Can be specified
    /// multiple times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI spelling of the reference format.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Auto,
    Fixed,
    Free,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => SourceFormat::Auto,
            FormatArg::Fixed => SourceFormat::Fixed,
            FormatArg::Free => SourceFormat::Free,
        }
    }
}
