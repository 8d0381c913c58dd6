use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::compiler::preprocessor::SourceFormat;
use crate::compiler::source::SourceProvider;
use crate::compiler::Compilation;
use crate::config::CompileConfig;

/// In-memory source provider backing the conformance tests.
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource {
            files: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: &str, text: &str) {
        self.files
            .insert(PathBuf::from(path), text.as_bytes().to_vec());
    }
}

impl SourceProvider for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such test file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// The expected outcome of a single front-end conformance test.
enum ExpectedOutcome {
    /// The analysis succeeds with no diagnostics at error severity.
    Clean,
    /// The analysis continues but reports a diagnostic with this code.
    DiagnosticCode(u16),
    /// The pipeline terminates with a fatal error.
    Fatal,
}

/// Helper for executing common front-end conformance tests within the unit
/// testing framework.
pub struct CheckTestRunner {
    /// The name of this test.
    name: &'static str,

    /// The entry-point source text.
    entry: &'static str,

    /// Additional workspace files analyzed after the entry point.
    extra_sources: Vec<(&'static str, &'static str)>,

    /// Copybooks available to the expander, by file name.
    copybooks: Vec<(&'static str, &'static str)>,

    /// The reference format the pipeline starts in.
    format: SourceFormat,

    /// The expected outcome.
    expected: ExpectedOutcome,
}

impl CheckTestRunner {
    /// Creates a new conformance test runner.
    pub fn new(name: &'static str) -> Self {
        CheckTestRunner {
            name,
            entry: "",
            extra_sources: Vec::new(),
            copybooks: Vec::new(),
            format: SourceFormat::Auto,
            expected: ExpectedOutcome::Clean,
        }
    }

    /// Sets the entry-point source file as the given static text.
    pub fn source(mut self, source: &'static str) -> Self {
        self.entry = source;
        self
    }

    /// Adds a workspace source file analyzed after the entry point.
    pub fn extra_source(mut self, name: &'static str, source: &'static str) -> Self {
        self.extra_sources.push((name, source));
        self
    }

    /// Makes a copybook available under the given file name.
    pub fn copybook(mut self, name: &'static str, source: &'static str) -> Self {
        self.copybooks.push((name, source));
        self
    }

    /// Starts the pipeline in the given reference format instead of Auto.
    pub fn format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    /// Expects analysis to finish without diagnostics at error severity.
    pub fn expect_clean(self) -> Self {
        self
    }

    /// Expects a diagnostic with the given code; analysis still finishes.
    pub fn expect_diagnostic(mut self, code: u16) -> Self {
        self.expected = ExpectedOutcome::DiagnosticCode(code);
        self
    }

    /// Expects the pipeline to terminate with a fatal error.
    pub fn expect_fatal(mut self) -> Self {
        self.expected = ExpectedOutcome::Fatal;
        self
    }

    /// Executes this test runner. Panics on test failure.
    pub fn run(self) {
        self.run_with(|_| {});
    }

    /// Executes this test runner, then hands the finished compilation to the
    /// given closure for further assertions. Panics on test failure.
    pub fn run_with(self, inspect: impl FnOnce(&Compilation)) {
        let mut provider = MemorySource::new();
        provider.insert("main.cob", self.entry);
        for &(name, text) in &self.extra_sources {
            provider.insert(name, text);
        }
        for &(name, text) in &self.copybooks {
            provider.insert(name, text);
        }

        let mut config = CompileConfig::for_source(self.format);
        config.workspace_files = self
            .extra_sources
            .iter()
            .map(|&(name, _)| PathBuf::from(name))
            .collect();

        let mut compilation = Compilation::new(&provider, config);
        let result = compilation.run();

        match self.expected {
            ExpectedOutcome::Clean => {
                if let Err(e) = result {
                    panic!("Test {} expected to pass, but failed with error: {e}", self.name);
                }
                if !compilation.diags.is_clean() {
                    panic!(
                        "Test {} expected no errors, but found: {:#?}",
                        self.name,
                        compilation.diags.records()
                    );
                }
            }
            ExpectedOutcome::DiagnosticCode(code) => {
                if let Err(e) = result {
                    panic!("Test {} expected to pass, but failed with error: {e}", self.name);
                }
                let hits = compilation
                    .diags
                    .records()
                    .iter()
                    .filter(|d| d.code == code)
                    .count();
                if hits == 0 {
                    panic!(
                        "Test {} expected diagnostic code {code}, but found: {:#?}",
                        self.name,
                        compilation.diags.records()
                    );
                }
            }
            ExpectedOutcome::Fatal => {
                if result.is_ok() {
                    panic!(
                        "Test {} expected the pipeline to terminate, but it succeeded.",
                        self.name
                    );
                }
                return;
            }
        }

        inspect(&compilation);
    }
}
