use std::path::PathBuf;

use miette::Result;

use super::diag::{codes, Diag};
use super::preprocessor::Preprocessor;
use super::token::TokenKind;
use super::Compilation;

/**
 * Copybook expansion.
 *
 * A single pass over the shared token buffer replaces every
 * `COPY name ... .` statement with the lexed tokens of the named copybook,
 * splicing in place. The scan resumes at the splice point, so copybooks
 * containing further COPY statements expand on later iterations.
 */

/// Expansions allowed before the pass assumes a copybook cycle.
const MAX_EXPANSIONS: usize = 64;

/// Expands all COPY statements in the compilation's token buffer.
///
/// After a successful pass no COPY reserved-word tokens remain in the
/// stream. An unresolvable copybook is fatal.
pub(crate) fn expand(comp: &mut Compilation) -> Result<()> {
    let mut expansions = 0;
    let mut i = 0;

    while i < comp.tokens.len() {
        let tok = &comp.tokens[i];
        if tok.kind != TokenKind::Reserved || !tok.is("COPY") {
            i += 1;
            continue;
        }

        expansions += 1;
        if expansions > MAX_EXPANSIONS {
            miette::bail!(
                "Copybook expansion exceeded {} splices; the copybooks most likely include one another.",
                MAX_EXPANSIONS
            );
        }

        // The token after COPY names the copybook.
        let name_tok = comp.tokens[(i + 1).min(comp.tokens.len() - 1)].clone();
        if name_tok.is_eof()
            || !matches!(name_tok.kind, TokenKind::Identifier | TokenKind::Reserved)
        {
            comp.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    "COPY must be followed by a copybook name.",
                )
                .at_token(&comp.tokens[i]),
            );
            comp.tokens.remove(i);
            continue;
        }

        // Find the end of the statement: one past the terminating period.
        let mut j = i + 2;
        while j < comp.tokens.len() && !comp.tokens[j].is_eof() && !comp.tokens[j].is(".") {
            j += 1;
        }
        if j < comp.tokens.len() && comp.tokens[j].is(".") {
            j += 1;
        } else {
            comp.diags.report(
                Diag::recovery(
                    codes::MISSING_PERIOD,
                    "COPY statement is missing its separator period.",
                )
                .at_token(&name_tok)
                .with_suggestion("End the COPY statement with a period."),
            );
        }

        // Resolve, load and lex the copybook into a fresh sublist.
        let path = match resolve(comp, &name_tok.lexeme) {
            Some(path) => path,
            None => {
                comp.diags.report(
                    Diag::fatal(
                        codes::COPYBOOK_NOT_FOUND,
                        format!("Copybook '{}' was not found.", name_tok.lexeme),
                    )
                    .at_token(&name_tok)
                    .with_note("Searched next to the entry point and in every copybook directory."),
                );
                miette::bail!("Copybook '{}' was not found.", name_tok.lexeme);
            }
        };

        let bytes = comp.provider.read(&path).map_err(|e| {
            miette::diagnostic!("Failed to read copybook '{}': {e}", path.display())
        })?;
        let file_index = comp.register_file(&path, &bytes);

        let mut sublist = Vec::new();
        Preprocessor::new(&mut comp.config).process_file(
            &bytes,
            file_index,
            &mut sublist,
            &mut comp.diags,
        );

        comp.tokens.splice(i..j, sublist);
        // Do not advance: nested COPYs land at the splice point.
    }

    Ok(())
}

/// Locates a copybook on the provider. The statement matches the name
/// case-insensitively; the lookup tries the spelled, upper- and lower-cased
/// names with the usual extensions, in the entry point's directory first and
/// the configured copybook directories after.
fn resolve(comp: &Compilation, name: &str) -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(parent) = comp.config.entry_point.parent() {
        dirs.push(parent.to_path_buf());
    }
    dirs.extend(comp.config.copybook_dirs.iter().cloned());

    let variants = [
        name.to_string(),
        name.to_ascii_uppercase(),
        name.to_ascii_lowercase(),
    ];
    let extensions = ["", ".cob", ".cpy", ".CBL"];

    for dir in &dirs {
        for variant in &variants {
            for ext in &extensions {
                let candidate = dir.join(format!("{variant}{ext}"));
                if comp.provider.exists(&candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}
