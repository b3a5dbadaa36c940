//! Streaming transformation engine.
//!
//! One pass over the source: each line is classified against the raw text
//! at its start-of-line depth, folded through the rewrite pipeline, and
//! written out before the next line is pulled. Writes mirror input order
//! exactly; the aggregate export statement lands strictly after the last
//! transformed line.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::analyze::{classify, NestingTracker};
use crate::cache::{InvalidationHook, NoopInvalidation};
use crate::config::ExposeOptions;
use crate::control::Controller;
use crate::emit::{render_exports, render_includes};
use crate::error::{Error, Result};
use crate::resolve::{fix_common_typos, ResolvedImport, Resolver};
use crate::rewrite::{compile_rules, rewrite, CompiledRule};
use crate::validate;
use crate::writer;

/// What the line loop found while streaming one file.
#[derive(Debug, Default)]
pub struct TransformOutcome {
    /// Top-level symbol names in encounter order, duplicates preserved.
    pub exports: Vec<String>,
    pub lines: usize,
}

/// Streams `reader` line by line into `out`, applying the rewrite rules
/// and collecting top-level declaration names.
///
/// Declarations found at nested depth are classified but never recorded;
/// that is what keeps locally-scoped functions and variables off the
/// generated export surface.
pub async fn transform_lines<R, W>(
    reader: R,
    out: &mut W,
    rules: &[CompiledRule],
) -> std::io::Result<TransformOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut tracker = NestingTracker::new();
    let mut outcome = TransformOutcome::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if let Some(decl) = classify(&line) {
            if tracker.at_top_level() {
                outcome.exports.push(decl.name);
            }
        }
        tracker.advance(&line);

        let changed = rewrite(&line, rules);
        out.write_all(changed.as_bytes()).await?;
        out.write_all(b"\n").await?;
        outcome.lines += 1;
    }

    Ok(outcome)
}

/// Summary of one completed expose run.
#[derive(Debug)]
pub struct ExposeReport {
    pub destination: PathBuf,
    pub exports: Vec<String>,
    pub lines: usize,
    pub resume_offset: u64,
}

/// Ties resolver, writer, controller and cache hook together for expose
/// runs sharing one option set.
pub struct Exposer {
    options: ExposeOptions,
    rules: Vec<CompiledRule>,
    controller: Controller,
    hook: Box<dyn InvalidationHook>,
}

impl Exposer {
    /// Compiles the rewrite rules and resolves the log sink up front, so
    /// configuration mistakes surface before anything is written.
    pub fn new(options: ExposeOptions) -> Result<Self> {
        let rules = compile_rules(&options.rewrite)?;
        let controller = Controller::new(&options)?;

        Ok(Self {
            options,
            rules,
            controller,
            hook: Box::new(NoopInvalidation),
        })
    }

    /// Replaces the module-cache notification hook.
    pub fn with_hook(mut self, hook: Box<dyn InvalidationHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn controller(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Exposes `source` into `dest_dir/<source file name>`.
    ///
    /// A missing source is created empty before the run; a missing
    /// destination directory is created recursively. On error the bytes
    /// already written stay on disk; callers needing atomicity should
    /// target a temporary path and rename afterwards.
    pub async fn expose(&mut self, source: &Path, dest_dir: &Path) -> Result<ExposeReport> {
        self.controller.time("expose");

        let source = validate::ensure_file(source)?;
        let dest_dir = validate::ensure_dir(dest_dir)?;

        let file_name = source.file_name().ok_or_else(|| {
            Error::io(
                &source,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source path has no file name",
                ),
            )
        })?;
        let destination = dest_dir.join(file_name);

        let (file, resume_offset) = writer::open_destination(&destination, self.options.skip).await?;
        let mut out = BufWriter::new(file);

        let imports = self.resolve_dependencies(&dest_dir)?;
        if let Some(block) = render_includes(&imports) {
            out.write_all(block.as_bytes())
                .await
                .map_err(|e| Error::io(&destination, e))?;
        }

        let reader = BufReader::new(
            File::open(&source)
                .await
                .map_err(|e| Error::io(&source, e))?,
        );
        let outcome = transform_lines(reader, &mut out, &self.rules)
            .await
            .map_err(|e| Error::io(&destination, e))?;

        out.write_all(render_exports(&outcome.exports).as_bytes())
            .await
            .map_err(|e| Error::io(&destination, e))?;
        out.flush().await.map_err(|e| Error::io(&destination, e))?;

        // The load cache is only told once the bytes are on disk.
        self.hook.invalidate(&destination.to_string_lossy()).await?;

        self.controller
            .debug(&format!("exposed {} symbols", outcome.exports.len()));
        self.controller
            .success(&format!("{} ready", destination.display()));
        self.controller.time_end();

        Ok(ExposeReport {
            destination,
            exports: outcome.exports,
            lines: outcome.lines,
            resume_offset,
        })
    }

    fn resolve_dependencies(&mut self, dest_dir: &Path) -> Result<Vec<ResolvedImport>> {
        let resolver = Resolver::new(dest_dir, self.options.anchor)?;
        let mut imports = Vec::with_capacity(self.options.dependencies.len());

        for dep in &self.options.dependencies {
            let specifier = match fix_common_typos(&dep.specifier) {
                Some(fixed) => {
                    self.controller.warn(&format!(
                        "repaired specifier `{}` -> `{}`",
                        dep.specifier, fixed
                    ));
                    fixed
                }
                None => dep.specifier.clone(),
            };

            imports.push(resolver.resolve(&dep.alias, &specifier)?);
        }

        Ok(imports)
    }
}
