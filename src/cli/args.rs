use std::path::PathBuf;

use clap::Parser;

use crate::resolve::Anchor;

/// Lifts a script's top-level declarations into a self-contained CommonJS
/// module: requires injected up top, every line rewritten through the
/// configured rules, and an aggregate `module.exports` appended.
#[derive(Debug, Parser)]
#[command(name = "modlift", version, about)]
pub struct Args {
    /// Source file to transform (created empty if missing)
    pub source: PathBuf,

    /// Destination directory for the generated module
    #[arg(default_value = ".")]
    pub dest: PathBuf,

    /// TOML file with options; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lines of the existing output to preserve verbatim on re-runs
    #[arg(long, value_name = "N")]
    pub skip: Option<usize>,

    /// Base directory for relative dependency specifiers
    #[arg(long, value_enum)]
    pub anchor: Option<Anchor>,

    /// Line rewrite rule as PATTERN=REPLACE; repeatable, applied in order
    #[arg(long = "rewrite", value_name = "PATTERN=REPLACE")]
    pub rewrite: Vec<String>,

    /// Module to require as ALIAS=SPECIFIER; repeatable, empty alias for a
    /// side-effect require
    #[arg(long = "require", value_name = "ALIAS=SPECIFIER")]
    pub require: Vec<String>,

    /// Suppress log output
    #[arg(long)]
    pub mute: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log to a file (or log.txt under a directory) instead of stdout
    #[arg(long, value_name = "PATH")]
    pub log: Option<String>,
}
