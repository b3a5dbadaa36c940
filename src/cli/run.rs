use anyhow::{anyhow, Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::Args;
use crate::config::{Dependency, ExposeOptions, RewriteRule};
use crate::transform::Exposer;

static LIFTING: Emoji<'_, '_> = Emoji("📦 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");

pub async fn run(args: Args) -> Result<()> {
    let options = build_options(&args)?;
    let quiet = options.mute;

    let mut exposer = Exposer::new(options)?;

    let spinner = (!quiet).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("{}Lifting {}...", LIFTING, args.source.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    });

    let result = exposer.expose(&args.source, &args.dest).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let report = result.with_context(|| format!("exposing {}", args.source.display()))?;

    if !quiet {
        println!(
            "\n{}Module ready: {}\n",
            SUCCESS,
            style(report.destination.display()).green()
        );
        println!(
            "  Symbols exported: {}",
            style(report.exports.len()).cyan()
        );
        println!("  Lines written:    {}", report.lines);
        if report.resume_offset > 0 {
            println!(
                "  Resumed at byte:  {}",
                style(report.resume_offset).yellow()
            );
        }
    }

    Ok(())
}

fn build_options(args: &Args) -> Result<ExposeOptions> {
    let mut options = match &args.config {
        Some(path) => ExposeOptions::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExposeOptions::default(),
    };

    if let Some(skip) = args.skip {
        options.skip = skip;
    }
    if let Some(anchor) = args.anchor {
        options.anchor = anchor;
    }
    if args.mute {
        options.mute = true;
    }
    if args.no_color {
        options.color = false;
    }
    if let Some(log) = &args.log {
        options.log = Some(log.clone());
    }

    for raw in &args.rewrite {
        let (pattern, replace) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--rewrite expects PATTERN=REPLACE, got `{raw}`"))?;
        options.rewrite.push(RewriteRule {
            pattern: pattern.to_string(),
            replace: replace.to_string(),
        });
    }

    for raw in &args.require {
        let (alias, specifier) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--require expects ALIAS=SPECIFIER, got `{raw}`"))?;
        options.dependencies.push(Dependency {
            alias: alias.to_string(),
            specifier: specifier.to_string(),
        });
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "modlift",
            "src/app.js",
            "out",
            "--skip",
            "3",
            "--anchor",
            "cwd",
            "--mute",
            "--rewrite",
            "foo=bar",
            "--require",
            "fs=fs",
            "--require",
            "=events",
        ]);

        let options = build_options(&args).unwrap();
        assert_eq!(options.skip, 3);
        assert_eq!(options.anchor, crate::resolve::Anchor::Cwd);
        assert!(options.mute);
        assert_eq!(options.rewrite.len(), 1);
        assert_eq!(options.dependencies.len(), 2);
        assert_eq!(options.dependencies[1].alias, "");
        assert_eq!(options.dependencies[1].specifier, "events");
    }

    #[test]
    fn test_malformed_rewrite_flag_is_rejected() {
        let args = Args::parse_from(["modlift", "src/app.js", "--rewrite", "no-separator"]);
        assert!(build_options(&args).is_err());
    }
}
