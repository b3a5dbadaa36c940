//! Ordered line substitution pipeline.

use regex::Regex;

use crate::config::RewriteRule;
use crate::error::{Error, Result};

/// A rewrite rule with its pattern compiled once.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: Regex,
    replace: String,
}

impl CompiledRule {
    pub fn new(rule: &RewriteRule) -> Result<Self> {
        let pattern = Regex::new(&rule.pattern).map_err(|source| Error::Pattern {
            pattern: rule.pattern.clone(),
            source,
        })?;

        Ok(Self {
            pattern,
            replace: rule.replace.clone(),
        })
    }
}

/// Compiles the configured rule list, preserving its order.
pub fn compile_rules(rules: &[RewriteRule]) -> Result<Vec<CompiledRule>> {
    rules.iter().map(CompiledRule::new).collect()
}

/// Applies every rule to the line in list order.
///
/// Each rule substitutes globally and its output feeds the next rule, so a
/// later rule sees earlier rewrites, never the original text. An empty rule
/// list passes the line through untouched.
pub fn rewrite(line: &str, rules: &[CompiledRule]) -> String {
    rules.iter().fold(line.to_string(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, rule.replace.as_str())
            .into_owned()
    })
}
