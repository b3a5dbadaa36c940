//! Line-level declaration detection.
//!
//! Matches one physical line against three structural patterns, first match
//! wins: class header, function header, global variable header. This is a
//! deliberate non-parser: declarations split across lines in unusual ways
//! are out of contract.

use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*class\s+(\w+)(?:\s+extends\s+\w+)*\s*\{").unwrap());

static FUNCTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?function\s+(\w+)\s*[({]").unwrap());

// Variable declarations only count from the very start of the line, and only
// the first identifier of a multi-variable declaration is taken.
static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:var|const|let)\s+([\w-]+)(?:\s+=\s+|$)").unwrap());

/// What shape of declaration a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Function,
    Variable,
}

/// A declaration detected on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
}

impl Declaration {
    fn new(kind: DeclarationKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Classifies one line, extracting the declared symbol name if any.
///
/// A line yields at most one declaration; patterns are tried in fixed
/// priority order. Lines matching no pattern are simply not declarations.
pub fn classify(line: &str) -> Option<Declaration> {
    if let Some(cap) = CLASS_PATTERN.captures(line) {
        return Some(Declaration::new(DeclarationKind::Class, &cap[1]));
    }

    if let Some(cap) = FUNCTION_PATTERN.captures(line) {
        return Some(Declaration::new(DeclarationKind::Function, &cap[1]));
    }

    if let Some(cap) = VARIABLE_PATTERN.captures(line) {
        return Some(Declaration::new(DeclarationKind::Variable, &cap[1]));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(line: &str) -> Option<String> {
        classify(line).map(|d| d.name)
    }

    #[test]
    fn test_class_headers() {
        assert_eq!(name_of("class BaseClass {"), Some("BaseClass".into()));
        assert_eq!(name_of("class BaseClassLine { }"), Some("BaseClassLine".into()));
        assert_eq!(
            name_of("    class BaseClassTabbed {"),
            Some("BaseClassTabbed".into())
        );
        assert_eq!(
            name_of("class ChildClass extends BaseClass {"),
            Some("ChildClass".into())
        );
        assert_eq!(
            classify("class BaseClass {").map(|d| d.kind),
            Some(DeclarationKind::Class)
        );
    }

    #[test]
    fn test_function_headers() {
        assert_eq!(name_of("function synchronous() {"), Some("synchronous".into()));
        assert_eq!(
            name_of("async function asynchronous() {"),
            Some("asynchronous".into())
        );
        assert_eq!(
            name_of("    async function asyncTabbed() {"),
            Some("asyncTabbed".into())
        );
        assert_eq!(
            name_of("function withSpacesAndArgs (d,e,f) {"),
            Some("withSpacesAndArgs".into())
        );
    }

    #[test]
    fn test_variable_headers() {
        assert_eq!(
            name_of("const constVar = () => console.warn('Be warned!');"),
            Some("constVar".into())
        );
        assert_eq!(name_of("let letVar = function () {"), Some("letVar".into()));
        assert_eq!(name_of("var varVar = 42;"), Some("varVar".into()));
        assert_eq!(name_of("const bare"), Some("bare".into()));
    }

    #[test]
    fn test_variable_requires_line_start() {
        assert_eq!(name_of("    const indented = 1;"), None);
        assert_eq!(name_of("\tlet tabbed = 2;"), None);
    }

    #[test]
    fn test_variable_requires_spaced_assignment_or_line_end() {
        assert_eq!(name_of("const tight=1;"), None);
        assert_eq!(name_of("const trailing;"), None);
    }

    #[test]
    fn test_first_identifier_only() {
        assert_eq!(name_of("const first = 1, second = 2;"), Some("first".into()));
    }

    #[test]
    fn test_non_declarations() {
        assert_eq!(name_of("module.exports = {"), None);
        assert_eq!(name_of("    return a + (b / c);"), None);
        assert_eq!(name_of("}"), None);
        assert_eq!(name_of(""), None);
    }

    #[test]
    fn test_priority_order_is_class_first() {
        // A pathological line that could read as a variable declaration of a
        // class keyword still classifies by the earliest pattern that matches.
        let decl = classify("class declared {").unwrap();
        assert_eq!(decl.kind, DeclarationKind::Class);
    }
}
