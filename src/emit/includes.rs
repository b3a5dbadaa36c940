//! Rendering of injected require statements.

use crate::resolve::ResolvedImport;

/// Renders the require block written before the transformed body.
///
/// One statement per dependency, in configuration order; an empty alias
/// renders the side-effect form without a binding. Returns `None` when
/// there is nothing to include, so no stray blank lines are written.
pub fn render_includes(imports: &[ResolvedImport]) -> Option<String> {
    if imports.is_empty() {
        return None;
    }

    let statements: Vec<String> = imports
        .iter()
        .map(|import| {
            if import.alias.is_empty() {
                format!("require(\"{}\");", import.target)
            } else {
                format!("const {} = require(\"{}\");", import.alias, import.target)
            }
        })
        .collect();

    Some(format!("{}\n\n", statements.join("\n")))
}
