//! Rendering of the trailing aggregate export statement.

/// Renders `module.exports` over the accumulated symbol names.
///
/// Names appear one per line in encounter order, shorthand-property style;
/// duplicates are kept as the source presented them. An empty list still
/// renders a syntactically valid empty object.
pub fn render_exports(names: &[String]) -> String {
    let body = names
        .iter()
        .map(|name| format!("\t{name}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("\nmodule.exports = {{\n{body}\n}};")
}
