/// Property forced by the transparency marker.
const FILL_OPACITY: &str = "fill-opacity";

/// Rewrite an inline style so that it ends with `fill-opacity:0`.
///
/// Existing `fill-opacity` declarations and empty entries are dropped, so applying this twice
/// gives the same result as applying it once.
pub fn force_transparent_fill(style: &str) -> String {
    let mut decls: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| property_name(d) != FILL_OPACITY)
        .collect();
    decls.push("fill-opacity:0");
    decls.join(";")
}

fn property_name(decl: &str) -> &str {
    match decl.split_once(':') {
        Some((prop, _)) => prop.trim(),
        None => decl,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/style.rs"]
mod tests;
