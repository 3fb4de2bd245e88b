//! Filename extraction from a `Content-Disposition` header.

use std::sync::LazyLock;

use regex::Regex;

/// `filename=` value, either quoted or running up to the next `;`.
static FILENAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"filename[^;=\n]*=((?:"[^"\n]*"|'[^'\n]*')|[^;\n]*)"#).ok()
});

/// Filename announced by the server with every quote character removed.
/// `None` when the header is absent, has no filename or an empty one.
pub fn filename_from_disposition(header: Option<&str>) -> Option<String> {
    let caps = FILENAME.as_ref()?.captures(header?)?;
    let name: String = caps
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    (!name.is_empty()).then_some(name)
}

pub fn export_filename(header: Option<&str>, default: &str) -> String {
    filename_from_disposition(header).unwrap_or_else(|| default.to_string())
}
