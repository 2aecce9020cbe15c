static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a slug for a given title or file stem.
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}

/// Whether `path` lies at or below `root`, compared component by component.
///
/// An empty `root` contains every path.
pub fn is_within(path: &relative_path::RelativePath, root: &relative_path::RelativePath) -> bool {
    let mut components = path.components();
    root.components().all(|c| components.next() == Some(c))
}
