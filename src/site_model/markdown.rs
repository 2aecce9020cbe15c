use std::fmt;
use std::str::FromStr;

const QUALIFIED_PREFIX: &str = "markdown.extensions.";

/// Markdown processing extensions the generator knows how to enable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownExtension {
    Abbr,
    Admonition,
    AttrList,
    Codehilite,
    DefList,
    Extra,
    FencedCode,
    Footnotes,
    Headerid,
    LegacyAttrs,
    LegacyEm,
    MdInHtml,
    Meta,
    Nl2br,
    SaneLists,
    Smarty,
    Tables,
    Toc,
    Wikilinks,
}

impl MarkdownExtension {
    pub const ALL: [MarkdownExtension; 19] = [
        MarkdownExtension::Abbr,
        MarkdownExtension::Admonition,
        MarkdownExtension::AttrList,
        MarkdownExtension::Codehilite,
        MarkdownExtension::DefList,
        MarkdownExtension::Extra,
        MarkdownExtension::FencedCode,
        MarkdownExtension::Footnotes,
        MarkdownExtension::Headerid,
        MarkdownExtension::LegacyAttrs,
        MarkdownExtension::LegacyEm,
        MarkdownExtension::MdInHtml,
        MarkdownExtension::Meta,
        MarkdownExtension::Nl2br,
        MarkdownExtension::SaneLists,
        MarkdownExtension::Smarty,
        MarkdownExtension::Tables,
        MarkdownExtension::Toc,
        MarkdownExtension::Wikilinks,
    ];

    pub const DEFAULTS: [MarkdownExtension; 3] = [
        MarkdownExtension::Codehilite,
        MarkdownExtension::Extra,
        MarkdownExtension::Meta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MarkdownExtension::Abbr => "abbr",
            MarkdownExtension::Admonition => "admonition",
            MarkdownExtension::AttrList => "attr_list",
            MarkdownExtension::Codehilite => "codehilite",
            MarkdownExtension::DefList => "def_list",
            MarkdownExtension::Extra => "extra",
            MarkdownExtension::FencedCode => "fenced_code",
            MarkdownExtension::Footnotes => "footnotes",
            MarkdownExtension::Headerid => "headerid",
            MarkdownExtension::LegacyAttrs => "legacy_attrs",
            MarkdownExtension::LegacyEm => "legacy_em",
            MarkdownExtension::MdInHtml => "md_in_html",
            MarkdownExtension::Meta => "meta",
            MarkdownExtension::Nl2br => "nl2br",
            MarkdownExtension::SaneLists => "sane_lists",
            MarkdownExtension::Smarty => "smarty",
            MarkdownExtension::Tables => "tables",
            MarkdownExtension::Toc => "toc",
            MarkdownExtension::Wikilinks => "wikilinks",
        }
    }

    /// The extension that took over this one's job, if it was retired.
    pub fn superseded_by(self) -> Option<MarkdownExtension> {
        match self {
            MarkdownExtension::Headerid => Some(MarkdownExtension::Toc),
            _ => None,
        }
    }
}

impl fmt::Display for MarkdownExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkdownExtension {
    type Err = crate::Error;

    /// Accepts both `toc` and `markdown.extensions.toc`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let short = name.trim();
        let short = short.strip_prefix(QUALIFIED_PREFIX).unwrap_or(short);
        MarkdownExtension::ALL
            .into_iter()
            .find(|ext| ext.as_str() == short)
            .ok_or_else(|| crate::Error::UnknownExtension {
                name: name.to_owned(),
            })
    }
}

/// Resolve extension names in order, keeping the first of any repeats.
pub(crate) fn resolve_extensions(names: Option<Vec<String>>) -> crate::Result<Vec<MarkdownExtension>> {
    let Some(names) = names else {
        return Ok(MarkdownExtension::DEFAULTS.to_vec());
    };

    let mut resolved: Vec<MarkdownExtension> = Vec::with_capacity(names.len());
    for name in names {
        let ext: MarkdownExtension = name.parse()?;
        if resolved.contains(&ext) {
            log::warn!("Ignoring repeated markdown extension `{name}`");
            continue;
        }
        if let Some(replacement) = ext.superseded_by() {
            log::warn!("Markdown extension `{ext}` is deprecated, prefer `{replacement}`");
        }
        resolved.push(ext);
    }
    Ok(resolved)
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|n| (*n).to_owned()).collect())
    }

    #[test]
    fn names_match_serde() {
        for ext in MarkdownExtension::ALL {
            let yaml = serde_yaml::to_string(&ext).unwrap();
            assert_eq!(yaml.trim(), ext.as_str());
        }
    }

    #[test]
    fn resolve_default() {
        let actual = resolve_extensions(None).unwrap();
        assert_eq!(actual, MarkdownExtension::DEFAULTS.to_vec());
    }

    #[test]
    fn resolve_keeps_order() {
        let actual = resolve_extensions(names(&["toc", "extra", "codehilite"])).unwrap();
        assert_eq!(
            actual,
            vec![
                MarkdownExtension::Toc,
                MarkdownExtension::Extra,
                MarkdownExtension::Codehilite
            ]
        );
    }

    #[test]
    fn resolve_qualified_name() {
        let actual = resolve_extensions(names(&["markdown.extensions.toc"])).unwrap();
        assert_eq!(actual, vec![MarkdownExtension::Toc]);
    }

    #[test]
    fn resolve_drops_repeats() {
        let actual =
            resolve_extensions(names(&["meta", "toc", "markdown.extensions.meta"])).unwrap();
        assert_eq!(actual, vec![MarkdownExtension::Meta, MarkdownExtension::Toc]);
    }

    #[test]
    fn resolve_empty_list() {
        let actual = resolve_extensions(names(&[])).unwrap();
        assert!(actual.is_empty());
    }

    #[test]
    fn resolve_unknown() {
        let actual = resolve_extensions(names(&["toc", "smartypants"]));
        match actual {
            Err(crate::Error::UnknownExtension { name }) => assert_eq!(name, "smartypants"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
