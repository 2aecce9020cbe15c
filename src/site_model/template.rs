use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

/// Empty save path: the generator writes nothing for a kind bound to it.
pub const EMPTY_SAVE_AS: &str = "";

/// Values a URL or save-path template may reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Slug,
    Lang,
    Category,
    Author,
    Date,
    Name,
}

impl Placeholder {
    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Slug => "slug",
            Placeholder::Lang => "lang",
            Placeholder::Category => "category",
            Placeholder::Author => "author",
            Placeholder::Date => "date",
            Placeholder::Name => "name",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let placeholder = match name {
            "slug" => Placeholder::Slug,
            "lang" => Placeholder::Lang,
            "category" => Placeholder::Category,
            "author" => Placeholder::Author,
            "date" => Placeholder::Date,
            "name" => Placeholder::Name,
            _ => return None,
        };
        Some(placeholder)
    }

    /// Only dates take a format spec, e.g. `{date:%Y}`.
    pub fn accepts_format(self) -> bool {
        self == Placeholder::Date
    }

    /// Whether a substituted value may contain `/`.
    ///
    /// Slugs and names never do; a formatted date can (`%Y/%m`).
    pub fn may_span_dirs(self) -> bool {
        self == Placeholder::Date
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("`{{` at byte {offset} is never closed")]
    Unclosed { offset: usize },
    #[error("`}}` at byte {offset} has no matching `{{`")]
    UnmatchedClose { offset: usize },
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },
    #[error("unknown placeholder `{{{name}}}`")]
    UnknownPlaceholder { name: String },
    #[error("`{{{placeholder}}}` does not take a format")]
    UnexpectedFormat { placeholder: Placeholder },
    #[error("`{{{placeholder}}}` is not available here")]
    NotAllowed { placeholder: Placeholder },
    #[error("placeholders differ from `{other}` ({other_template:?})")]
    MismatchedPlaceholders {
        other: String,
        other_template: String,
    },
    #[error("save paths must be relative to the output directory")]
    Absolute,
    #[error("save paths must not leave the output directory")]
    ParentDir,
    #[error("no value for `{{{placeholder}}}`")]
    MissingValue { placeholder: Placeholder },
    #[error("conflicts with an earlier definition ({first:?})")]
    Redefined { first: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        placeholder: Placeholder,
        format: Option<String>,
    },
}

/// A parsed `{placeholder}` pattern, e.g. `pages/{slug}.html`.
///
/// `{{` and `}}` stand for literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn empty() -> Self {
        Self {
            source: EMPTY_SAVE_AS.to_owned(),
            segments: Vec::new(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, n)| n == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, n)| n == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedClose { offset }),
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(TemplateError::Unclosed { offset }),
                            c => body.push(c),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed { offset });
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(&body, offset)?);
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The template's placeholder family.
    pub fn placeholders(&self) -> BTreeSet<Placeholder> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder { placeholder, .. } => Some(*placeholder),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `values` into the template.
    ///
    /// Date formats are left to the generator; the date value is inserted as given.
    pub fn render(&self, values: &BTreeMap<Placeholder, String>) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder { placeholder, .. } => {
                    let value = values.get(placeholder).ok_or(TemplateError::MissingValue {
                        placeholder: *placeholder,
                    })?;
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }

    pub(crate) fn check_allowed(&self, allowed: &[Placeholder]) -> Result<(), TemplateError> {
        match self.placeholders().into_iter().find(|p| !allowed.contains(p)) {
            Some(placeholder) => Err(TemplateError::NotAllowed { placeholder }),
            None => Ok(()),
        }
    }

    pub(crate) fn check_save_path(&self) -> Result<(), TemplateError> {
        if self.source.starts_with('/') {
            return Err(TemplateError::Absolute);
        }
        if self.source.split('/').any(|part| part == "..") {
            return Err(TemplateError::ParentDir);
        }
        Ok(())
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl serde::Serialize for Template {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

fn parse_placeholder(body: &str, offset: usize) -> Result<Segment, TemplateError> {
    let (name, format) = match body.split_once(':') {
        Some((name, format)) => (name, Some(format)),
        None => (body, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(TemplateError::EmptyPlaceholder { offset });
    }
    let placeholder = Placeholder::from_name(name).ok_or_else(|| {
        TemplateError::UnknownPlaceholder {
            name: name.to_owned(),
        }
    })?;
    if format.is_some() && !placeholder.accepts_format() {
        return Err(TemplateError::UnexpectedFormat { placeholder });
    }
    Ok(Segment::Placeholder {
        placeholder,
        format: format.map(str::to_owned),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn values(pairs: &[(Placeholder, &str)]) -> BTreeMap<Placeholder, String> {
        pairs.iter().map(|(p, v)| (*p, (*v).to_owned())).collect()
    }

    #[test]
    fn parse_slug() {
        let template = Template::parse("{slug}.html").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Placeholder {
                    placeholder: Placeholder::Slug,
                    format: None
                },
                Segment::Literal(".html".to_owned()),
            ]
        );
        assert_eq!(template.as_str(), "{slug}.html");
    }

    #[test]
    fn parse_date_format() {
        let template = Template::parse("posts/{date:%Y}/{date:%m}/index.html").unwrap();
        assert_eq!(
            template.placeholders(),
            BTreeSet::from([Placeholder::Date])
        );
        assert_eq!(
            template.segments()[1],
            Segment::Placeholder {
                placeholder: Placeholder::Date,
                format: Some("%Y".to_owned())
            }
        );
    }

    #[test]
    fn parse_escaped_braces() {
        let template = Template::parse("{{literal}}/{slug}").unwrap();
        assert_eq!(template.segments()[0], Segment::Literal("{literal}/".to_owned()));
    }

    #[test]
    fn parse_empty() {
        let template = Template::parse("").unwrap();
        assert!(template.is_empty());
        assert_eq!(template, Template::empty());
    }

    #[test]
    fn parse_unclosed() {
        assert_eq!(
            Template::parse("pages/{slug.html"),
            Err(TemplateError::Unclosed { offset: 6 })
        );
    }

    #[test]
    fn parse_nested_open() {
        assert_eq!(
            Template::parse("{sl{ug}"),
            Err(TemplateError::Unclosed { offset: 0 })
        );
    }

    #[test]
    fn parse_unmatched_close() {
        assert_eq!(
            Template::parse("slug}.html"),
            Err(TemplateError::UnmatchedClose { offset: 4 })
        );
    }

    #[test]
    fn parse_empty_placeholder() {
        assert_eq!(
            Template::parse("{}.html"),
            Err(TemplateError::EmptyPlaceholder { offset: 0 })
        );
    }

    #[test]
    fn parse_unknown_placeholder() {
        assert_eq!(
            Template::parse("{title}.html"),
            Err(TemplateError::UnknownPlaceholder {
                name: "title".to_owned()
            })
        );
    }

    #[test]
    fn parse_format_on_slug() {
        assert_eq!(
            Template::parse("{slug:>10}.html"),
            Err(TemplateError::UnexpectedFormat {
                placeholder: Placeholder::Slug
            })
        );
    }

    #[test]
    fn render_slug_and_lang() {
        let template = Template::parse("pages/{slug}-{lang}.html").unwrap();
        let actual = template
            .render(&values(&[
                (Placeholder::Slug, "ligatures"),
                (Placeholder::Lang, "fr"),
            ]))
            .unwrap();
        assert_eq!(actual, "pages/ligatures-fr.html");
    }

    #[test]
    fn render_missing_value() {
        let template = Template::parse("{slug}-{lang}.html").unwrap();
        let actual = template.render(&values(&[(Placeholder::Slug, "ligatures")]));
        assert_eq!(
            actual,
            Err(TemplateError::MissingValue {
                placeholder: Placeholder::Lang
            })
        );
    }

    #[test]
    fn check_allowed_rejects_date_on_tag() {
        let template = Template::parse("tag/{date:%Y}.html").unwrap();
        assert_eq!(
            template.check_allowed(&[Placeholder::Slug, Placeholder::Name]),
            Err(TemplateError::NotAllowed {
                placeholder: Placeholder::Date
            })
        );
    }

    #[test]
    fn check_save_path_absolute() {
        let template = Template::parse("/{slug}.html").unwrap();
        assert_eq!(template.check_save_path(), Err(TemplateError::Absolute));
    }

    #[test]
    fn check_save_path_parent() {
        let template = Template::parse("../{slug}.html").unwrap();
        assert_eq!(template.check_save_path(), Err(TemplateError::ParentDir));
    }
}
