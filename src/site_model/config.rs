use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::path;

use itertools::Itertools;
use once_cell::sync::Lazy;
use siteconf_config::{
    DefaultPagination, FeedKind, FeedOverride, OutputKind, OutputTemplates, RelPath, TemplateField,
};

use super::collision;
use super::content::{normalize_relative, ContentPaths};
use super::markdown::{self, MarkdownExtension};
use super::output::{self, Output};
use super::template::{Placeholder, Template, TemplateError, EMPTY_SAVE_AS};
use crate::error::*;

const DEFAULT_PER_PAGE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_LANG: &str = "en";
const DEFAULT_THEME: &str = "theme";

static TIMEZONE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z][A-Za-z0-9_+\-]*(/[A-Za-z0-9_+\-]+)*$").unwrap()
});
static LANGUAGE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{1,8})*$").unwrap());

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pagination {
    /// Everything on one page
    Disabled,
    PerPage(NonZeroU32),
}

impl From<DefaultPagination> for Pagination {
    fn from(other: DefaultPagination) -> Self {
        match other {
            DefaultPagination::Toggle(false) => Pagination::Disabled,
            DefaultPagination::Toggle(true) => Pagination::PerPage(DEFAULT_PER_PAGE),
            DefaultPagination::PerPage(n) => {
                NonZeroU32::new(n).map_or(Pagination::Disabled, Pagination::PerPage)
            }
        }
    }
}

/// The validated settings handed to the generator.
///
/// Built once by [`SiteConfig::from_config`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SiteConfig {
    #[serde(skip)]
    pub root: path::PathBuf,
    pub author: String,
    pub site_title: String,
    pub site_url: String,
    pub analytics_id: Option<String>,
    pub content_path: RelPath,
    pub timezone: String,
    pub default_lang: String,
    pub source_repository_url: Option<String>,
    pub pagination: Pagination,
    pub markdown_extensions: Vec<MarkdownExtension>,
    pub relative_urls: bool,
    pub theme: RelPath,
    pub outputs: BTreeMap<OutputKind, Output>,
    pub content: ContentPaths,
    pub feeds: BTreeMap<FeedKind, Option<Template>>,
    pub typogrify: bool,
    pub data: serde_yaml::Mapping,
}

impl SiteConfig {
    pub fn from_config(source: siteconf_config::Config) -> Result<Self> {
        let siteconf_config::Config {
            root,
            author,
            site_title,
            site_url,
            analytics_id,
            content_path,
            timezone,
            default_lang,
            source_repository_url,
            default_pagination,
            markdown_extensions,
            relative_urls,
            theme,
            outputs,
            page_paths,
            article_paths,
            suppress,
            feeds,
            disable_feeds,
            typogrify,
            data,
        } = source;

        let author = required("author", author)?;
        let site_title = required("site_title", site_title)?;
        let site_url = required("site_url", site_url)?;
        let site_url = validate_site_url(&site_url)?;
        let content_path = content_path.ok_or(Error::MissingField {
            field: "content_path",
        })?;
        let content_path = normalize_relative("content_path", &content_path)?;

        let timezone = match non_empty(timezone) {
            Some(timezone) => validate_pattern("timezone", timezone, &TIMEZONE)?,
            None => {
                log::warn!("No timezone set, falling back to {DEFAULT_TIMEZONE}");
                DEFAULT_TIMEZONE.to_owned()
            }
        };
        let default_lang = match non_empty(default_lang) {
            Some(lang) => validate_pattern("default_lang", lang, &LANGUAGE)?,
            None => DEFAULT_LANG.to_owned(),
        };

        let markdown_extensions = markdown::resolve_extensions(markdown_extensions)?;

        let theme = theme.unwrap_or_else(|| RelPath::from(DEFAULT_THEME));
        let theme = normalize_relative("theme", &theme)?;

        check_redefinitions(&outputs, &feeds)?;
        let suppress: BTreeSet<_> = suppress.into_iter().collect();
        let outputs = resolve_outputs(&outputs, &suppress)?;
        let disable_feeds: BTreeSet<_> = disable_feeds.into_iter().collect();
        let feeds = resolve_feeds(&feeds, &disable_feeds)?;
        check_collisions(&outputs, &feeds)?;

        let content = ContentPaths::new(
            page_paths.unwrap_or_else(|| ContentPaths::default().pages().to_vec()),
            article_paths.unwrap_or_else(|| ContentPaths::default().articles().to_vec()),
        )?;

        let config = Self {
            root,
            author,
            site_title,
            site_url,
            analytics_id: non_empty(analytics_id),
            content_path,
            timezone,
            default_lang,
            source_repository_url: non_empty(source_repository_url),
            pagination: default_pagination.into(),
            markdown_extensions,
            relative_urls,
            theme,
            outputs,
            content,
            feeds,
            typogrify,
            data: data.unwrap_or_default(),
        };
        log::debug!(
            "Suppressed outputs: {}",
            config.suppressed().iter().join(", ")
        );
        Ok(config)
    }

    /// Items per listing page, `None` when everything goes on one page.
    pub fn per_page(&self) -> Option<NonZeroU32> {
        match self.pagination {
            Pagination::Disabled => None,
            Pagination::PerPage(n) => Some(n),
        }
    }

    pub fn output(&self, kind: OutputKind) -> &Output {
        &self.outputs[&kind]
    }

    pub fn save_as(&self, kind: OutputKind) -> &Template {
        &self.output(kind).save_as
    }

    /// Kinds the generator must not write.
    pub fn suppressed(&self) -> BTreeSet<OutputKind> {
        self.outputs
            .iter()
            .filter(|(_, output)| output.is_suppressed())
            .map(|(kind, _)| *kind)
            .collect()
    }

    pub fn feed(&self, kind: FeedKind) -> Option<&Template> {
        self.feeds.get(&kind).and_then(Option::as_ref)
    }

    pub fn disabled_feeds(&self) -> BTreeSet<FeedKind> {
        self.feeds
            .iter()
            .filter(|(_, path)| path.is_none())
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Link to a rendered URL the way the generator will emit it.
    ///
    /// With `relative_urls` the link stays relative for local preview.
    pub fn link(&self, url: &str) -> String {
        if self.relative_urls {
            url.to_owned()
        } else {
            format!("{}/{}", self.site_url, url.trim_start_matches('/'))
        }
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    non_empty(value).ok_or(Error::MissingField { field })
}

fn validate_site_url(site_url: &str) -> Result<String> {
    let parsed = url::Url::parse(site_url).map_err(|e| Error::InvalidField {
        field: "site_url",
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidField {
            field: "site_url",
            reason: format!("`{site_url}` cannot be used as a base URL"),
        });
    }
    Ok(site_url.trim_end_matches('/').to_owned())
}

fn validate_pattern(field: &'static str, value: String, pattern: &regex::Regex) -> Result<String> {
    if pattern.is_match(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidField {
            field,
            reason: format!("`{value}` is not recognized"),
        })
    }
}

fn parse_template(
    setting: String,
    source: &str,
    allowed: &[Placeholder],
) -> Result<Template> {
    Template::parse(source)
        .and_then(|t| t.check_allowed(allowed).map(|()| t))
        .map_err(|e| Error::InvalidTemplate {
            setting,
            template: source.to_owned(),
            source: e,
        })
}

fn parse_save_path(setting: String, source: &str, allowed: &[Placeholder]) -> Result<Template> {
    let template = parse_template(setting.clone(), source, allowed)?;
    template
        .check_save_path()
        .map_err(|e| Error::InvalidTemplate {
            setting,
            template: source.to_owned(),
            source: e,
        })?;
    Ok(template)
}

/// Reject a template set twice in the same file with different values.
///
/// A repeated save path is reported as a collision since both definitions name a file the
/// generator would write.
fn check_redefinitions(
    outputs: &BTreeMap<OutputKind, OutputTemplates>,
    feeds: &BTreeMap<FeedKind, FeedOverride>,
) -> Result<()> {
    for (kind, templates) in outputs {
        for redefinition in &templates.redefined {
            let setting = match redefinition.field {
                TemplateField::Url => output::url_setting(*kind),
                TemplateField::SaveAs => output::save_as_setting(*kind),
            };
            if redefinition.first == redefinition.second {
                log::warn!("`{setting}` is set more than once");
                continue;
            }
            return Err(match redefinition.field {
                TemplateField::SaveAs => Error::TemplateCollision {
                    first: setting.clone(),
                    first_template: redefinition.first.clone(),
                    second: setting,
                    second_template: redefinition.second.clone(),
                },
                TemplateField::Url => Error::InvalidTemplate {
                    setting,
                    template: redefinition.second.clone(),
                    source: TemplateError::Redefined {
                        first: redefinition.first.clone(),
                    },
                },
            });
        }
    }

    for (kind, feed) in feeds {
        let setting = output::feed_setting(*kind);
        for second in &feed.redefined {
            match (&feed.path, second) {
                (first, second) if first == second => {
                    log::warn!("`{setting}` is set more than once");
                }
                (Some(first), Some(second)) => {
                    return Err(Error::TemplateCollision {
                        first: setting.clone(),
                        first_template: first.clone(),
                        second: setting,
                        second_template: second.clone(),
                    });
                }
                (first, second) => {
                    return Err(Error::InvalidTemplate {
                        setting,
                        template: second.clone().unwrap_or_default(),
                        source: TemplateError::Redefined {
                            first: first.clone().unwrap_or_default(),
                        },
                    });
                }
            }
        }
    }

    Ok(())
}

fn resolve_outputs(
    overrides: &BTreeMap<OutputKind, OutputTemplates>,
    suppress: &BTreeSet<OutputKind>,
) -> Result<BTreeMap<OutputKind, Output>> {
    let mut outputs = BTreeMap::new();
    for kind in OutputKind::ALL {
        let templates = overrides.get(&kind);
        let url_source = templates
            .and_then(|t| t.url.as_deref())
            .unwrap_or_else(|| kind.default_url());
        let save_as_source = templates
            .and_then(|t| t.save_as.as_deref())
            .unwrap_or_else(|| kind.default_save_as());
        let save_as_source = if suppress.contains(&kind) {
            if !save_as_source.is_empty() && templates.is_some_and(|t| t.save_as.is_some()) {
                log::warn!("`{kind}` is suppressed, ignoring its `save_as`");
            }
            EMPTY_SAVE_AS
        } else {
            save_as_source
        };

        let allowed = output::output_placeholders(kind);
        let url = parse_template(output::url_setting(kind), url_source, allowed)?;
        let save_as = parse_save_path(output::save_as_setting(kind), save_as_source, allowed)?;

        if !url.is_empty() && !save_as.is_empty() && url.placeholders() != save_as.placeholders()
        {
            return Err(Error::InvalidTemplate {
                setting: output::url_setting(kind),
                template: url.to_string(),
                source: TemplateError::MismatchedPlaceholders {
                    other: output::save_as_setting(kind),
                    other_template: save_as.to_string(),
                },
            });
        }

        outputs.insert(kind, Output { url, save_as });
    }
    Ok(outputs)
}

fn resolve_feeds(
    overrides: &BTreeMap<FeedKind, FeedOverride>,
    disable: &BTreeSet<FeedKind>,
) -> Result<BTreeMap<FeedKind, Option<Template>>> {
    let mut feeds = BTreeMap::new();
    for kind in FeedKind::ALL {
        let source = match overrides.get(&kind) {
            Some(feed) => feed.path.as_deref(),
            None => Some(kind.default_path()),
        };
        let source = source.filter(|path| !disable.contains(&kind) && !path.is_empty());
        let path = source
            .map(|path| parse_save_path(output::feed_setting(kind), path, output::feed_placeholders(kind)))
            .transpose()?;
        feeds.insert(kind, path);
    }
    Ok(feeds)
}

/// Every written path, paired with the setting it came from.
fn save_paths<'a>(
    outputs: &'a BTreeMap<OutputKind, Output>,
    feeds: &'a BTreeMap<FeedKind, Option<Template>>,
) -> Vec<(String, &'a Template)> {
    let outputs = OutputKind::ALL.into_iter().filter_map(|kind| {
        let output = &outputs[&kind];
        (!output.is_suppressed()).then(|| (output::save_as_setting(kind), &output.save_as))
    });
    let feeds = FeedKind::ALL.into_iter().filter_map(|kind| {
        feeds[&kind]
            .as_ref()
            .map(|path| (output::feed_setting(kind), path))
    });
    outputs.chain(feeds).collect()
}

fn check_collisions(
    outputs: &BTreeMap<OutputKind, Output>,
    feeds: &BTreeMap<FeedKind, Option<Template>>,
) -> Result<()> {
    let paths = save_paths(outputs, feeds);
    let collision = paths
        .iter()
        .tuple_combinations()
        .filter(|((_, a), (_, b))| a.placeholders() == b.placeholders())
        .find(|((_, a), (_, b))| collision::overlaps(a, b));
    match collision {
        Some(((first, first_template), (second, second_template))) => {
            Err(Error::TemplateCollision {
                first: first.clone(),
                first_template: first_template.to_string(),
                second: second.clone(),
                second_template: second_template.to_string(),
            })
        }
        None => Ok(()),
    }
}
