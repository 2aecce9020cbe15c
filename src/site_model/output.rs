use siteconf_config::{FeedKind, OutputKind};

use super::template::{Placeholder, Template};

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Output {
    pub url: Template,
    pub save_as: Template,
}

impl Output {
    pub fn is_suppressed(&self) -> bool {
        self.save_as.is_empty()
    }
}

pub(crate) fn output_placeholders(kind: OutputKind) -> &'static [Placeholder] {
    match kind {
        OutputKind::Page | OutputKind::PageLang | OutputKind::Article | OutputKind::ArticleLang => {
            &[
                Placeholder::Slug,
                Placeholder::Lang,
                Placeholder::Category,
                Placeholder::Author,
                Placeholder::Date,
            ]
        }
        OutputKind::Category | OutputKind::Tag | OutputKind::Author => {
            &[Placeholder::Slug, Placeholder::Name]
        }
        OutputKind::YearArchive | OutputKind::MonthArchive | OutputKind::DayArchive => {
            &[Placeholder::Date]
        }
        OutputKind::Archives
        | OutputKind::Authors
        | OutputKind::Categories
        | OutputKind::Tags
        | OutputKind::Index => &[],
    }
}

pub(crate) fn feed_placeholders(kind: FeedKind) -> &'static [Placeholder] {
    match kind {
        FeedKind::AllAtom => &[],
        FeedKind::CategoryAtom | FeedKind::AuthorAtom | FeedKind::AuthorRss => {
            &[Placeholder::Slug]
        }
        FeedKind::TranslationAtom => &[Placeholder::Lang],
    }
}

pub(crate) fn url_setting(kind: OutputKind) -> String {
    format!("outputs.{kind}.url")
}

pub(crate) fn save_as_setting(kind: OutputKind) -> String {
    format!("outputs.{kind}.save_as")
}

pub(crate) fn feed_setting(kind: FeedKind) -> String {
    format!("feeds.{kind}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_use_allowed_placeholders() {
        for kind in OutputKind::ALL {
            let url = Template::parse(kind.default_url()).unwrap();
            let save_as = Template::parse(kind.default_save_as()).unwrap();
            assert_eq!(url.check_allowed(output_placeholders(kind)), Ok(()));
            assert_eq!(save_as.check_allowed(output_placeholders(kind)), Ok(()));
        }
        for kind in FeedKind::ALL {
            let path = Template::parse(kind.default_path()).unwrap();
            assert_eq!(path.check_allowed(feed_placeholders(kind)), Ok(()));
        }
    }

    #[test]
    fn empty_save_as_is_suppressed() {
        let output = Output {
            url: Template::parse("{slug}.html").unwrap(),
            save_as: Template::empty(),
        };
        assert!(output.is_suppressed());
    }
}
