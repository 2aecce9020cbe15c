use std::fmt;
use std::str::FromStr;

/// A kind of file the generator can write.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Page,
    PageLang,
    Article,
    ArticleLang,
    Category,
    Tag,
    Author,
    YearArchive,
    MonthArchive,
    DayArchive,
    Archives,
    Authors,
    Categories,
    Tags,
    Index,
}

impl OutputKind {
    pub const ALL: [OutputKind; 15] = [
        OutputKind::Page,
        OutputKind::PageLang,
        OutputKind::Article,
        OutputKind::ArticleLang,
        OutputKind::Category,
        OutputKind::Tag,
        OutputKind::Author,
        OutputKind::YearArchive,
        OutputKind::MonthArchive,
        OutputKind::DayArchive,
        OutputKind::Archives,
        OutputKind::Authors,
        OutputKind::Categories,
        OutputKind::Tags,
        OutputKind::Index,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputKind::Page => "page",
            OutputKind::PageLang => "page_lang",
            OutputKind::Article => "article",
            OutputKind::ArticleLang => "article_lang",
            OutputKind::Category => "category",
            OutputKind::Tag => "tag",
            OutputKind::Author => "author",
            OutputKind::YearArchive => "year_archive",
            OutputKind::MonthArchive => "month_archive",
            OutputKind::DayArchive => "day_archive",
            OutputKind::Archives => "archives",
            OutputKind::Authors => "authors",
            OutputKind::Categories => "categories",
            OutputKind::Tags => "tags",
            OutputKind::Index => "index",
        }
    }

    /// Prefix of the generator's `*_URL` / `*_SAVE_AS` settings.
    pub fn setting_prefix(self) -> &'static str {
        match self {
            OutputKind::Page => "PAGE",
            OutputKind::PageLang => "PAGE_LANG",
            OutputKind::Article => "ARTICLE",
            OutputKind::ArticleLang => "ARTICLE_LANG",
            OutputKind::Category => "CATEGORY",
            OutputKind::Tag => "TAG",
            OutputKind::Author => "AUTHOR",
            OutputKind::YearArchive => "YEAR_ARCHIVE",
            OutputKind::MonthArchive => "MONTH_ARCHIVE",
            OutputKind::DayArchive => "DAY_ARCHIVE",
            OutputKind::Archives => "ARCHIVES",
            OutputKind::Authors => "AUTHORS",
            OutputKind::Categories => "CATEGORIES",
            OutputKind::Tags => "TAGS",
            OutputKind::Index => "INDEX",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            OutputKind::Page => "pages/{slug}.html",
            OutputKind::PageLang => "pages/{slug}-{lang}.html",
            OutputKind::Article => "{slug}.html",
            OutputKind::ArticleLang => "{slug}-{lang}.html",
            OutputKind::Category => "category/{slug}.html",
            OutputKind::Tag => "tag/{slug}.html",
            OutputKind::Author => "author/{slug}.html",
            // Date archives are opt-in
            OutputKind::YearArchive | OutputKind::MonthArchive | OutputKind::DayArchive => "",
            OutputKind::Archives => "archives.html",
            OutputKind::Authors => "authors.html",
            OutputKind::Categories => "categories.html",
            OutputKind::Tags => "tags.html",
            OutputKind::Index => "index.html",
        }
    }

    pub fn default_save_as(self) -> &'static str {
        self.default_url()
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown output kind `{s}`"))
    }
}

/// A syndication feed the generator can write.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    AllAtom,
    CategoryAtom,
    TranslationAtom,
    AuthorAtom,
    AuthorRss,
}

impl FeedKind {
    pub const ALL: [FeedKind; 5] = [
        FeedKind::AllAtom,
        FeedKind::CategoryAtom,
        FeedKind::TranslationAtom,
        FeedKind::AuthorAtom,
        FeedKind::AuthorRss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "all_atom",
            FeedKind::CategoryAtom => "category_atom",
            FeedKind::TranslationAtom => "translation_atom",
            FeedKind::AuthorAtom => "author_atom",
            FeedKind::AuthorRss => "author_rss",
        }
    }

    pub fn setting_name(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "FEED_ALL_ATOM",
            FeedKind::CategoryAtom => "CATEGORY_FEED_ATOM",
            FeedKind::TranslationAtom => "TRANSLATION_FEED_ATOM",
            FeedKind::AuthorAtom => "AUTHOR_FEED_ATOM",
            FeedKind::AuthorRss => "AUTHOR_FEED_RSS",
        }
    }

    pub fn default_path(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "feeds/all.atom.xml",
            FeedKind::CategoryAtom => "feeds/{slug}.atom.xml",
            FeedKind::TranslationAtom => "feeds/all-{lang}.atom.xml",
            FeedKind::AuthorAtom => "feeds/author/{slug}.atom.xml",
            FeedKind::AuthorRss => "feeds/author/{slug}.rss.xml",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
