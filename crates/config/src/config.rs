use std::collections::BTreeMap;
use std::fmt;
use std::path;
use std::str::FromStr;

use super::*;

pub const CONFIG_FILE_NAME: &str = "_siteconf.yml";

/// Site settings as written in `_siteconf.yml`.
///
/// Nothing is validated here beyond the file's shape; required fields stay `Option` so the
/// model layer can report which one is missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_path: Option<RelPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_repository_url: Option<String>,
    pub default_pagination: DefaultPagination,
    /// `None` selects the generator's default extension list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_extensions: Option<Vec<String>>,
    pub relative_urls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<RelPath>,
    /// Per-kind overrides of the URL and save-path templates.
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "merge_repeated"
    )]
    pub outputs: BTreeMap<OutputKind, OutputTemplates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_paths: Option<Vec<RelPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_paths: Option<Vec<RelPath>>,
    /// Listing pages that are never written.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suppress: Vec<OutputKind>,
    /// Feed path overrides; `~` disables the feed.
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "merge_repeated"
    )]
    pub feeds: BTreeMap<FeedKind, FeedOverride>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disable_feeds: Vec<FeedKind>,
    pub typogrify: bool,
    /// Extra values handed to the theme untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_yaml::Mapping>,
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = content.parse::<Config>().map_err(|e| {
            e.context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Config> {
        let file_path = find_project_file(&cwd, CONFIG_FILE_NAME);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!(
                    "No {CONFIG_FILE_NAME} file found in current directory, using default config."
                );
                let config = Config {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Status;

    fn from_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| Status::new("Failed to parse config").with_source(e))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
