use std::collections::BTreeSet;

use serde_json::{Map, Value};
use siteconf_config::{FeedKind, OutputKind};

use super::config::{Pagination, SiteConfig};

impl SiteConfig {
    /// Named settings in the form the generator reads at startup.
    ///
    /// Optional values that are unset are left out rather than sent as placeholders.  A
    /// suppressed kind's `*_SAVE_AS` is the empty string and a disabled feed is `null`.
    pub fn to_settings(&self) -> Map<String, Value> {
        let mut settings = Map::new();
        settings.insert("AUTHOR".into(), self.author.clone().into());
        settings.insert("SITENAME".into(), self.site_title.clone().into());
        settings.insert("SITEURL".into(), self.site_url.clone().into());
        if let Some(analytics_id) = &self.analytics_id {
            settings.insert("GOOGLE_ANALYTICS".into(), analytics_id.clone().into());
        }
        settings.insert("PATH".into(), self.content_path.to_string().into());
        settings.insert("TIMEZONE".into(), self.timezone.clone().into());
        settings.insert("DEFAULT_LANG".into(), self.default_lang.clone().into());
        if let Some(url) = &self.source_repository_url {
            settings.insert("GITHUB_URL".into(), url.clone().into());
        }
        let pagination = match self.pagination {
            Pagination::Disabled => Value::Bool(false),
            Pagination::PerPage(n) => n.get().into(),
        };
        settings.insert("DEFAULT_PAGINATION".into(), pagination);
        settings.insert(
            "MD_EXTENSIONS".into(),
            self.markdown_extensions
                .iter()
                .map(|ext| Value::from(ext.as_str()))
                .collect(),
        );
        settings.insert("RELATIVE_URLS".into(), self.relative_urls.into());
        settings.insert("THEME".into(), self.theme.to_string().into());

        for kind in OutputKind::ALL {
            let output = self.output(kind);
            let prefix = kind.setting_prefix();
            settings.insert(format!("{prefix}_URL"), output.url.as_str().into());
            settings.insert(format!("{prefix}_SAVE_AS"), output.save_as.as_str().into());
        }

        settings.insert("PAGE_PATHS".into(), path_list(self.content.pages()));
        settings.insert("ARTICLE_PATHS".into(), path_list(self.content.articles()));

        for kind in FeedKind::ALL {
            let path = self
                .feed(kind)
                .map_or(Value::Null, |path| path.as_str().into());
            settings.insert(kind.setting_name().into(), path);
        }

        settings.insert("TYPOGRIFY".into(), self.typogrify.into());

        let builtin: BTreeSet<String> = settings.keys().cloned().collect();
        for (key, value) in &self.data {
            let Some(key) = key.as_str() else {
                log::warn!("Skipping theme data with non-string key {key:?}");
                continue;
            };
            let name = key.to_uppercase();
            if builtin.contains(&name) {
                log::warn!("Theme data `{key}` shadows the built-in `{name}`, skipping");
                continue;
            }
            if settings.contains_key(&name) {
                log::warn!("Theme data `{key}` differs from an earlier key only in case, skipping");
                continue;
            }
            match serde_json::to_value(value) {
                Ok(value) => {
                    settings.insert(name, value);
                }
                Err(e) => log::warn!("Skipping theme data `{key}`: {e}"),
            }
        }

        settings
    }
}

fn path_list(paths: &[siteconf_config::RelPath]) -> Value {
    paths.iter().map(|p| Value::from(p.to_string())).collect()
}
